use thiserror::Error;

/// Errors raised at the fallible edges of the crate.
///
/// The geometry core itself never fails: every inverse trigonometric call is
/// clamped and every division is floored. Only inputs coming from outside
/// (date strings, settings documents) can be rejected.
#[derive(Error, Debug)]
pub enum UmbraError {
    #[error("Invalid date string: {0}")]
    InvalidDate(String),

    #[error("Invalid engine settings: {0}")]
    InvalidSettings(String),

    #[error("Unable to deserialize engine settings: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}

impl PartialEq for UmbraError {
    fn eq(&self, other: &Self) -> bool {
        use UmbraError::*;
        match (self, other) {
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidSettings(a), InvalidSettings(b)) => a == b,

            // serde_json errors carry no comparable payload: equal if same variant
            (SettingsFormat(_), SettingsFormat(_)) => true,

            _ => false,
        }
    }
}
