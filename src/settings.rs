//! # Engine settings
//!
//! Tunables of the ground-track sampler and of the next-local-eclipse search. The defaults
//! give a ±6 h track sampled every 30 min and a search horizon of 10 000 lunations (about
//! 800 years) scanned at 6-minute resolution. Settings can also be read from a JSON document
//! where every missing field falls back to its default:
//!
//! ```rust
//! use umbra::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_json_str(r#"{ "search": { "max_iterations": 120 } }"#).unwrap();
//! assert_eq!(settings.search.max_iterations, 120);
//! assert_eq!(settings.track.step_hours, 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Hours, Kilometer},
    umbra_errors::UmbraError,
};

/// Ground-track sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSettings {
    /// Half-width of the sampled window around the current instant
    pub half_window_hours: Hours,
    pub step_hours: Hours,
    /// Samples at or below this depth are dropped
    pub min_depth: f64,
}

impl Default for TrackSettings {
    fn default() -> Self {
        TrackSettings {
            half_window_hours: 6.0,
            step_hours: 0.5,
            min_depth: 0.001,
        }
    }
}

/// Bounds and resolution of the next-local-eclipse search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Number of new moons examined before giving up
    pub max_iterations: usize,
    /// Step taken past the current instant (and past each examined new moon)
    pub skip_hours: Hours,
    /// Fixed number of corrections applied to the linear new-moon estimate
    pub newton_steps: usize,
    /// Half-width of the local-visibility scan around a new moon
    pub scan_half_window_hours: Hours,
    pub scan_step_hours: Hours,
    /// Tolerance added to the penumbra radius when testing visibility
    pub visibility_slack_km: Kilometer,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            max_iterations: 10_000,
            skip_hours: 24.0,
            newton_steps: 3,
            scan_half_window_hours: 6.0,
            scan_step_hours: 0.1,
            visibility_slack_km: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub track: TrackSettings,
    pub search: SearchSettings,
}

impl EngineSettings {
    /// Read settings from a JSON document and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, UmbraError> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the sampler or the search cannot run with.
    pub fn validate(&self) -> Result<(), UmbraError> {
        let positive = [
            ("track.step_hours", self.track.step_hours),
            ("search.skip_hours", self.search.skip_hours),
            ("search.scan_step_hours", self.search.scan_step_hours),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(UmbraError::InvalidSettings(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("track.half_window_hours", self.track.half_window_hours),
            ("track.min_depth", self.track.min_depth),
            (
                "search.scan_half_window_hours",
                self.search.scan_half_window_hours,
            ),
            ("search.visibility_slack_km", self.search.visibility_slack_km),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(UmbraError::InvalidSettings(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        let windows = [
            (
                "track.half_window_hours / track.step_hours",
                self.track.half_window_hours / self.track.step_hours,
            ),
            (
                "search.scan_half_window_hours / search.scan_step_hours",
                self.search.scan_half_window_hours / self.search.scan_step_hours,
            ),
        ];
        for (name, ratio) in windows {
            if ratio > MAX_STEPS_PER_SIDE as f64 {
                return Err(UmbraError::InvalidSettings(format!(
                    "{name} must not exceed {MAX_STEPS_PER_SIDE}, got {ratio}"
                )));
            }
        }

        Ok(())
    }
}

/// Largest number of samples taken on each side of a sampled window.
pub const MAX_STEPS_PER_SIDE: i64 = 1_000_000;

/// Number of steps of size `step` on each side of a window of half-width `half_window`,
/// capped at [`MAX_STEPS_PER_SIDE`].
pub(crate) fn steps_per_side(half_window: Hours, step: Hours) -> i64 {
    if step.is_nan() || step <= 0.0 || !half_window.is_finite() {
        return 0;
    }
    let steps = (half_window / step + 1e-9).floor();
    if steps.is_nan() {
        return 0;
    }
    steps.clamp(0.0, MAX_STEPS_PER_SIDE as f64) as i64
}
