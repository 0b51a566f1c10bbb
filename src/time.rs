use hifitime::{Epoch, Unit};
use std::str::FromStr;

use crate::constants::{Degree, Hours, JulianCentury, JulianDay, DAYS_PER_CENTURY, J2000_JD};
use crate::umbra_errors::UmbraError;
use crate::vector::normalize360;

/// Parse a date such as `2024-04-08T18:17:00 UTC` into an [`Epoch`].
///
/// Arguments
/// ---------
/// * `date`: any representation accepted by [`hifitime::Epoch::from_str`]
///
/// Return
/// ------
/// * the parsed epoch, or [`UmbraError::InvalidDate`] carrying the rejected input
pub fn parse_epoch(date: &str) -> Result<Epoch, UmbraError> {
    Epoch::from_str(date.trim()).map_err(|e| UmbraError::InvalidDate(format!("{date}: {e}")))
}

/// Julian day of an epoch in the UTC scale (used as a UT1 proxy for Earth rotation).
pub fn julian_day(epoch: &Epoch) -> JulianDay {
    epoch.to_jde_utc_days()
}

/// Julian ephemeris day of an epoch in the TT scale (argument of the ephemeris series).
pub fn julian_ephemeris_day(epoch: &Epoch) -> JulianDay {
    epoch.to_jde_tt_days()
}

/// Julian centuries elapsed since J2000.0 for a given Julian day.
pub fn julian_centuries(jd: JulianDay) -> JulianCentury {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Epoch reached after `hours` of simulated time from `start`. Negative values go back in time.
pub fn epoch_after_hours(start: &Epoch, hours: Hours) -> Epoch {
    *start + Unit::Hour * hours
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in degrees
/// for a given Julian day (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `jd` - Julian day (UT1 time scale)
///
/// # Returns
/// * GMST angle in degrees, normalized to the interval [0, 360).
///
/// # Details
/// The GMST is computed in two steps:
/// 1. Use a cubic polynomial (coefficients C0–C3) to get GMST at 0h UT1
///    in seconds for the given date.
/// 2. Add the contribution of Earth's rotation during the fractional day
///    using the factor `RAP`, which converts solar days to sidereal days.
///
/// Julian days start at noon, so the day boundary is taken on `jd - 0.5`.
pub fn gmst_deg(jd: JulianDay) -> Degree {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let midnight = (jd - 0.5).floor() + 0.5;
    let t = julian_centuries(midnight);

    // Step 1: GMST at 0h UT1, seconds converted to degrees (240 s per degree)
    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) / 240.0;

    // Step 2: fraction of the solar day elapsed since 0h UT1, scaled to sidereal rotation
    let h = (jd - midnight) * 360.0;

    normalize360(gmst0 + h * RAP)
}

/// Advance the simulated clock by a frame of wall-clock time.
///
/// The animation driver owns the scheduling; this integrator only maps
/// `(previous simulated hours, real seconds elapsed, speed)` to the new simulated
/// hours, where `speed` is expressed in simulated hours per real second.
/// Non-finite inputs leave the clock where it was.
pub fn advance_sim_hours(previous: Hours, real_elapsed_seconds: f64, speed: f64) -> Hours {
    let step = real_elapsed_seconds * speed;
    if step.is_finite() {
        previous + step
    } else {
        previous
    }
}
