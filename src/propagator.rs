//! # Parameter/state propagation
//!
//! [`propagate`] advances a base [`OrbitalParameters`] snapshot by an arbitrary number of
//! simulated hours using constant mean angular rates:
//!
//! | angle | rate (°/h) |
//! |---|---|
//! | Earth rotation | [`EARTH_ROTATION_RATE`] |
//! | Sun ecliptic longitude | [`SUN_RATE`] |
//! | Moon ecliptic longitude | [`MOON_RATE`] (node phase advances at `MOON_RATE − NODE_RATE`) |
//! | ascending node | [`NODE_RATE`] |
//! | lunar anomaly | [`MOON_ANOMALY_RATE`] |
//!
//! The function is pure: the same `(base, hours, start)` triple always gives the same
//! state, for negative offsets and multi-century jumps alike. This is what lets the
//! eclipse search re-evaluate arbitrary instants.

use hifitime::Epoch;

use crate::{
    constants::{
        Degree, Hours, JulianDay, DEG, EARTH_ROTATION_RATE, MOON_ANOMALY_RATE, MOON_RATE,
        NODE_RATE, SUN_RATE,
    },
    parameters::OrbitalParameters,
    time::{epoch_after_hours, gmst_deg, julian_day, julian_ephemeris_day},
    vector::normalize360,
};

/// Time-stamped state of the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Parameters advanced to `sim_hours` and normalized
    pub params: OrbitalParameters,
    /// Simulated hours elapsed since the start instant
    pub sim_hours: Hours,
    /// Absolute instant of this state
    pub date: Epoch,
    /// Julian day (UTC) of `date`
    pub julian_day: JulianDay,
    /// Julian ephemeris day (TT) of `date`
    pub julian_ephemeris_day: JulianDay,
    /// Greenwich mean sidereal time of `date`
    pub gmst: Degree,
    /// User rotation offset added to `gmst` to orient the Earth-fixed frame.
    ///
    /// `params.earth_rotation` holds the rotation accumulated since the start instant; the
    /// sidereal time of `date` already contains that spin, so only the offset of the base
    /// snapshot is applied on top of it.
    pub rotation_offset: Degree,
}

impl SimulationState {
    /// Rotation-offset-corrected Greenwich sidereal angle, in [0, 360).
    pub fn sidereal_angle(&self) -> Degree {
        normalize360(self.gmst + self.rotation_offset)
    }
}

/// Advance `base` by `elapsed_hours` of simulated time from the instant `start`.
///
/// The Moon distance mode follows the anomaly along the perigee–apogee profile
/// `(1 − cos A) / 2`, shifted so that the base mode is kept at zero elapsed time.
/// The shifted profile is clamped to [0, 1]: when the base mode does not match the base
/// anomaly, the mode stays pinned at perigee (or apogee) for part of every anomalistic month.
/// A base mode of 0 at `A₀ = 180°`, for instance, never leaves perigee.
pub fn propagate(base: &OrbitalParameters, elapsed_hours: Hours, start: &Epoch) -> SimulationState {
    let h = elapsed_hours;

    let anomaly = base.moon_anomaly + MOON_ANOMALY_RATE * h;
    let mode_shift = ((base.moon_anomaly * DEG).cos() - (anomaly * DEG).cos()) / 2.0;

    let params = OrbitalParameters {
        ascending_node_lon: base.ascending_node_lon + NODE_RATE * h,
        sun_ecliptic_lon: base.sun_ecliptic_lon + SUN_RATE * h,
        moon_node_phase: base.moon_node_phase + (MOON_RATE - NODE_RATE) * h,
        moon_distance_mode: base.moon_distance_mode + mode_shift,
        moon_anomaly: anomaly,
        earth_rotation: base.earth_rotation + EARTH_ROTATION_RATE * h,
        ..*base
    }
    .normalized();

    let date = epoch_after_hours(start, h);
    let jd = julian_day(&date);

    SimulationState {
        params,
        sim_hours: h,
        date,
        julian_day: jd,
        julian_ephemeris_day: julian_ephemeris_day(&date),
        gmst: gmst_deg(jd),
        rotation_offset: base.earth_rotation,
    }
}
