#![allow(dead_code)]

use hifitime::Epoch;
use umbra::{parameters::OrbitalParameters, vector::normalize180};

/// Assert that two angles in degrees agree modulo 360.
pub fn assert_angle_close(actual: f64, expected: f64, epsilon: f64) {
    let diff = normalize180(actual - expected).abs();
    assert!(
        diff <= epsilon,
        "angles differ by {diff}°: actual {actual}, expected {expected} (epsilon {epsilon})"
    );
}

/// Start instant of the synthetic scenarios.
pub fn synthetic_start() -> Epoch {
    Epoch::from_gregorian_utc(2031, 3, 21, 12, 0, 0, 0)
}

/// Sun and Moon in conjunction at the ascending node at `sim_hours == 0`, Moon at perigee.
pub fn central_parameters() -> OrbitalParameters {
    OrbitalParameters::default()
        .with_sun_ecliptic_lon(0.0)
        .with_ascending_node_lon(0.0)
        .with_moon_node_phase(0.0)
        .with_moon_distance_mode(0.0)
}

/// Greatest eclipse of 2024-04-08.
pub fn eclipse_2024_04_08() -> Epoch {
    Epoch::from_gregorian_utc(2024, 4, 8, 18, 17, 16, 0)
}
