//! Ecliptic, equatorial and Earth-fixed position vectors of the Sun and the Moon.
//!
//! The chain of frames is
//!
//! ```text
//! ecliptic ──Rx(+ε)──▶ equatorial ──Rz(−θ)──▶ Earth-fixed
//! ```
//!
//! with ε the mean obliquity and θ the rotation-offset-corrected sidereal angle.
//! All vectors are geocentric and expressed in kilometers.

use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

use crate::{
    constants::{Degree, Kilometer, DEG, MOON_APOGEE_KM, MOON_INCLINATION_DEG, MOON_PERIGEE_KM, RAD},
    parameters::OrbitalParameters,
    vector::{
        apply, clamp, normalize360, rotation_x, rotation_z, safe_asin_deg, spherical_to_cartesian,
    },
};

/// Position of one body in the three frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyVectors {
    pub ecliptic: Vector3<f64>,
    pub equatorial: Vector3<f64>,
    pub earth_fixed: Vector3<f64>,
}

/// Sun and Moon positions in the ecliptic, equatorial and Earth-fixed frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VectorFrames {
    pub sun: BodyVectors,
    pub moon: BodyVectors,
}

/// Unit vectors describing the lunar orbit plane, in the ecliptic frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeVectors {
    pub ascending: Vector3<f64>,
    pub descending: Vector3<f64>,
    /// Normal of the lunar orbit plane (direction of the orbital angular momentum)
    pub orbit_normal: Vector3<f64>,
}

/// Rotations taking ecliptic vectors to the equatorial and Earth-fixed frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRotations {
    pub ecliptic_to_equatorial: Matrix3<f64>,
    pub equatorial_to_earth_fixed: Matrix3<f64>,
}

impl FrameRotations {
    pub fn new(obliquity: Degree, sidereal_angle: Degree) -> Self {
        FrameRotations {
            ecliptic_to_equatorial: rotation_x(obliquity),
            equatorial_to_earth_fixed: rotation_z(-sidereal_angle),
        }
    }

    fn body(&self, ecliptic: Vector3<f64>) -> BodyVectors {
        let equatorial = apply(&self.ecliptic_to_equatorial, &ecliptic);
        BodyVectors {
            ecliptic,
            equatorial,
            earth_fixed: apply(&self.equatorial_to_earth_fixed, &equatorial),
        }
    }
}

impl VectorFrames {
    /// Place the Sun and the Moon of `params` at the given distances and rotate them through
    /// the frame chain.
    pub fn build(
        params: &OrbitalParameters,
        sun_distance_km: Kilometer,
        moon_distance_km: Kilometer,
        rotations: &FrameRotations,
    ) -> Self {
        let (moon_lon, moon_lat) = moon_ecliptic_coordinates(params);

        VectorFrames {
            sun: rotations.body(spherical_to_cartesian(
                0.0,
                params.sun_ecliptic_lon,
                sun_distance_km,
            )),
            moon: rotations.body(spherical_to_cartesian(moon_lat, moon_lon, moon_distance_km)),
        }
    }
}

impl NodeVectors {
    pub fn from_node(ascending_node_lon: Degree) -> Self {
        let (sin_node, cos_node) = (ascending_node_lon * DEG).sin_cos();
        let (sin_i, cos_i) = (MOON_INCLINATION_DEG * DEG).sin_cos();

        let ascending = Vector3::new(cos_node, sin_node, 0.0);
        NodeVectors {
            ascending,
            descending: -ascending,
            orbit_normal: Vector3::new(sin_i * sin_node, -sin_i * cos_node, cos_i),
        }
    }
}

/// Ecliptic longitude and latitude of the Moon on its inclined circular orbit.
///
/// The node phase `u` is measured along the orbit from the ascending node:
///
/// ```text
/// β = asin(sin i · sin u)
/// λ = Ω + atan2(cos i · sin u, cos u)
/// ```
pub fn moon_ecliptic_coordinates(params: &OrbitalParameters) -> (Degree, Degree) {
    let u = params.moon_node_phase * DEG;
    let (sin_i, cos_i) = (MOON_INCLINATION_DEG * DEG).sin_cos();

    let lat = safe_asin_deg(sin_i * u.sin());
    let lon = normalize360(params.ascending_node_lon + (cos_i * u.sin()).atan2(u.cos()) * RAD);
    (lon, lat)
}

/// Earth–Moon distance interpolated between perigee (mode 0) and apogee (mode 1).
pub fn moon_distance_km(distance_mode: f64) -> Kilometer {
    let d = MOON_PERIGEE_KM + distance_mode * (MOON_APOGEE_KM - MOON_PERIGEE_KM);
    clamp(d, MOON_PERIGEE_KM, MOON_APOGEE_KM)
}

#[cfg(test)]
mod frames_test {
    use super::*;
    use crate::vector::angle_between_deg;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_moon_on_inclined_orbit() {
        let params = OrbitalParameters::default()
            .with_ascending_node_lon(40.0)
            .with_moon_node_phase(90.0);
        let (lon, lat) = moon_ecliptic_coordinates(&params);
        assert_abs_diff_eq!(lat, MOON_INCLINATION_DEG, epsilon = 1e-12);
        assert_abs_diff_eq!(lon, 130.0, epsilon = 1e-9);

        let at_node = params.with_moon_node_phase(0.0);
        let (lon, lat) = moon_ecliptic_coordinates(&at_node);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(lon, 40.0, epsilon = 1e-12);
    }

    #[test]
    fn test_moon_distance_clamped() {
        assert_eq!(moon_distance_km(0.0), MOON_PERIGEE_KM);
        assert_eq!(moon_distance_km(1.0), MOON_APOGEE_KM);
        assert_eq!(moon_distance_km(-3.0), MOON_PERIGEE_KM);
        assert_eq!(moon_distance_km(7.0), MOON_APOGEE_KM);
    }

    #[test]
    fn test_frame_chain() {
        let params = OrbitalParameters::default().with_sun_ecliptic_lon(90.0);
        let rotations = FrameRotations::new(23.44, 0.0);
        let frames = VectorFrames::build(&params, 1.0e8, 384_400.0, &rotations);

        // at the June solstice the Sun sits at declination +ε
        let sun = frames.sun.equatorial.normalize();
        assert_abs_diff_eq!(sun.z.asin() * RAD, 23.44, epsilon = 1e-9);
        assert_abs_diff_eq!(frames.sun.equatorial.norm(), 1.0e8, epsilon = 1e-3);

        // rotations preserve the angle between the bodies
        let a = angle_between_deg(&frames.sun.ecliptic, &frames.moon.ecliptic);
        let b = angle_between_deg(&frames.sun.earth_fixed, &frames.moon.earth_fixed);
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }

    #[test]
    fn test_sidereal_rotation_moves_longitude() {
        let params = OrbitalParameters::default();
        let frames = VectorFrames::build(&params, 1.0e8, 384_400.0, &FrameRotations::new(0.0, 30.0));
        let lon = frames.sun.earth_fixed.y.atan2(frames.sun.earth_fixed.x) * RAD;
        assert_abs_diff_eq!(lon, -30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_node_vectors() {
        let nodes = NodeVectors::from_node(90.0);
        assert_abs_diff_eq!(nodes.ascending, Vector3::y(), epsilon = 1e-12);
        assert_abs_diff_eq!(nodes.descending, -Vector3::y(), epsilon = 1e-12);
        assert_abs_diff_eq!(nodes.orbit_normal.dot(&nodes.ascending), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            nodes.orbit_normal.z.acos() * RAD,
            MOON_INCLINATION_DEG,
            epsilon = 1e-9
        );

        // the Moon stays in the plane orthogonal to the normal
        let params = OrbitalParameters::default()
            .with_ascending_node_lon(90.0)
            .with_moon_node_phase(57.0);
        let (lon, lat) = moon_ecliptic_coordinates(&params);
        let moon = spherical_to_cartesian(lat, lon, 1.0);
        assert_abs_diff_eq!(moon.dot(&nodes.orbit_normal), 0.0, epsilon = 1e-12);
    }
}
