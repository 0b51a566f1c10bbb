//! # Vector and spherical kernel
//!
//! Small, stateless helpers shared by the geometry engine, the ground-track sampler
//! and the eclipse search. Cartesian algebra (addition, scaling, dot and cross products,
//! norms) comes straight from [`nalgebra::Vector3`]; this module adds the pieces the
//! engine needs on top of it:
//!
//! - angle wrapping ([`normalize360`], [`normalize180`]) and clamped inverse trigonometry,
//! - elementary axis rotations ([`rotation_x`], [`rotation_z`]),
//! - conversions between geographic coordinates and Cartesian vectors,
//! - line/sphere intersection used to drop the shadow axis onto the Earth,
//! - great-circle navigation (destination point, bearing, haversine distance).
//!
//! Every angle crossing this API is expressed in **degrees**. Radians only live inside
//! function bodies, converted through [`DEG`] and [`RAD`].
//!
//! None of these functions can fail: degenerate inputs map to documented fallback values.

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Kilometer, DEG, EARTH_RADIUS_KM, EPS_NORM, RAD};

/// A geographic location on the spherical Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude, east positive, in (-180, 180]
    pub lon: Degree,
    /// Latitude, north positive, in [-90, 90]
    pub lat: Degree,
}

impl GeoPoint {
    pub fn new(lat: Degree, lon: Degree) -> Self {
        GeoPoint {
            lon: normalize180(lon),
            lat: clamp(lat, -90.0, 90.0),
        }
    }
}

/// Clamp `x` into `[lo, hi]`. NaN inputs collapse to `lo`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        return lo;
    }
    x.max(lo).min(hi)
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize360(angle: Degree) -> Degree {
    let a = angle.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Wrap an angle into `(-180, 180]`.
pub fn normalize180(angle: Degree) -> Degree {
    let a = normalize360(angle);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// `asin` in degrees with its argument clamped to `[-1, 1]`.
pub fn safe_asin_deg(x: f64) -> Degree {
    clamp(x, -1.0, 1.0).asin() * RAD
}

/// `acos` in degrees with its argument clamped to `[-1, 1]`.
pub fn safe_acos_deg(x: f64) -> Degree {
    clamp(x, -1.0, 1.0).acos() * RAD
}

/// Unit vector along `v`, or the `+X` axis when `|v|` is below `1e-12`.
pub fn normalize_or_default(v: &Vector3<f64>) -> Vector3<f64> {
    let n = v.norm();
    if n < EPS_NORM {
        Vector3::x()
    } else {
        v / n
    }
}

/// Angle between two vectors in degrees, `0` when either is null.
pub fn angle_between_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> Degree {
    let na = a.norm();
    let nb = b.norm();
    if na < EPS_NORM || nb < EPS_NORM {
        return 0.0;
    }
    safe_acos_deg(a.dot(b) / (na * nb))
}

/// Active rotation of `angle` degrees about the X axis.
///
/// Rotating an ecliptic vector by `+ε` (the obliquity) expresses it in the
/// equatorial frame.
pub fn rotation_x(angle: Degree) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle * DEG).into()
}

/// Active rotation of `angle` degrees about the Z axis.
///
/// Rotating an equatorial vector by `-θ` (the sidereal angle) expresses it in the
/// Earth-fixed frame.
pub fn rotation_z(angle: Degree) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle * DEG).into()
}

/// Apply a 3×3 matrix to a vector.
pub fn apply(m: &Matrix3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    m * v
}

/// Cartesian vector of norm `r` pointing at latitude/longitude `(lat, lon)`.
pub fn spherical_to_cartesian(lat: Degree, lon: Degree, r: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = (lat * DEG).sin_cos();
    let (sin_lon, cos_lon) = (lon * DEG).sin_cos();
    Vector3::new(r * cos_lat * cos_lon, r * cos_lat * sin_lon, r * sin_lat)
}

/// Latitude/longitude of the direction of `v`.
///
/// A null vector maps to the fallback direction `(0°, 0°)`.
pub fn cartesian_to_lat_lon(v: &Vector3<f64>) -> GeoPoint {
    let u = normalize_or_default(v);
    GeoPoint {
        lat: safe_asin_deg(u.z),
        lon: normalize180(u.y.atan2(u.x) * RAD),
    }
}

/// Nearest intersection, with a strictly positive line parameter, of the ray
/// `origin + s·dir` and the sphere of radius `radius` centred on the origin.
///
/// Returns `None` when the discriminant is negative (the line misses the sphere)
/// or when both roots are non-positive (the sphere lies behind the origin).
pub fn intersect_line_sphere(
    origin: &Vector3<f64>,
    dir: &Vector3<f64>,
    radius: f64,
) -> Option<Vector3<f64>> {
    let d = normalize_or_default(dir);
    let b = origin.dot(&d);
    let c = origin.norm_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let sq = disc.sqrt();
    let (s1, s2) = (-b - sq, -b + sq);
    let s = if s1 > 0.0 {
        s1
    } else if s2 > 0.0 {
        s2
    } else {
        return None;
    };

    Some(origin + d * s)
}

/// Point of the line `origin + s·dir` closest to the coordinate origin.
pub fn closest_point_to_origin(origin: &Vector3<f64>, dir: &Vector3<f64>) -> Vector3<f64> {
    let d = normalize_or_default(dir);
    origin - d * origin.dot(&d)
}

/// Point reached by travelling `distance` degrees of great-circle arc from
/// `(lat, lon)` along the initial `bearing` (degrees clockwise from north).
pub fn destination_point(lat: Degree, lon: Degree, bearing: Degree, distance: Degree) -> GeoPoint {
    let phi1 = lat * DEG;
    let lambda1 = lon * DEG;
    let theta = bearing * DEG;
    let delta = distance * DEG;

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = clamp(sin_phi2, -1.0, 1.0).asin();
    let y = theta.sin() * delta.sin() * phi1.cos();
    let x = delta.cos() - phi1.sin() * phi2.sin();
    let lambda2 = lambda1 + y.atan2(x);

    GeoPoint {
        lat: phi2 * RAD,
        lon: normalize180(lambda2 * RAD),
    }
}

/// Initial great-circle bearing from `from` to `to`, degrees clockwise from north in `[0, 360)`.
pub fn initial_bearing(from: &GeoPoint, to: &GeoPoint) -> Degree {
    let phi1 = from.lat * DEG;
    let phi2 = to.lat * DEG;
    let dlambda = (to.lon - from.lon) * DEG;

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize360(y.atan2(x) * RAD)
}

/// Great-circle distance between two points, in degrees of arc (haversine).
pub fn great_circle_distance_deg(a: &GeoPoint, b: &GeoPoint) -> Degree {
    let dphi = (b.lat - a.lat) * DEG;
    let dlambda = (b.lon - a.lon) * DEG;

    let h = (dphi / 2.0).sin().powi(2)
        + (a.lat * DEG).cos() * (b.lat * DEG).cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * clamp(h, 0.0, 1.0).sqrt().asin() * RAD
}

/// Great-circle distance between two points on the mean Earth sphere, in kilometers.
pub fn great_circle_distance_km(a: &GeoPoint, b: &GeoPoint) -> Kilometer {
    great_circle_distance_deg(a, b) * DEG * EARTH_RADIUS_KM
}

#[cfg(test)]
mod vector_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_angles() {
        assert_eq!(normalize360(-30.0), 330.0);
        assert_eq!(normalize360(720.0), 0.0);
        assert_eq!(normalize360(-1e-18), 0.0);
        assert_eq!(normalize180(180.0), 180.0);
        assert_eq!(normalize180(-180.0), 180.0);
        assert_eq!(normalize180(190.0), -170.0);
        assert_eq!(normalize180(-190.0), 170.0);
    }

    #[test]
    fn test_clamp_and_safe_trig() {
        assert_eq!(clamp(2.0, -1.0, 1.0), 1.0);
        assert_eq!(clamp(f64::NAN, -1.0, 1.0), -1.0);
        assert_eq!(safe_asin_deg(1.000_000_1), 90.0);
        assert_eq!(safe_acos_deg(-1.000_000_1), 180.0);
    }

    #[test]
    fn test_normalize_null_vector() {
        let v = normalize_or_default(&Vector3::new(1e-13, 0.0, 0.0));
        assert_eq!(v, Vector3::new(1.0, 0.0, 0.0));

        let v = normalize_or_default(&Vector3::new(0.0, 3.0, 4.0));
        assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_rotations() {
        let r = rotation_z(90.0);
        let v = apply(&r, &Vector3::x());
        assert_abs_diff_eq!(v, Vector3::y(), epsilon = 1e-12);

        let r = rotation_x(90.0);
        let v = apply(&r, &Vector3::y());
        assert_abs_diff_eq!(v, Vector3::z(), epsilon = 1e-12);

        let back = rotation_x(-23.4) * rotation_x(23.4);
        assert_abs_diff_eq!(back, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_round_trip() {
        let v = spherical_to_cartesian(35.0, -120.0, 6371.0);
        assert_abs_diff_eq!(v.norm(), 6371.0, epsilon = 1e-9);
        let p = cartesian_to_lat_lon(&v);
        assert_abs_diff_eq!(p.lat, 35.0, epsilon = 1e-10);
        assert_abs_diff_eq!(p.lon, -120.0, epsilon = 1e-10);
    }

    #[test]
    fn test_line_sphere_hit() {
        let origin = Vector3::new(10.0, 0.0, 0.0);
        let dir = Vector3::new(-1.0, 0.0, 0.0);
        let hit = intersect_line_sphere(&origin, &dir, 1.0).unwrap();
        assert_abs_diff_eq!(hit, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_line_sphere_from_inside() {
        let origin = Vector3::zeros();
        let hit = intersect_line_sphere(&origin, &Vector3::z(), 2.0).unwrap();
        assert_abs_diff_eq!(hit, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_line_sphere_miss() {
        let origin = Vector3::new(10.0, 2.0, 0.0);
        let dir = Vector3::new(-1.0, 0.0, 0.0);
        assert!(intersect_line_sphere(&origin, &dir, 1.0).is_none());

        // sphere behind the ray
        let origin = Vector3::new(10.0, 0.0, 0.0);
        assert!(intersect_line_sphere(&origin, &Vector3::x(), 1.0).is_none());

        let closest = closest_point_to_origin(&Vector3::new(10.0, 2.0, 0.0), &dir);
        assert_abs_diff_eq!(closest, Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_great_circle() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 90.0);
        assert_abs_diff_eq!(great_circle_distance_deg(&a, &b), 90.0, epsilon = 1e-10);
        assert_abs_diff_eq!(initial_bearing(&a, &b), 90.0, epsilon = 1e-10);

        let pole = GeoPoint::new(90.0, 0.0);
        assert_abs_diff_eq!(initial_bearing(&a, &pole), 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(
            great_circle_distance_km(&a, &pole),
            std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_KM,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_destination_point() {
        let p = destination_point(0.0, 0.0, 90.0, 45.0);
        assert_abs_diff_eq!(p.lat, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(p.lon, 45.0, epsilon = 1e-10);

        let start = GeoPoint::new(48.85, 2.35);
        let p = destination_point(start.lat, start.lon, 137.0, 12.5);
        assert_abs_diff_eq!(great_circle_distance_deg(&start, &p), 12.5, epsilon = 1e-9);
        assert_abs_diff_eq!(initial_bearing(&start, &p), 137.0, epsilon = 1e-9);
    }
}
