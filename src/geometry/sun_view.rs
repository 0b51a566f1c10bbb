use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    constants::{Kilometer, EARTH_RADIUS_KM, EPS_NORM},
    vector::normalize_or_default,
};

/// The Moon as seen from the Sun, projected on the plane through the Earth's centre
/// orthogonal to the Sun–Earth line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunView {
    /// Horizontal offset of the Moon from the Earth's centre
    pub x_km: Kilometer,
    /// Vertical offset of the Moon from the Earth's centre (towards celestial north)
    pub y_km: Kilometer,
    pub x_earth_radii: f64,
    pub y_earth_radii: f64,
    /// `true` when the Moon is on the Sun's side of the Earth
    pub moon_in_front: bool,
}

impl SunView {
    /// Project from geocentric equatorial Sun and Moon vectors.
    ///
    /// The view basis is built around the Sun→Earth direction `w`, with the celestial pole as
    /// up hint (the X axis when `w` is polar): `right = w × up`, `up' = right × w`.
    pub fn project(sun: &Vector3<f64>, moon: &Vector3<f64>) -> Self {
        let w = normalize_or_default(&(-sun));

        let hint = if w.cross(&Vector3::z()).norm() < EPS_NORM.sqrt() {
            Vector3::x()
        } else {
            Vector3::z()
        };
        let right = normalize_or_default(&w.cross(&hint));
        let up = right.cross(&w);

        let x_km = moon.dot(&right);
        let y_km = moon.dot(&up);

        SunView {
            x_km,
            y_km,
            x_earth_radii: x_km / EARTH_RADIUS_KM,
            y_earth_radii: y_km / EARTH_RADIUS_KM,
            moon_in_front: moon.dot(&w) < 0.0,
        }
    }

    /// Distance of the projected Moon from the Earth's centre, in Earth radii.
    pub fn offset_earth_radii(&self) -> f64 {
        self.x_earth_radii.hypot(self.y_earth_radii)
    }
}

#[cfg(test)]
mod sun_view_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_aligned_moon_is_centred() {
        let sun = Vector3::new(1.5e8, 0.0, 0.0);
        let moon = Vector3::new(384_400.0, 0.0, 0.0);
        let view = SunView::project(&sun, &moon);
        assert_abs_diff_eq!(view.offset_earth_radii(), 0.0, epsilon = 1e-12);
        assert!(view.moon_in_front);
    }

    #[test]
    fn test_offsets() {
        let sun = Vector3::new(1.5e8, 0.0, 0.0);
        let moon = Vector3::new(384_400.0, 0.0, EARTH_RADIUS_KM);
        let view = SunView::project(&sun, &moon);
        assert_abs_diff_eq!(view.x_earth_radii, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(view.y_earth_radii, 1.0, epsilon = 1e-12);

        let behind = Vector3::new(-384_400.0, 2.0 * EARTH_RADIUS_KM, 0.0);
        let view = SunView::project(&sun, &behind);
        assert!(!view.moon_in_front);
        assert_abs_diff_eq!(view.offset_earth_radii(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_polar_sun() {
        let sun = Vector3::new(0.0, 0.0, 1.5e8);
        let moon = Vector3::new(0.0, EARTH_RADIUS_KM, 384_400.0);
        let view = SunView::project(&sun, &moon);
        assert_abs_diff_eq!(view.offset_earth_radii(), 1.0, epsilon = 1e-12);
    }
}
