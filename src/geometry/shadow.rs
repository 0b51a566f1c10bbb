use nalgebra::Vector3;

use crate::{
    constants::EARTH_RADIUS_KM,
    vector::{
        cartesian_to_lat_lon, closest_point_to_origin, intersect_line_sphere,
        normalize_or_default, GeoPoint,
    },
};

/// Axis of the lunar shadow: the line leaving the Moon in the anti-solar direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowAxis {
    /// Unit vector pointing away from the Sun along the axis
    pub direction: Vector3<f64>,
    /// Point of the Earth's surface under the axis (Earth-fixed, km)
    pub surface_point: Vector3<f64>,
    /// Geographic position of `surface_point`
    pub center: GeoPoint,
    /// `false` when the axis misses the Earth and `surface_point` is the closest approach
    pub hits_earth: bool,
}

impl ShadowAxis {
    /// Cast the shadow axis from the Earth-fixed Sun and Moon positions.
    ///
    /// When the axis misses the Earth, the reported point is the surface point closest to
    /// the axis: the projection of the Earth's centre on the line, pushed out to the surface.
    pub fn cast(sun: &Vector3<f64>, moon: &Vector3<f64>) -> Self {
        let direction = normalize_or_default(&(moon - sun));

        let (surface_point, hits_earth) =
            match intersect_line_sphere(moon, &direction, EARTH_RADIUS_KM) {
                Some(hit) => (hit, true),
                None => {
                    let closest = closest_point_to_origin(moon, &direction);
                    (normalize_or_default(&closest) * EARTH_RADIUS_KM, false)
                }
            };

        ShadowAxis {
            direction,
            surface_point,
            center: cartesian_to_lat_lon(&surface_point),
            hits_earth,
        }
    }
}
