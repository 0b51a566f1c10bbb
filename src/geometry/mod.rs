//! # Eclipse geometry engine
//!
//! [`derive_model`] turns a [`SimulationState`] into the complete [`EclipseModel`]
//! consumed by the ground-track sampler, the eclipse search and external renderers.
//!
//! ## Pipeline
//!
//! 1. Mean obliquity ε and rotation-corrected sidereal angle θ for the state's date.
//! 2. Sun and Moon ecliptic vectors: the Sun at the ephemeris distance on the ecliptic,
//!    the Moon on its inclined orbit at the perigee–apogee interpolated distance.
//! 3. Rotation into the equatorial (`Rx(+ε)`) and Earth-fixed (`Rz(−θ)`) frames, plus
//!    the node vectors and orbit normal of the lunar orbit.
//! 4. Sub-solar and sub-lunar points.
//! 5. Angular radii `asin(R / d)` and lunar horizontal parallax.
//! 6. True separation and parallax-corrected "best" separation `max(0, true − parallax)`.
//! 7. Obscuration depth from the two-disk overlap ([`overlap_fraction`]).
//! 8. Shadow axis dropped on the Earth ([`ShadowAxis`]).
//! 9. Penumbra and umbra/antumbra radii on the ground ([`ground_radius`]).
//! 10. Classification ([`classify`]).
//! 11. Flat view of the Moon from the Sun ([`SunView`]).
//!
//! Nothing here can fail: inverse trigonometric arguments are clamped and null vectors
//! normalize to a fixed direction.
//!
//! ## See also
//! * [`crate::ground_track`] – samples this model over a time window
//! * [`crate::search`] – drives the propagator and this engine to find the next local eclipse

pub mod frames;
pub mod photometry;
pub mod shadow;
pub mod sun_view;

use serde::Serialize;

use crate::{
    constants::{
        Degree, Kilometer, AU, DEG, EARTH_RADIUS_KM, MOON_RADIUS_KM, SUN_RADIUS_KM,
    },
    ephemeris::{mean_obliquity, sun_position},
    propagator::SimulationState,
    time::julian_centuries,
    vector::{
        angle_between_deg, cartesian_to_lat_lon, destination_point, great_circle_distance_km,
        initial_bearing, safe_asin_deg, GeoPoint,
    },
};

pub use frames::{moon_distance_km, moon_ecliptic_coordinates, NodeVectors, VectorFrames};
pub use photometry::{classify, ground_radius, overlap_fraction, EclipseKind};
pub use shadow::ShadowAxis;
pub use sun_view::SunView;

use frames::FrameRotations;

/// Full geometric description of the Sun–Moon–Earth configuration at one instant.
///
/// Derived on every evaluation and owned by the caller; never stored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EclipseModel {
    pub sun_ecliptic_lon: Degree,
    pub moon_ecliptic_lon: Degree,
    pub moon_ecliptic_lat: Degree,
    pub sun_distance_km: Kilometer,
    /// Clamped to the perigee–apogee range
    pub moon_distance_km: Kilometer,
    pub obliquity: Degree,
    /// Rotation-offset-corrected Greenwich sidereal angle
    pub sidereal_angle: Degree,

    pub sun_angular_radius: Degree,
    pub moon_angular_radius: Degree,
    /// Horizontal parallax of the Moon
    pub moon_parallax: Degree,
    /// Geocentric Sun–Moon separation
    pub true_separation: Degree,
    /// Separation as seen from the most favourable point of the Earth's surface
    pub best_separation: Degree,
    /// Fraction of the solar disk covered, in [0, 1]
    pub depth: f64,

    /// Ground radius of the penumbra, degrees of great-circle arc
    pub penumbra_radius: Degree,
    /// Ground radius of the umbra or antumbra, degrees of great-circle arc
    pub umbra_radius: Degree,
    /// Point under the shadow axis (closest approach when the axis misses)
    pub shadow_center: GeoPoint,
    pub axis_hits_earth: bool,
    pub kind: EclipseKind,

    pub sub_solar: GeoPoint,
    pub sub_lunar: GeoPoint,

    /// Shadow-centre samples around this instant, empty unless sampled
    pub ground_track: Vec<GeoPoint>,

    pub frames: VectorFrames,
    pub nodes: NodeVectors,
    pub sun_view: SunView,
}

/// Position of an observer relative to the shadow footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverView {
    /// Great-circle distance from the observer to the shadow centre
    pub distance_km: Kilometer,
    /// Initial bearing from the observer towards the shadow centre
    pub bearing: Degree,
    pub penumbra_reach_km: Kilometer,
    pub umbra_reach_km: Kilometer,
    pub inside_penumbra: bool,
    pub inside_umbra: bool,
}

/// Derive the eclipse model of a simulation state.
pub fn derive_model(state: &SimulationState) -> EclipseModel {
    let params = &state.params;

    // 1. Orientation of the Earth
    let t = julian_centuries(state.julian_ephemeris_day);
    let obliquity = mean_obliquity(t);
    let sidereal_angle = state.sidereal_angle();

    // 2-3. Position vectors in the three frames
    let sun_distance_km = sun_position(t).distance_au * AU;
    let moon_distance_km = moon_distance_km(params.moon_distance_mode);
    let (moon_ecliptic_lon, moon_ecliptic_lat) = moon_ecliptic_coordinates(params);

    let rotations = FrameRotations::new(obliquity, sidereal_angle);
    let frames = VectorFrames::build(params, sun_distance_km, moon_distance_km, &rotations);
    let nodes = NodeVectors::from_node(params.ascending_node_lon);

    // 4. Sub-points
    let sub_solar = cartesian_to_lat_lon(&frames.sun.earth_fixed);
    let sub_lunar = cartesian_to_lat_lon(&frames.moon.earth_fixed);

    // 5. Apparent sizes
    let sun_angular_radius = safe_asin_deg(SUN_RADIUS_KM / sun_distance_km);
    let moon_angular_radius = safe_asin_deg(MOON_RADIUS_KM / moon_distance_km);
    let moon_parallax = safe_asin_deg(EARTH_RADIUS_KM / moon_distance_km);

    // 6. Separations
    let true_separation = angle_between_deg(&frames.sun.equatorial, &frames.moon.equatorial);
    let best_separation = (true_separation - moon_parallax).max(0.0);

    // 7. Obscuration
    let depth = overlap_fraction(sun_angular_radius, moon_angular_radius, best_separation);

    // 8. Shadow axis
    let axis = ShadowAxis::cast(&frames.sun.earth_fixed, &frames.moon.earth_fixed);

    // 9. Footprint radii
    let (penumbra_radius, umbra_radius) = if depth > 0.0 {
        (
            ground_radius(sun_angular_radius + moon_angular_radius, moon_parallax),
            ground_radius(
                (sun_angular_radius - moon_angular_radius).abs(),
                moon_parallax,
            ),
        )
    } else {
        (0.0, 0.0)
    };

    // 10. Classification
    let kind = classify(
        depth,
        best_separation,
        sun_angular_radius,
        moon_angular_radius,
        axis.hits_earth,
    );

    // 11. View from the Sun
    let sun_view = SunView::project(&frames.sun.equatorial, &frames.moon.equatorial);

    EclipseModel {
        sun_ecliptic_lon: params.sun_ecliptic_lon,
        moon_ecliptic_lon,
        moon_ecliptic_lat,
        sun_distance_km,
        moon_distance_km,
        obliquity,
        sidereal_angle,
        sun_angular_radius,
        moon_angular_radius,
        moon_parallax,
        true_separation,
        best_separation,
        depth,
        penumbra_radius,
        umbra_radius,
        shadow_center: axis.center,
        axis_hits_earth: axis.hits_earth,
        kind,
        sub_solar,
        sub_lunar,
        ground_track: Vec::new(),
        frames,
        nodes,
        sun_view,
    }
}

impl EclipseModel {
    /// Copy of the model carrying the given ground track.
    pub fn with_ground_track(self, ground_track: Vec<GeoPoint>) -> Self {
        EclipseModel {
            ground_track,
            ..self
        }
    }

    pub fn is_eclipse(&self) -> bool {
        self.kind != EclipseKind::None
    }

    /// Penumbra radius measured on the Earth's surface.
    pub fn penumbra_radius_km(&self) -> Kilometer {
        self.penumbra_radius * DEG * EARTH_RADIUS_KM
    }

    /// Umbra (or antumbra) radius measured on the Earth's surface.
    pub fn umbra_radius_km(&self) -> Kilometer {
        self.umbra_radius * DEG * EARTH_RADIUS_KM
    }

    /// Where `observer` stands relative to the shadow footprint.
    ///
    /// `slack_km` widens both footprints to absorb the coarseness of the spherical model.
    pub fn observer_view(&self, observer: &GeoPoint, slack_km: Kilometer) -> ObserverView {
        let distance_km = great_circle_distance_km(observer, &self.shadow_center);
        let penumbra_reach_km = self.penumbra_radius_km() + slack_km;
        let umbra_reach_km = self.umbra_radius_km() + slack_km;
        let has_shadow = self.depth > 0.0;

        ObserverView {
            distance_km,
            bearing: initial_bearing(observer, &self.shadow_center),
            penumbra_reach_km,
            umbra_reach_km,
            inside_penumbra: has_shadow && distance_km <= penumbra_reach_km,
            inside_umbra: has_shadow && self.axis_hits_earth && distance_km <= umbra_reach_km,
        }
    }

    /// `samples` points outlining the penumbra on the ground, empty without eclipse.
    pub fn penumbra_outline(&self, samples: usize) -> Vec<GeoPoint> {
        footprint_outline(&self.shadow_center, self.penumbra_radius, samples)
    }

    /// `samples` points outlining the umbra on the ground, empty without eclipse.
    pub fn umbra_outline(&self, samples: usize) -> Vec<GeoPoint> {
        footprint_outline(&self.shadow_center, self.umbra_radius, samples)
    }
}

fn footprint_outline(center: &GeoPoint, radius: Degree, samples: usize) -> Vec<GeoPoint> {
    if radius <= 0.0 || samples == 0 {
        return Vec::new();
    }
    (0..samples)
        .map(|k| {
            let bearing = 360.0 * k as f64 / samples as f64;
            destination_point(center.lat, center.lon, bearing, radius)
        })
        .collect()
}
