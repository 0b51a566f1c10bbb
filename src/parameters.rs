//! # Orbital parameter snapshots
//!
//! [`OrbitalParameters`] is the immutable input of the whole engine: the handful of
//! angles that fully describe the Sun, the Moon, the Earth's orientation and the observer
//! at the start instant of a simulation.
//!
//! Snapshots are never mutated in place. Every edit goes through one of the `with_*`
//! builders, which return a **new** snapshot already normalized to the canonical ranges:
//!
//! | field | range |
//! |---|---|
//! | `ascending_node_lon`, `sun_ecliptic_lon`, `moon_node_phase`, `moon_anomaly`, `earth_rotation` | [0, 360) |
//! | `observer_lon`, `observer_tilt` | (-180, 180] |
//! | `observer_lat` | [-90, 90] |
//! | `moon_distance_mode` | [0, 1] |
//!
//! A snapshot is built either from manual values ([`OrbitalParameters::new`]) or from the
//! low-order ephemerides at a real date ([`OrbitalParameters::from_epoch`]).

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, DEG, MOON_APOGEE_KM, MOON_INCLINATION_DEG, MOON_PERIGEE_KM, RAD},
    ephemeris::{moon_position, sun_position},
    time::{julian_centuries, julian_ephemeris_day},
    vector::{clamp, normalize180, normalize360, safe_asin_deg, GeoPoint},
};

/// Immutable snapshot of the parameters driving the eclipse geometry. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalParameters {
    /// Ecliptic longitude of the lunar ascending node
    pub ascending_node_lon: Degree,
    /// Ecliptic longitude of the Sun
    pub sun_ecliptic_lon: Degree,
    /// Argument of latitude of the Moon: angle travelled along the orbit since the ascending node
    pub moon_node_phase: Degree,
    /// 0 at perigee, 1 at apogee
    pub moon_distance_mode: f64,
    /// Mean anomaly of the Moon
    pub moon_anomaly: Degree,
    pub observer_lat: Degree,
    pub observer_lon: Degree,
    /// Viewing tilt of the observer frame, consumed by renderers
    pub observer_tilt: Degree,
    /// Rotation of the Earth added on top of Greenwich sidereal time
    pub earth_rotation: Degree,
}

impl Default for OrbitalParameters {
    fn default() -> Self {
        OrbitalParameters {
            ascending_node_lon: 0.0,
            sun_ecliptic_lon: 0.0,
            moon_node_phase: 0.0,
            moon_distance_mode: 0.5,
            moon_anomaly: 0.0,
            observer_lat: 0.0,
            observer_lon: 0.0,
            observer_tilt: 0.0,
            earth_rotation: 0.0,
        }
    }
}

impl OrbitalParameters {
    /// Build a normalized snapshot from raw values.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ascending_node_lon: Degree,
        sun_ecliptic_lon: Degree,
        moon_node_phase: Degree,
        moon_distance_mode: f64,
        moon_anomaly: Degree,
        observer_lat: Degree,
        observer_lon: Degree,
        observer_tilt: Degree,
        earth_rotation: Degree,
    ) -> Self {
        OrbitalParameters {
            ascending_node_lon,
            sun_ecliptic_lon,
            moon_node_phase,
            moon_distance_mode,
            moon_anomaly,
            observer_lat,
            observer_lon,
            observer_tilt,
            earth_rotation,
        }
        .normalized()
    }

    /// Seed a snapshot from the ephemerides at `epoch` for an observer at `observer`.
    ///
    /// The Sun longitude comes from the solar series. The node longitude and the node phase
    /// are chosen so that the inclined circular orbit used by the geometry engine passes
    /// exactly through the ephemeris Moon:
    ///
    /// ```text
    /// sin β = sin i · sin u
    /// λ − Ω = atan2(cos i · sin u, cos u)
    /// ```
    ///
    /// Of the two solutions in `u`, the one closest to the phase measured from the mean node
    /// is kept. When `|β|` exceeds the mean inclination the orbit is taken through its
    /// highest point.
    pub fn from_epoch(epoch: &Epoch, observer: &GeoPoint) -> Self {
        let t = julian_centuries(julian_ephemeris_day(epoch));
        let sun = sun_position(t);
        let moon = moon_position(t);

        let sin_i = (MOON_INCLINATION_DEG * DEG).sin();
        let cos_i = (MOON_INCLINATION_DEG * DEG).cos();

        let u_first = safe_asin_deg((moon.latitude * DEG).sin() / sin_i);
        let u_second = 180.0 - u_first;
        let u_mean = moon.longitude - moon.ascending_node;
        let u = if normalize180(u_first - u_mean).abs() <= normalize180(u_second - u_mean).abs() {
            u_first
        } else {
            u_second
        };

        let u_rad = u * DEG;
        let along_orbit = (cos_i * u_rad.sin()).atan2(u_rad.cos()) * RAD;
        let node = moon.longitude - along_orbit;

        let distance_mode =
            (moon.distance_km - MOON_PERIGEE_KM) / (MOON_APOGEE_KM - MOON_PERIGEE_KM);

        OrbitalParameters {
            ascending_node_lon: node,
            sun_ecliptic_lon: sun.longitude,
            moon_node_phase: u,
            moon_distance_mode: distance_mode,
            moon_anomaly: moon.mean_anomaly,
            observer_lat: observer.lat,
            observer_lon: observer.lon,
            observer_tilt: 0.0,
            earth_rotation: 0.0,
        }
        .normalized()
    }

    /// Copy of `self` with every field wrapped or clamped into its canonical range.
    pub fn normalized(self) -> Self {
        OrbitalParameters {
            ascending_node_lon: normalize360(self.ascending_node_lon),
            sun_ecliptic_lon: normalize360(self.sun_ecliptic_lon),
            moon_node_phase: normalize360(self.moon_node_phase),
            moon_distance_mode: clamp(self.moon_distance_mode, 0.0, 1.0),
            moon_anomaly: normalize360(self.moon_anomaly),
            observer_lat: clamp(self.observer_lat, -90.0, 90.0),
            observer_lon: normalize180(self.observer_lon),
            observer_tilt: normalize180(self.observer_tilt),
            earth_rotation: normalize360(self.earth_rotation),
        }
    }

    pub fn observer(&self) -> GeoPoint {
        GeoPoint::new(self.observer_lat, self.observer_lon)
    }

    pub fn with_ascending_node_lon(self, value: Degree) -> Self {
        OrbitalParameters {
            ascending_node_lon: value,
            ..self
        }
        .normalized()
    }

    pub fn with_sun_ecliptic_lon(self, value: Degree) -> Self {
        OrbitalParameters {
            sun_ecliptic_lon: value,
            ..self
        }
        .normalized()
    }

    pub fn with_moon_node_phase(self, value: Degree) -> Self {
        OrbitalParameters {
            moon_node_phase: value,
            ..self
        }
        .normalized()
    }

    pub fn with_moon_distance_mode(self, value: f64) -> Self {
        OrbitalParameters {
            moon_distance_mode: value,
            ..self
        }
        .normalized()
    }

    pub fn with_moon_anomaly(self, value: Degree) -> Self {
        OrbitalParameters {
            moon_anomaly: value,
            ..self
        }
        .normalized()
    }

    pub fn with_observer(self, lat: Degree, lon: Degree) -> Self {
        OrbitalParameters {
            observer_lat: lat,
            observer_lon: lon,
            ..self
        }
        .normalized()
    }

    pub fn with_observer_tilt(self, value: Degree) -> Self {
        OrbitalParameters {
            observer_tilt: value,
            ..self
        }
        .normalized()
    }

    pub fn with_earth_rotation(self, value: Degree) -> Self {
        OrbitalParameters {
            earth_rotation: value,
            ..self
        }
        .normalized()
    }
}
