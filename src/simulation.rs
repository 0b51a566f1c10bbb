//! # Simulation: parameters, start instant and engine settings
//!
//! [`Simulation`] ties together the three inputs every evaluation needs:
//!
//! 1. **Base parameters** ([`OrbitalParameters`]) describing the configuration at the start
//!    instant, observer included.
//! 2. **Start instant** ([`Epoch`]) that simulated hours are counted from.
//! 3. **Settings** ([`EngineSettings`]) for the ground-track window and the search.
//!
//! The façade stores no derived state. Each call propagates the base snapshot to the
//! requested simulated hours and derives a fresh model, so a `Simulation` can be shared
//! freely between threads and queried at any instant in any order.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use umbra::{simulation::Simulation, vector::GeoPoint};
//!
//! let dallas = GeoPoint::new(32.78, -96.80);
//! let sim = Simulation::from_date("2024-04-05T12:00:00 UTC", &dallas).unwrap();
//!
//! if let Some(hours) = sim.next_local_eclipse(0.0) {
//!     let model = sim.model_at(hours);
//!     println!("{} at {}", model.kind, sim.state_at(hours).date);
//! }
//! ```
//!
//! ## See also
//! ------------
//! * [`propagate`] – parameter propagation
//! * [`derive_model`] – the geometry engine
//! * [`GroundTrack`] – shadow-centre sampling
//! * [`search_with_abort`] – next-local-eclipse search

use hifitime::Epoch;
use tracing::debug;

use crate::{
    constants::Hours,
    geometry::{derive_model, EclipseModel},
    ground_track::GroundTrack,
    parameters::OrbitalParameters,
    propagator::{propagate, SimulationState},
    search::{search_with_abort, SearchOutcome},
    settings::EngineSettings,
    time::parse_epoch,
    umbra_errors::UmbraError,
    vector::GeoPoint,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    base: OrbitalParameters,
    start: Epoch,
    settings: EngineSettings,
}

impl Simulation {
    /// Simulation of `base` starting at `start`, with default settings.
    pub fn new(base: OrbitalParameters, start: Epoch) -> Self {
        Simulation {
            base: base.normalized(),
            start,
            settings: EngineSettings::default(),
        }
    }

    /// Seed the base parameters from the ephemerides at `start`.
    pub fn from_epoch(start: Epoch, observer: &GeoPoint) -> Self {
        let base = OrbitalParameters::from_epoch(&start, observer);
        debug!(
            %start,
            sun = base.sun_ecliptic_lon,
            node = base.ascending_node_lon,
            phase = base.moon_node_phase,
            "seeded parameters from ephemerides"
        );
        Simulation::new(base, start)
    }

    /// Same as [`Simulation::from_epoch`] for a date string, e.g. `2024-04-08T18:17:00 UTC`.
    pub fn from_date(date: &str, observer: &GeoPoint) -> Result<Self, UmbraError> {
        Ok(Simulation::from_epoch(parse_epoch(date)?, observer))
    }

    /// Replace the settings after validating them.
    pub fn with_settings(self, settings: EngineSettings) -> Result<Self, UmbraError> {
        settings.validate()?;
        Ok(Simulation { settings, ..self })
    }

    /// Copy of the simulation with other base parameters.
    pub fn with_base(self, base: OrbitalParameters) -> Self {
        Simulation {
            base: base.normalized(),
            ..self
        }
    }

    pub fn base(&self) -> &OrbitalParameters {
        &self.base
    }

    pub fn start(&self) -> Epoch {
        self.start
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn state_at(&self, sim_hours: Hours) -> SimulationState {
        propagate(&self.base, sim_hours, &self.start)
    }

    /// Model at `sim_hours` without the ground track.
    pub fn snapshot_at(&self, sim_hours: Hours) -> EclipseModel {
        derive_model(&self.state_at(sim_hours))
    }

    /// Model at `sim_hours` with the ground track of the configured window attached.
    pub fn model_at(&self, sim_hours: Hours) -> EclipseModel {
        let track = self.ground_track(sim_hours).points();
        self.snapshot_at(sim_hours).with_ground_track(track)
    }

    /// Lazy ground track centred on `sim_hours`.
    pub fn ground_track(&self, sim_hours: Hours) -> GroundTrack {
        GroundTrack::new(self.base, self.start, sim_hours, self.settings.track)
    }

    /// Simulated hours of the next eclipse visible from the observer, after `current_hours`.
    pub fn next_local_eclipse(&self, current_hours: Hours) -> Option<Hours> {
        self.search_with_abort(current_hours, || false).found()
    }

    pub fn search_with_abort<F>(&self, current_hours: Hours, abort: F) -> SearchOutcome
    where
        F: Fn() -> bool,
    {
        search_with_abort(
            &self.base,
            current_hours,
            &self.start,
            &self.settings.search,
            abort,
        )
    }
}

#[cfg(test)]
mod simulation_test {
    use super::*;
    use crate::{geometry::EclipseKind, settings::TrackSettings};

    fn start() -> Epoch {
        Epoch::from_gregorian_utc(2031, 3, 21, 12, 0, 0, 0)
    }

    fn central() -> Simulation {
        Simulation::new(
            OrbitalParameters::default().with_moon_distance_mode(0.0),
            start(),
        )
    }

    #[test]
    fn test_model_carries_ground_track() {
        let sim = central();
        let model = sim.model_at(0.0);
        assert_eq!(model.kind, EclipseKind::Total);
        assert!(!model.ground_track.is_empty());
        assert_eq!(model.ground_track, sim.ground_track(0.0).points());
        assert!(sim.snapshot_at(0.0).ground_track.is_empty());
    }

    #[test]
    fn test_settings_are_validated() {
        let invalid = EngineSettings {
            track: TrackSettings {
                step_hours: -1.0,
                ..TrackSettings::default()
            },
            ..EngineSettings::default()
        };
        assert!(matches!(
            central().with_settings(invalid),
            Err(UmbraError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_from_date() {
        let observer = GeoPoint::new(10.0, 20.0);
        let sim = Simulation::from_date("2024-04-08T18:17:00 UTC", &observer).unwrap();
        assert_eq!(sim.base().observer_lat, 10.0);
        assert_eq!(sim.base().observer_lon, 20.0);
        assert_eq!(sim.state_at(0.0).date, sim.start());

        assert!(matches!(
            Simulation::from_date("not a date", &observer),
            Err(UmbraError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_search_through_facade() {
        let sim = central();
        let center = sim.snapshot_at(0.0).shadow_center;
        let base = sim.base().with_observer(center.lat, center.lon);
        let sim = sim.with_base(base);
        let hours = sim.next_local_eclipse(-48.0).unwrap();
        assert!(hours.abs() < 0.2);
        assert_eq!(sim.search_with_abort(-48.0, || true), SearchOutcome::Aborted);
    }
}
