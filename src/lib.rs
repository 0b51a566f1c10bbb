//! # Umbra: solar-eclipse geometry
//!
//! Computes, for any instant and any simulated-time step, the geometry of a solar eclipse:
//! Sun and Moon ecliptic positions, Earth orientation, shadow footprint on the ground,
//! eclipse class, obscuration depth and the shadow ground track. It also searches for the
//! next eclipse visible from an observer.
//!
//! ## Layers
//!
//! * [`vector`] – angle normalization, rotations, line/sphere intersection, great circles
//! * [`ephemeris`] and [`time`] – low-order solar and lunar series, Julian days, sidereal time
//! * [`parameters`] and [`propagator`] – immutable parameter snapshots advanced at mean rates
//! * [`geometry`] – the eclipse model of one instant
//! * [`ground_track`] – shadow-centre samples around an instant
//! * [`search`] – next locally visible eclipse
//! * [`simulation`] – façade bundling parameters, start instant and [`settings`]
//!
//! The computational core never fails; only date parsing and settings loading return
//! [`umbra_errors::UmbraError`]. Diagnostics go through [`tracing`]; no subscriber is
//! installed by the library.
//!
//! ## Example
//!
//! ```rust, no_run
//! use umbra::{simulation::Simulation, vector::GeoPoint};
//!
//! let sim = Simulation::from_date("2024-04-08T18:17:00 UTC", &GeoPoint::new(25.3, -104.1)).unwrap();
//! let model = sim.model_at(0.0);
//! println!(
//!     "{} depth {:.3}, shadow at {:.2}°, {:.2}°",
//!     model.kind, model.depth, model.shadow_center.lat, model.shadow_center.lon
//! );
//! ```

pub mod constants;
pub mod ephemeris;
pub mod geometry;
pub mod ground_track;
pub mod parameters;
pub mod propagator;
pub mod search;
pub mod settings;
pub mod simulation;
pub mod time;
pub mod umbra_errors;
pub mod vector;
