//! # Ground-track sampling
//!
//! The ground track is the sequence of shadow-centre positions around an instant. Each
//! offset of the window is re-propagated from the base parameters and re-derived through
//! the geometry engine; only samples where the Sun is still noticeably covered are kept.
//!
//! [`GroundTrack`] is a lazy iterator, so a caller can stop early, and it is cheap to clone
//! to walk the same window again.
//!
//! ```rust
//! use hifitime::Epoch;
//! use umbra::{ground_track::GroundTrack, parameters::OrbitalParameters, settings::TrackSettings};
//!
//! let params = OrbitalParameters::default().with_moon_distance_mode(0.0);
//! let start = Epoch::from_gregorian_utc(2031, 3, 21, 12, 0, 0, 0);
//!
//! let track = GroundTrack::new(params, start, 0.0, TrackSettings::default());
//! for sample in track {
//!     println!("{:+.1} h  {:.2}, {:.2}  depth {:.3}", sample.offset_hours, sample.point.lat, sample.point.lon, sample.depth);
//! }
//! ```

use hifitime::Epoch;
use serde::Serialize;

use crate::{
    constants::Hours,
    geometry::derive_model,
    parameters::OrbitalParameters,
    propagator::propagate,
    settings::{steps_per_side, TrackSettings},
    vector::GeoPoint,
};

/// Shadow-centre position at one offset of the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackSample {
    /// Offset from the centre of the window
    pub offset_hours: Hours,
    /// Simulated hours since the start instant
    pub sim_hours: Hours,
    pub point: GeoPoint,
    pub depth: f64,
}

/// Lazy iterator over the shadow-centre samples of a time window.
#[derive(Debug, Clone)]
pub struct GroundTrack {
    base: OrbitalParameters,
    start: Epoch,
    center_hours: Hours,
    step_hours: Hours,
    min_depth: f64,
    next: i64,
    last: i64,
}

impl GroundTrack {
    /// Sample the window `center_hours ± settings.half_window_hours`.
    ///
    /// Arguments
    /// -----------------
    /// * `base`: parameter snapshot at the start instant
    /// * `start`: the instant `sim_hours == 0` refers to
    /// * `center_hours`: simulated hours at the centre of the window
    /// * `settings`: window half-width, step and depth threshold
    pub fn new(
        base: OrbitalParameters,
        start: Epoch,
        center_hours: Hours,
        settings: TrackSettings,
    ) -> Self {
        let n = steps_per_side(settings.half_window_hours, settings.step_hours);
        GroundTrack {
            base,
            start,
            center_hours,
            step_hours: settings.step_hours,
            min_depth: settings.min_depth,
            next: -n,
            last: n,
        }
    }

    /// Collect the shadow-centre points, in time order.
    pub fn points(self) -> Vec<GeoPoint> {
        self.map(|sample| sample.point).collect()
    }

    fn sample(&self, k: i64) -> Option<TrackSample> {
        let offset_hours = k as f64 * self.step_hours;
        let sim_hours = self.center_hours + offset_hours;
        let model = derive_model(&propagate(&self.base, sim_hours, &self.start));

        (model.depth > self.min_depth).then_some(TrackSample {
            offset_hours,
            sim_hours,
            point: model.shadow_center,
            depth: model.depth,
        })
    }
}

impl Iterator for GroundTrack {
    type Item = TrackSample;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next <= self.last {
            let k = self.next;
            self.next += 1;
            if let Some(sample) = self.sample(k) {
                return Some(sample);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .last
            .saturating_sub(self.next)
            .saturating_add(1)
            .max(0);
        (0, usize::try_from(remaining).ok())
    }
}

#[cfg(test)]
mod ground_track_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn start() -> Epoch {
        Epoch::from_gregorian_utc(2031, 3, 21, 12, 0, 0, 0)
    }

    fn central() -> OrbitalParameters {
        OrbitalParameters::default().with_moon_distance_mode(0.0)
    }

    #[test]
    fn test_samples_stay_above_threshold() {
        let settings = TrackSettings::default();
        let track = GroundTrack::new(central(), start(), 0.0, settings);
        let samples: Vec<_> = track.clone().collect();

        assert!(!samples.is_empty());
        assert!(samples.len() <= 25);
        for s in &samples {
            assert!(s.depth > settings.min_depth);
            assert!(s.offset_hours.abs() <= settings.half_window_hours);

            // re-evaluating the sample's instant reproduces it
            let model = derive_model(&propagate(&central(), s.sim_hours, &start()));
            assert!(model.depth > settings.min_depth);
            assert_abs_diff_eq!(model.shadow_center.lat, s.point.lat, epsilon = 1e-12);
            assert_abs_diff_eq!(model.shadow_center.lon, s.point.lon, epsilon = 1e-12);
        }

        // the centre of the window is the instant of greatest eclipse
        assert!(samples.iter().any(|s| s.offset_hours == 0.0));

        // time order
        for pair in samples.windows(2) {
            assert!(pair[0].offset_hours < pair[1].offset_hours);
        }

        // cloning restarts the walk
        assert_eq!(track.points().len(), samples.len());
    }

    #[test]
    fn test_empty_far_from_conjunction() {
        let params = central().with_moon_node_phase(90.0);
        let mut track = GroundTrack::new(params, start(), 0.0, TrackSettings::default());
        assert_eq!(track.size_hint(), (0, Some(25)));
        assert!(track.next().is_none());
        assert_eq!(track.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_zero_window_has_single_offset() {
        let settings = TrackSettings {
            half_window_hours: 0.0,
            ..TrackSettings::default()
        };
        let samples: Vec<_> = GroundTrack::new(central(), start(), 0.0, settings).collect();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].offset_hours, 0.0);
    }

    #[test]
    fn test_unvalidated_huge_window_is_bounded() {
        use crate::settings::MAX_STEPS_PER_SIDE;

        let settings = TrackSettings {
            half_window_hours: 1e300,
            ..TrackSettings::default()
        };
        let track = GroundTrack::new(central(), start(), 0.0, settings);
        let bound = 2 * MAX_STEPS_PER_SIDE as usize + 1;
        assert_eq!(track.size_hint(), (0, Some(bound)));
    }
}
