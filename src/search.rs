//! # Next-local-eclipse search
//!
//! Finds the next simulated instant at which the footprint of a solar eclipse covers the
//! observer carried by the parameter snapshot.
//!
//! ## Algorithm
//!
//! Two nested loops, bounded by [`SearchSettings::max_iterations`]:
//!
//! 1. Step [`SearchSettings::skip_hours`] past the current instant and read the phase angle
//!    `moon − sun` in ecliptic longitude. The next new moon is first estimated linearly with
//!    the synodic rate ([`SYNODIC_RATE`]) and then corrected a fixed number of times
//!    ([`SearchSettings::newton_steps`]) by the residual phase at the estimate.
//! 2. If the Sun is covered anywhere on Earth at that new moon (`depth > 0`), the window
//!    around it is scanned and each sample tests whether the observer lies within the
//!    penumbra radius plus [`SearchSettings::visibility_slack_km`]. The scanned instant
//!    closest to the shadow centre is returned.
//! 3. Otherwise the search restarts one step past this new moon.
//!
//! The corrections are not checked for convergence. With the mean rates used by the
//! propagator the phase is close to linear in time and three steps settle well below the
//! scan resolution, but the result is an estimate and not a root.
//!
//! Exhausting the iterations is a regular outcome: [`next_local_eclipse`] returns `None`.

use hifitime::Epoch;
use tracing::{debug, trace};

use crate::{
    constants::{Hours, SYNODIC_RATE},
    geometry::{derive_model, moon_ecliptic_coordinates},
    parameters::OrbitalParameters,
    propagator::propagate,
    settings::{steps_per_side, SearchSettings},
    vector::{normalize180, normalize360, GeoPoint},
};

/// Result of an abortable search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// Simulated hours of the best local view of the eclipse
    Found(Hours),
    /// No locally visible eclipse within the iteration bound
    NotFound,
    /// The caller asked the search to stop
    Aborted,
}

impl SearchOutcome {
    pub fn found(&self) -> Option<Hours> {
        match self {
            SearchOutcome::Found(hours) => Some(*hours),
            _ => None,
        }
    }
}

/// Simulated hours of the next eclipse visible from the observer of `base`, strictly after
/// `current_hours`, or `None` when the iteration bound is exhausted.
///
/// Arguments
/// -----------------
/// * `base`: parameter snapshot at the start instant, observer included
/// * `current_hours`: simulated hours the search starts from
/// * `start`: the instant `sim_hours == 0` refers to
/// * `settings`: iteration bound and scan resolution
pub fn next_local_eclipse(
    base: &OrbitalParameters,
    current_hours: Hours,
    start: &Epoch,
    settings: &SearchSettings,
) -> Option<Hours> {
    search_with_abort(base, current_hours, start, settings, || false).found()
}

/// [`next_local_eclipse`] with a cooperative stop: `abort` is polled before every new moon.
pub fn search_with_abort<F>(
    base: &OrbitalParameters,
    current_hours: Hours,
    start: &Epoch,
    settings: &SearchSettings,
    abort: F,
) -> SearchOutcome
where
    F: Fn() -> bool,
{
    let observer = base.observer();
    let mut hours = current_hours + settings.skip_hours;

    for iteration in 0..settings.max_iterations {
        if abort() {
            debug!(iteration, hours, "eclipse search aborted");
            return SearchOutcome::Aborted;
        }

        let new_moon = refine_new_moon(base, hours, start, settings.newton_steps);
        let model = derive_model(&propagate(base, new_moon, start));
        trace!(iteration, new_moon, depth = model.depth, "new moon");

        if model.depth > 0.0 {
            debug!(
                iteration,
                new_moon,
                kind = %model.kind,
                "global eclipse, scanning local visibility"
            );
            if let Some(best) = scan_visibility(base, new_moon, start, &observer, settings) {
                debug!(iteration, hours = best, "eclipse visible from observer");
                return SearchOutcome::Found(best);
            }
        }

        hours = new_moon + settings.skip_hours;
    }

    debug!(
        iterations = settings.max_iterations,
        last_hours = hours,
        "eclipse search exhausted"
    );
    SearchOutcome::NotFound
}

/// Phase angle `moon − sun` in ecliptic longitude, in [0, 360).
pub fn phase_angle(params: &OrbitalParameters) -> f64 {
    let (moon_lon, _) = moon_ecliptic_coordinates(params);
    normalize360(moon_lon - params.sun_ecliptic_lon)
}

/// Simulated hours of the first new moon at or after `hours`.
pub fn refine_new_moon(
    base: &OrbitalParameters,
    hours: Hours,
    start: &Epoch,
    corrections: usize,
) -> Hours {
    let phase = phase_angle(&propagate(base, hours, start).params);
    let mut estimate = hours + ((360.0 - phase) % 360.0) / SYNODIC_RATE;

    for _ in 0..corrections {
        let residual = normalize180(phase_angle(&propagate(base, estimate, start).params));
        estimate -= residual / SYNODIC_RATE;
    }
    estimate
}

/// Scan the window around `new_moon` and keep the instant where the observer is closest to
/// the shadow centre while inside the widened penumbra.
fn scan_visibility(
    base: &OrbitalParameters,
    new_moon: Hours,
    start: &Epoch,
    observer: &GeoPoint,
    settings: &SearchSettings,
) -> Option<Hours> {
    let n = steps_per_side(settings.scan_half_window_hours, settings.scan_step_hours);

    (-n..=n)
        .map(|k| new_moon + k as f64 * settings.scan_step_hours)
        .filter_map(|hours| {
            let model = derive_model(&propagate(base, hours, start));
            let view = model.observer_view(observer, settings.visibility_slack_km);
            view.inside_penumbra.then_some((hours, view.distance_km))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(hours, _)| hours)
}
