use umbra::{
    parameters::OrbitalParameters,
    search::{next_local_eclipse, refine_new_moon, search_with_abort, SearchOutcome},
    settings::{EngineSettings, SearchSettings},
    simulation::Simulation,
};

mod common;
use common::{central_parameters, synthetic_start};

#[test]
fn test_bounded_search_reports_not_found() {
    // conjunctions of the next three lunations happen far above the ecliptic
    let params = OrbitalParameters::default().with_sun_ecliptic_lon(90.0);
    let settings = SearchSettings {
        max_iterations: 3,
        ..SearchSettings::default()
    };
    assert_eq!(
        next_local_eclipse(&params, 0.0, &synthetic_start(), &settings),
        None
    );
}

#[test]
fn test_search_reaches_eclipse_season() {
    // same configuration, enough lunations to reach the node
    let params = OrbitalParameters::default().with_sun_ecliptic_lon(90.0);
    let sim = Simulation::new(params, synthetic_start());
    let global = (0..12)
        .scan(0.0, |hours, _| {
            let new_moon = refine_new_moon(sim.base(), *hours + 24.0, &sim.start(), 3);
            *hours = new_moon;
            Some(new_moon)
        })
        .find(|&new_moon| sim.snapshot_at(new_moon).depth > 0.0)
        .expect("an eclipse season within a year");

    // an observer placed under the shadow of that new moon sees it
    let center = sim.snapshot_at(global).shadow_center;
    let base = sim.base().with_observer(center.lat, center.lon);
    let sim = sim.with_base(base);
    let hours = sim.next_local_eclipse(0.0).expect("visible eclipse");
    assert!((hours - global).abs() <= 6.0, "{hours} vs {global}");
}

#[test]
fn test_search_is_strictly_after_current_instant() {
    let params = central_parameters();
    let center = Simulation::new(params, synthetic_start())
        .snapshot_at(0.0)
        .shadow_center;
    let sim = Simulation::new(
        params.with_observer(center.lat, center.lon),
        synthetic_start(),
    );

    let first = sim.next_local_eclipse(-48.0).unwrap();
    assert!(first.abs() < 0.2);

    // starting at the eclipse itself skips ahead to a later one
    let settings = EngineSettings {
        search: SearchSettings {
            max_iterations: 20,
            ..SearchSettings::default()
        },
        ..EngineSettings::default()
    };
    let sim = sim.with_settings(settings).unwrap();
    if let Some(next) = sim.next_local_eclipse(first) {
        assert!(next > first + 24.0);
    }
}

#[test]
fn test_abort_stops_before_first_lunation() {
    let outcome = search_with_abort(
        &central_parameters(),
        -48.0,
        &synthetic_start(),
        &SearchSettings::default(),
        || true,
    );
    assert_eq!(outcome, SearchOutcome::Aborted);
    assert_eq!(outcome.found(), None);
}
