use approx::assert_abs_diff_eq;
use umbra::{
    geometry::{derive_model, EclipseKind},
    propagator::propagate,
    simulation::Simulation,
    vector::{great_circle_distance_deg, GeoPoint},
};

mod common;
use common::{assert_angle_close, central_parameters, eclipse_2024_04_08, synthetic_start};

fn dallas() -> GeoPoint {
    GeoPoint::new(32.78, -96.80)
}

#[test]
fn test_total_eclipse_2024_04_08() {
    let sim = Simulation::from_epoch(eclipse_2024_04_08(), &dallas());
    let model = sim.snapshot_at(0.0);

    assert_eq!(model.kind, EclipseKind::Total);
    assert_eq!(model.depth, 1.0);
    assert!(model.axis_hits_earth);
    assert!(model.moon_angular_radius > model.sun_angular_radius);

    // the Moon was just past perigee: the clamped model distance is the perigee
    assert_eq!(model.moon_distance_km, 363_300.0);

    // Sun overhead in the eastern Pacific
    assert_abs_diff_eq!(model.sub_solar.lat, 7.6, epsilon = 0.3);
    assert_angle_close(model.sub_solar.lon, -93.85, 0.5);

    // greatest eclipse near Nazas, Durango
    let greatest = GeoPoint::new(25.29, -104.14);
    let offset = great_circle_distance_deg(&model.shadow_center, &greatest);
    assert!(offset < 6.0, "shadow centre {:?} is {offset}° away", model.shadow_center);

    let view = model.observer_view(&dallas(), 25.0);
    assert!(view.inside_penumbra);
    assert!(view.distance_km < 2500.0);
}

#[test]
fn test_search_finds_2024_04_08_from_earlier() {
    let sim = Simulation::from_epoch(eclipse_2024_04_08(), &dallas());

    // three days before greatest eclipse
    let hours = sim
        .next_local_eclipse(-72.0)
        .expect("the 2024-04-08 eclipse is visible from Dallas");
    assert!(hours > -2.0 && hours < 3.0, "found at {hours} h");

    let model = sim.snapshot_at(hours);
    assert!(model.is_eclipse());
    assert!(model.observer_view(&dallas(), 25.0).inside_penumbra);
}

#[test]
fn test_collinear_configuration_is_total() {
    let model = derive_model(&propagate(&central_parameters(), 0.0, &synthetic_start()));
    assert_eq!(model.kind, EclipseKind::Total);
    assert_eq!(model.depth, 1.0);
    assert!(model.umbra_radius > 0.0);
    assert!(model.penumbra_radius > model.umbra_radius);
}

#[test]
fn test_quadrature_has_no_eclipse() {
    let params = central_parameters().with_moon_node_phase(90.0);
    let model = derive_model(&propagate(&params, 0.0, &synthetic_start()));
    assert!(model.true_separation > 80.0);
    assert_eq!(model.depth, 0.0);
    assert_eq!(model.kind, EclipseKind::None);
    assert_eq!((model.penumbra_radius, model.umbra_radius), (0.0, 0.0));
}

#[test]
fn test_propagation_by_zero_is_idempotent() {
    let sim = Simulation::from_epoch(eclipse_2024_04_08(), &dallas());
    let state = sim.state_at(0.0);
    assert_eq!(&state.params, sim.base());
    assert_eq!(state.date, sim.start());

    let again = propagate(&state.params, 0.0, &state.date);
    assert_eq!(again.params, state.params);
    assert_eq!(derive_model(&again), derive_model(&state));
}

#[test]
fn test_model_serializes() {
    let model = Simulation::new(central_parameters(), synthetic_start()).model_at(0.0);
    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["kind"], "total");
    assert_eq!(json["depth"], 1.0);
    assert_eq!(
        json["ground_track"].as_array().map(Vec::len),
        Some(model.ground_track.len())
    );
}
