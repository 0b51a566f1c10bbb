//! Seed the engine for a date and an observer, print the eclipse model, dump the ground track
//! as CSV and look for the next eclipse visible from the observer.
//!
//! ```text
//! RUST_LOG=umbra=debug cargo run --example next_eclipse -- "2024-04-08T18:17:00 UTC" 32.78 -96.80
//! ```

use serde::Serialize;
use tracing::info;
use umbra::{simulation::Simulation, vector::GeoPoint};

#[derive(Serialize)]
struct TrackRow {
    offset_hours: f64,
    date: String,
    lat: f64,
    lon: f64,
    depth: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let date = args
        .next()
        .unwrap_or_else(|| "2024-04-08T18:17:00 UTC".to_string());
    let lat: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(32.78);
    let lon: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(-96.80);
    let observer = GeoPoint::new(lat, lon);

    let sim = Simulation::from_date(&date, &observer)?;
    info!(%date, lat, lon, "simulation seeded");

    let model = sim.model_at(0.0);
    println!("{} at {}", model.kind, sim.start());
    println!("  depth            {:.4}", model.depth);
    println!(
        "  separation       {:.4}° (best {:.4}°)",
        model.true_separation, model.best_separation
    );
    println!(
        "  radii            sun {:.4}°  moon {:.4}°  parallax {:.4}°",
        model.sun_angular_radius, model.moon_angular_radius, model.moon_parallax
    );
    println!(
        "  shadow centre    {:.2}°, {:.2}° ({})",
        model.shadow_center.lat,
        model.shadow_center.lon,
        if model.axis_hits_earth { "axis on Earth" } else { "closest approach" }
    );
    println!(
        "  footprint        penumbra {:.0} km  umbra {:.0} km",
        model.penumbra_radius_km(),
        model.umbra_radius_km()
    );
    let view = model.observer_view(&observer, sim.settings().search.visibility_slack_km);
    println!(
        "  observer         {:.0} km from the centre, bearing {:.1}°, in penumbra: {}",
        view.distance_km, view.bearing, view.inside_penumbra
    );

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for sample in sim.ground_track(0.0) {
        writer.serialize(TrackRow {
            offset_hours: sample.offset_hours,
            date: sim.state_at(sample.sim_hours).date.to_string(),
            lat: sample.point.lat,
            lon: sample.point.lon,
            depth: sample.depth,
        })?;
    }
    writer.flush()?;

    match sim.next_local_eclipse(0.0) {
        Some(hours) => {
            let state = sim.state_at(hours);
            let found = sim.snapshot_at(hours);
            println!(
                "next eclipse visible from {lat:.2}°, {lon:.2}°: {} on {} (depth {:.3})",
                found.kind, state.date, found.depth
            );
        }
        None => println!("no eclipse visible from {lat:.2}°, {lon:.2}° within the search horizon"),
    }

    Ok(())
}
