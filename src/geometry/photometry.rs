//! Disk-overlap photometry, shadow footprint radii and eclipse classification.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::{
    constants::{Degree, DEG, EPS_NORM},
    vector::{clamp, safe_asin_deg},
};

/// Depth at or below which an eclipse is not reported.
pub const MIN_REPORTED_DEPTH: f64 = 0.0005;

/// Largest footprint radius on the ground, reached for grazing geometries.
pub const MAX_GROUND_RADIUS_DEG: Degree = 89.5;

/// Class of a solar eclipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EclipseKind {
    None,
    Partial,
    Annular,
    Total,
}

impl std::fmt::Display for EclipseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EclipseKind::None => write!(f, "no eclipse"),
            EclipseKind::Partial => write!(f, "partial solar eclipse"),
            EclipseKind::Annular => write!(f, "annular solar eclipse"),
            EclipseKind::Total => write!(f, "total solar eclipse"),
        }
    }
}

/// Fraction of the Sun's disk (radius `r_sun`) hidden by the Moon's disk (radius `r_moon`)
/// when their centres are `separation` apart. All arguments in degrees.
///
/// Uses the area of the lens formed by two intersecting circles. Degenerate cases:
/// - disjoint disks (`separation ≥ r_sun + r_moon`) give exactly `0`,
/// - a contained disk gives `1` when the Moon is at least as large as the Sun,
///   otherwise the area ratio `(r_moon / r_sun)²`.
pub fn overlap_fraction(r_sun: Degree, r_moon: Degree, separation: Degree) -> f64 {
    let d = separation.abs();
    if r_sun <= 0.0 || r_moon <= 0.0 || d >= r_sun + r_moon {
        return 0.0;
    }

    if d <= (r_sun - r_moon).abs() {
        return if r_moon >= r_sun {
            1.0
        } else {
            (r_moon / r_sun).powi(2)
        };
    }

    let (r1, r2) = (r_sun * DEG, r_moon * DEG);
    let d = d * DEG;

    let a1 = clamp((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1), -1.0, 1.0).acos();
    let a2 = clamp((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2), -1.0, 1.0).acos();
    let k = (-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2);

    let lens = r1 * r1 * a1 + r2 * r2 * a2 - 0.5 * k.max(0.0).sqrt();
    clamp(lens / (PI * r1 * r1), 0.0, 1.0)
}

/// Angular radius on the Earth's surface of the region where the Sun–Moon separation
/// drops below `target_offset`, given the Moon's horizontal parallax.
///
/// Inverts the parallax relation `sin(offset) = sin(parallax) · sin(radius)`; the radius is
/// capped at [`MAX_GROUND_RADIUS_DEG`] when the ratio reaches 1.
pub fn ground_radius(target_offset: Degree, parallax: Degree) -> Degree {
    let sin_parallax = (parallax * DEG).sin().max(EPS_NORM);
    let ratio = (target_offset * DEG).sin().abs() / sin_parallax;
    if ratio >= 1.0 {
        return MAX_GROUND_RADIUS_DEG;
    }
    safe_asin_deg(ratio).min(MAX_GROUND_RADIUS_DEG)
}

/// Classify an eclipse from its depth, the parallax-corrected separation, the angular radii
/// of both disks (degrees) and whether the shadow axis meets the Earth.
pub fn classify(
    depth: f64,
    best_separation: Degree,
    r_sun: Degree,
    r_moon: Degree,
    axis_hits_earth: bool,
) -> EclipseKind {
    if depth <= MIN_REPORTED_DEPTH {
        return EclipseKind::None;
    }

    if axis_hits_earth && best_separation <= (r_moon - r_sun).abs() {
        if r_moon >= r_sun {
            return EclipseKind::Total;
        }
        return EclipseKind::Annular;
    }

    if best_separation < r_sun + r_moon {
        EclipseKind::Partial
    } else {
        EclipseKind::None
    }
}
