//! # Low-order Sun and Moon ephemerides
//!
//! Truncated analytical series giving the geocentric ecliptic position of the Sun and
//! of the Moon as a function of the Julian centuries `t` elapsed since J2000.0 (TT).
//!
//! ## Sun
//!
//! Mean longitude and mean anomaly are cubic polynomials in `t`; the true longitude adds
//! a three-harmonic equation of the centre, and the radius vector follows from the
//! Keplerian ellipse with a slowly decreasing eccentricity.
//!
//! ## Moon
//!
//! The lunar series is driven by the four fundamental arguments
//!
//! ```text
//! D  : mean elongation of the Moon
//! M  : mean anomaly of the Sun
//! M' : mean anomaly of the Moon
//! F  : mean argument of latitude of the Moon
//! ```
//!
//! and keeps the leading periodic terms of the ELP-2000/82 development as tabulated by
//! Meeus (*Astronomical Algorithms*, ch. 47): 20 terms in longitude, 11 in latitude and
//! 13 in distance. Terms that involve the Sun's anomaly are scaled by the eccentricity
//! factor `E(t)` (once per power of `M`).
//!
//! Accuracy is a few arcminutes for the Sun and a few hundredths of a degree for the Moon
//! over a few centuries around J2000, which is adequate for simulation but not for
//! precision eclipse predictions.

use crate::constants::{
    ARCSEC, AstronomicalUnit, Degree, JulianCentury, Kilometer, DEG, MOON_MAX_LATITUDE_DEG,
};
use crate::vector::{clamp, normalize360};

/// Geocentric position of the Sun on the ecliptic of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEphemeris {
    /// True ecliptic longitude in [0, 360)
    pub longitude: Degree,
    /// Earth–Sun distance
    pub distance_au: AstronomicalUnit,
    /// Mean anomaly in [0, 360)
    pub mean_anomaly: Degree,
}

/// Geocentric position of the Moon on the ecliptic of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonEphemeris {
    /// Ecliptic longitude in [0, 360)
    pub longitude: Degree,
    /// Ecliptic latitude, clamped to ±8.5°
    pub latitude: Degree,
    /// Earth–Moon distance (centre to centre)
    pub distance_km: Kilometer,
    /// Mean anomaly M' in [0, 360)
    pub mean_anomaly: Degree,
    /// Longitude of the mean ascending node in [0, 360)
    pub ascending_node: Degree,
}

/// Row of a lunar periodic series: multipliers of (D, M, M', F) and the coefficient.
type LunarTerm = (i8, i8, i8, i8, f64);

/// Longitude terms, coefficients in 1e-6 degree.
const LONGITUDE_TERMS: [LunarTerm; 20] = [
    (0, 0, 1, 0, 6_288_774.0),
    (2, 0, -1, 0, 1_274_027.0),
    (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0),
    (0, 1, 0, 0, -185_116.0),
    (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0),
    (2, -1, -1, 0, 57_066.0),
    (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0),
    (0, 1, -1, 0, -40_923.0),
    (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0),
    (2, 0, 0, -2, 15_327.0),
    (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0),
    (4, 0, -1, 0, 10_675.0),
    (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0),
    (2, 1, -1, 0, -7_888.0),
];

/// Distance terms, coefficients in 1e-3 km.
const DISTANCE_TERMS: [LunarTerm; 13] = [
    (0, 0, 1, 0, -20_905_355.0),
    (2, 0, -1, 0, -3_699_111.0),
    (2, 0, 0, 0, -2_955_968.0),
    (0, 0, 2, 0, -569_925.0),
    (0, 1, 0, 0, 48_888.0),
    (2, 0, -2, 0, 246_158.0),
    (2, -1, -1, 0, -152_138.0),
    (2, 0, 1, 0, -170_733.0),
    (2, -1, 0, 0, -204_586.0),
    (0, 1, -1, 0, -129_620.0),
    (1, 0, 0, 0, 108_743.0),
    (0, 1, 1, 0, 104_755.0),
    (0, 0, 1, -2, 79_661.0),
];

/// Latitude terms, coefficients in 1e-6 degree.
const LATITUDE_TERMS: [LunarTerm; 11] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
];

/// Mean distance of the Moon around which the distance series oscillates.
const MOON_MEAN_DISTANCE_KM: Kilometer = 385_000.56;

/// Fundamental arguments of the lunar theory, in degrees.
struct LunarArguments {
    l_prime: Degree,
    d: Degree,
    m: Degree,
    m_prime: Degree,
    f: Degree,
    e: f64,
}

impl LunarArguments {
    fn at(t: JulianCentury) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;

        LunarArguments {
            l_prime: 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
                - t4 / 65_194_000.0,
            d: 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
                - t4 / 113_065_000.0,
            m: 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0,
            m_prime: 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
                - t4 / 14_712_000.0,
            f: 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
                + t4 / 863_310_000.0,
            e: 1.0 - 0.002_516 * t - 0.000_007_4 * t2,
        }
    }

    /// Argument of a series row, in radians.
    fn argument(&self, term: &LunarTerm) -> f64 {
        let (cd, cm, cmp, cf, _) = *term;
        (cd as f64 * self.d + cm as f64 * self.m + cmp as f64 * self.m_prime + cf as f64 * self.f)
            * DEG
    }

    /// Eccentricity scaling of a series row.
    fn eccentricity_factor(&self, term: &LunarTerm) -> f64 {
        self.e.powi(term.1.unsigned_abs() as i32)
    }

    fn sum_sin(&self, terms: &[LunarTerm]) -> f64 {
        terms
            .iter()
            .map(|term| term.4 * self.eccentricity_factor(term) * self.argument(term).sin())
            .sum()
    }

    fn sum_cos(&self, terms: &[LunarTerm]) -> f64 {
        terms
            .iter()
            .map(|term| term.4 * self.eccentricity_factor(term) * self.argument(term).cos())
            .sum()
    }
}

/// Mean obliquity of the ecliptic (IAU 1976 model), in degrees.
///
/// The obliquity ε is computed as a cubic polynomial in Julian centuries since J2000,
/// evaluated with Horner's method:
///
/// ```text
/// ε = ((ob3 * t + ob2) * t + ob1) * t + ob0
/// ```
///
/// where the coefficients are given in arcseconds and converted to degrees.
pub fn mean_obliquity(t: JulianCentury) -> Degree {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * ARCSEC;
    let ob1 = -46.815 * ARCSEC;
    let ob2 = -0.0006 * ARCSEC;
    let ob3 = 0.00181 * ARCSEC;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Geocentric ecliptic position of the Sun.
pub fn sun_position(t: JulianCentury) -> SunEphemeris {
    let t2 = t * t;

    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let m = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t2;
    let m_rad = m * DEG;

    // Equation of the centre
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t2) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();

    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t2;
    let v = (m + c) * DEG;
    let r = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * v.cos());

    SunEphemeris {
        longitude: normalize360(l0 + c),
        distance_au: r,
        mean_anomaly: normalize360(m),
    }
}

/// Geocentric ecliptic position of the Moon.
pub fn moon_position(t: JulianCentury) -> MoonEphemeris {
    let args = LunarArguments::at(t);

    let sum_l = args.sum_sin(&LONGITUDE_TERMS);
    let sum_b = args.sum_sin(&LATITUDE_TERMS);
    let sum_r = args.sum_cos(&DISTANCE_TERMS);

    MoonEphemeris {
        longitude: normalize360(args.l_prime + sum_l / 1e6),
        latitude: clamp(sum_b / 1e6, -MOON_MAX_LATITUDE_DEG, MOON_MAX_LATITUDE_DEG),
        distance_km: MOON_MEAN_DISTANCE_KM + sum_r / 1e3,
        mean_anomaly: normalize360(args.m_prime),
        ascending_node: mean_ascending_node(t),
    }
}

/// Longitude of the mean ascending node of the lunar orbit, in [0, 360).
pub fn mean_ascending_node(t: JulianCentury) -> Degree {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    normalize360(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t3 / 467_441.0
            - t4 / 60_616_000.0,
    )
}
