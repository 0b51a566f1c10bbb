//! # Constants and type definitions for Umbra
//!
//! This module centralizes the **physical constants**, **conversion factors**, the
//! **mean angular rates** used by the propagator and the common **type aliases**
//! shared by every part of the eclipse engine.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, AU ↔ km)
//! - Body radii and lunar distance bounds
//! - Mean angular rates of the simulated clock (degrees per hour)
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const DEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const RAD: f64 = 180.0 / std::f64::consts::PI;

/// Arcseconds → degrees
pub const ARCSEC: f64 = 1.0 / 3600.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Julian day of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Numerical floor below which a vector is considered null
pub const EPS_NORM: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Bodies
// -------------------------------------------------------------------------------------------------

/// Mean Earth radius in kilometers (spherical Earth model)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Solar radius in kilometers
pub const SUN_RADIUS_KM: f64 = 695_700.0;

/// Lunar radius in kilometers
pub const MOON_RADIUS_KM: f64 = 1737.4;

/// Lunar perigee distance used to clamp the simulated Earth–Moon distance
pub const MOON_PERIGEE_KM: f64 = 363_300.0;

/// Lunar apogee distance used to clamp the simulated Earth–Moon distance
pub const MOON_APOGEE_KM: f64 = 405_500.0;

/// Mean inclination of the lunar orbit on the ecliptic
pub const MOON_INCLINATION_DEG: f64 = 5.145;

/// Largest ecliptic latitude the lunar series is allowed to report
pub const MOON_MAX_LATITUDE_DEG: f64 = 8.5;

// -------------------------------------------------------------------------------------------------
// Mean rates of the simulated clock (degrees per hour)
// -------------------------------------------------------------------------------------------------

/// Sidereal rotation of the Earth
pub const EARTH_ROTATION_RATE: f64 = 15.041_067;

/// Mean motion of the Sun along the ecliptic
pub const SUN_RATE: f64 = 0.041_068;

/// Mean motion of the Moon along the ecliptic
pub const MOON_RATE: f64 = 0.549_017;

/// Regression of the lunar ascending node
pub const NODE_RATE: f64 = -0.002_206;

/// Mean motion of the lunar anomaly (anomalistic month)
pub const MOON_ANOMALY_RATE: f64 = 0.544_370;

/// Rate at which the Moon catches up with the Sun (synodic motion)
pub const SYNODIC_RATE: f64 = MOON_RATE - SUN_RATE;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Elapsed simulated time in hours
pub type Hours = f64;
/// Julian day number (days)
pub type JulianDay = f64;
/// Julian centuries since J2000.0
pub type JulianCentury = f64;
