//! # Constants and type definitions for satmission
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Geodetic constants of the WGS84 reference ellipsoid
//! - Gravity field constants (EGM08 zonal harmonics)
//! - Solar constants used by the eclipse and beta angle computations
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, hours ↔ radians)
//! - Core type aliases

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Julian Date of J2000.0 (2000-01-01 12:00:00 TT)
pub const JD_J2000: f64 = 2_451_545.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

// -------------------------------------------------------------------------------------------------
// Earth
// -------------------------------------------------------------------------------------------------

/// WGS84 semi-major axis (equatorial radius) in meters
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// WGS84 semi-minor axis (polar radius) in meters
pub const WGS84_SEMI_MINOR_AXIS: f64 = WGS84_SEMI_MAJOR_AXIS * (1.0 - WGS84_FLATTENING);

/// WGS84 first eccentricity squared
pub const WGS84_ECCENTRICITY_SQUARED: f64 = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);

/// Earth standard gravitational parameter μ in m³/s² (EGM08)
pub const EARTH_GRAV_PARAM: f64 = 3.986_004_415e14;

/// Reference radius of the EGM08 gravity model in meters
pub const EARTH_GRAV_RADIUS: f64 = 6_378_137.0;

/// Unnormalized J2 zonal coefficient (EGM08)
pub const EARTH_J2: f64 = 1.082_626_683_553_151_3e-3;

/// Unnormalized J3 zonal coefficient (EGM08)
pub const EARTH_J3: f64 = -2.532_410_518_567_722_5e-6;

// -------------------------------------------------------------------------------------------------
// Sun
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in meters (IAU 2012)
pub const AU_METERS: f64 = 149_597_870_700.0;

/// Mean radius of the Sun in meters (IAU 2015 nominal)
pub const SUN_RADIUS: f64 = 6.957e8;

/// Length of the tropical year in days
pub const TROPICAL_YEAR_DAYS: f64 = 365.242_189_7;

/// Nodal precession rate of a Sun-synchronous orbit, in rad/s
pub const SUN_SYNC_NODAL_RATE: f64 = DPI / (TROPICAL_YEAR_DAYS * SECONDS_PER_DAY);

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Time span or time offset in seconds
pub type Second = f64;
/// Julian Date (days, UTC unless stated otherwise)
pub type JulianDate = f64;
