//! # Constants and type definitions for skychart
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical constants
//! - Unit conversions (degrees ↔ radians, milliarcseconds ↔ radians, days ↔ seconds, AU ↔ km)
//! - Catalog reference epochs
//! - Core type aliases shared by the observer, ephemeris and projection modules

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Milliarcseconds → radians
pub const RADMAS: f64 = RADSEC / 1000.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// Parallax assigned to stars without a measured (or with a non-positive) parallax,
/// in milliarcseconds. It places them at one gigaparsec.
pub const MIN_PARALLAX_MAS: f64 = 1.0e-6;

// -------------------------------------------------------------------------------------------------
// Catalog epochs
// -------------------------------------------------------------------------------------------------

/// Julian year of the Hipparcos catalog reference epoch (J1991.25)
pub const HIPPARCOS_EPOCH_YEAR: f64 = 1991.25;

/// Convert a Julian epoch (e.g. `1991.25`) to a Modified Julian Date in the TT scale.
pub fn julian_year_to_mjd(year: f64) -> MJD {
    T2000 + (year - 2000.0) * DAYS_PER_JULIAN_YEAR
}

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// Identifier of a catalog star (Hipparcos number for the bundled loader)
pub type StarId = u32;
