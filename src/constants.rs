//! # Constants and type definitions for celestsp
//!
//! This module centralizes the **angular constants**, **time conversion factors**, the
//! **default sampling grid** of the horizon-crossing search, and the type aliases used
//! across the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, seconds ↔ days)
//! - Epoch constants used by the sidereal-time and precession models
//! - Defaults for [`PlannerParams`](crate::planner::PlannerParams)
//! - Type aliases naming the unit carried by a plain `f64`

// -------------------------------------------------------------------------------------------------
// Angular constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Ratio of the sidereal day rate to the solar day rate
pub const SIDEREAL_RATE: f64 = 1.00273790934;

// -------------------------------------------------------------------------------------------------
// Horizon-crossing search defaults
// -------------------------------------------------------------------------------------------------

/// Number of instants sampled by the horizon-crossing search, both ends of the window included.
pub const HORIZON_SAMPLES: usize = 1000;

/// Look-ahead window of the horizon-crossing search, in hours.
pub const HORIZON_WINDOW_HOURS: f64 = 24.0;

/// Reference point used by the westernmost start strategy: altitude 0°, azimuth 270°.
pub const WEST_POINT: (Degree, Degree) = (0.0, 270.0);

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Duration in hours
pub type Hour = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
