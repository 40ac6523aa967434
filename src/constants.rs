//! # Constants and type definitions for sweph-batch
//!
//! This module centralizes the **buffer capacities**, **result widths** and **identifier
//! constants** shared by the engine gateway and the batch dispatcher.
//!
//! ## Overview
//!
//! - Fixed capacities of the character buffers handed to the engine
//! - Width of every numeric output family (one per C signature shape)
//! - Minimum lengths of the auxiliary vectors (site, atmosphere, observer)
//! - Body identifiers and calculation flag bits used by callers and tests
//!
//! Buffer capacity is a property of the **operation**, never of the input data: every
//! scratch buffer is sized from the constants below before the engine is called.

// -------------------------------------------------------------------------------------------------
// Character buffer capacities
// -------------------------------------------------------------------------------------------------

/// Capacity of the diagnostic (`serr`) buffer, terminator included
pub const SERR_LEN: usize = 256;

/// Capacity of a star / object name slot, terminator included
pub const STAR_NAME_LEN: usize = 41;

/// Capacity of path and version string buffers, terminator included
pub const PATH_LEN: usize = 256;

// -------------------------------------------------------------------------------------------------
// Numeric output families
// -------------------------------------------------------------------------------------------------

/// Horizontal coordinates (azimuth, true altitude, apparent altitude)
pub const AZALT_WIDTH: usize = 3;

/// Body position: three coordinates and their three daily rates
pub const POSITION_WIDTH: usize = 6;

/// Eclipse timing moments (maximum, contacts, ...)
pub const ECLIPSE_TIMES_WIDTH: usize = 10;

/// Refraction details returned by `refrac_extended`
pub const REFRACTION_WIDTH: usize = 10;

/// Geographic path of a solar eclipse
pub const ECLIPSE_PATH_WIDTH: usize = 15;

/// Eclipse and phenomenon attributes
pub const ATTRIBUTES_WIDTH: usize = 20;

/// House cusps, large enough for the 36 Gauquelin sectors
pub const CUSPS_WIDTH: usize = 37;

/// Ascendant, MC and the other angles returned next to the cusps
pub const ASCMC_WIDTH: usize = 10;

/// Heliacal and visibility result arrays
pub const HELIACAL_WIDTH: usize = 50;

// -------------------------------------------------------------------------------------------------
// Auxiliary vectors
// -------------------------------------------------------------------------------------------------

/// Geographic position: longitude, latitude, height
pub const GEOPOS_MIN_LEN: usize = 3;

/// Atmospheric conditions: pressure, temperature, humidity, visibility
pub const ATMOSPHERE_MIN_LEN: usize = 4;

/// Observer description: age, Snellen ratio, optical instrument fields
pub const OBSERVER_MIN_LEN: usize = 6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Julian day number (days)
pub type JulianDay = f64;
/// Angle in degrees
pub type Degree = f64;
/// Height in meters
pub type Meter = f64;
/// Engine body identifier
pub type BodyId = i32;
/// Engine flag bits
pub type Flag = i32;
/// Raw engine return value, passed through uninterpreted
pub type Status = i32;

// -------------------------------------------------------------------------------------------------
// Status sentinels, bodies and flags
// -------------------------------------------------------------------------------------------------

/// Success return value
pub const OK: Status = 0;
/// Error sentinel
pub const ERR: Status = -1;

pub const SE_SUN: BodyId = 0;
pub const SE_MOON: BodyId = 1;
pub const SE_MERCURY: BodyId = 2;
pub const SE_VENUS: BodyId = 3;
pub const SE_MARS: BodyId = 4;
pub const SE_JUPITER: BodyId = 5;
pub const SE_SATURN: BodyId = 6;
pub const SE_URANUS: BodyId = 7;
pub const SE_NEPTUNE: BodyId = 8;
pub const SE_PLUTO: BodyId = 9;
/// Sentinel meaning "use the star name instead of a body number"
pub const SE_NO_BODY: BodyId = -1;

pub const SEFLG_JPLEPH: Flag = 1;
pub const SEFLG_SWIEPH: Flag = 2;
pub const SEFLG_MOSEPH: Flag = 4;
pub const SEFLG_SPEED: Flag = 256;
pub const SEFLG_EQUATORIAL: Flag = 2048;
pub const SEFLG_TOPOCTR: Flag = 32 * 1024;
pub const SEFLG_SIDEREAL: Flag = 64 * 1024;

/// Gregorian calendar flag for `julday`
pub const SE_GREG_CAL: i32 = 1;
/// Julian calendar flag for `julday`
pub const SE_JUL_CAL: i32 = 0;

/// Rise / transit event selectors
pub const SE_CALC_RISE: Flag = 1;
pub const SE_CALC_SET: Flag = 2;
pub const SE_CALC_MTRANSIT: Flag = 4;
pub const SE_CALC_ITRANSIT: Flag = 8;

/// Heliacal event types
pub const SE_HELIACAL_RISING: Flag = 1;
pub const SE_HELIACAL_SETTING: Flag = 2;
pub const SE_EVENING_FIRST: Flag = 3;
pub const SE_MORNING_LAST: Flag = 4;

/// Eclipse type bits
pub const SE_ECL_TOTAL: Flag = 4;
pub const SE_ECL_ANNULAR: Flag = 8;
pub const SE_ECL_PARTIAL: Flag = 16;
