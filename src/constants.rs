//! # Constants and type definitions for Infoot
//!
//! This module centralizes the **unit conversions**, **matching defaults**, and **common type
//! aliases** used throughout the `infoot` library.
//!
//! ## Overview
//!
//! - Angle conversions (hours ↔ degrees ↔ radians)
//! - The default footprint matching radius
//! - Sentinel values written for rows that fall outside the footprint
//! - The set of tile status codes meaning "already observed"

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees spanned by one hour of right ascension
pub const DEG_PER_HOUR: f64 = 15.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Matching defaults and sentinels
// -------------------------------------------------------------------------------------------------

/// Default footprint membership radius, in degrees.
///
/// A query belongs to a tile when its separation is **strictly less** than this value.
pub const DEFAULT_THRESHOLD_DEG: Degree = 1.0;

/// Tile name written for a batch row that matched no tile.
pub const NO_MATCH_TILE: &str = "-";

/// Status code written for a batch row that matched no tile.
pub const NO_MATCH_STATUS: StatusCode = -10;

/// Status codes denoting a tile that was already observed.
pub const OBSERVED_STATUS_CODES: [StatusCode; 5] = [1, 2, 4, 5, 6];

/// Human-readable rule printed alongside every result.
pub const OBSERVED_STATUS_HINT: &str =
    "If STATUS = {1, 2, 4, 5, 6}, the tile where the coordinates are located was already observed";

/// Suffix appended to the base name of a query table to build the output path.
pub const MATCHED_SUFFIX: &str = "_matched";

/// Column added to the output table holding the matched tile name.
pub const TILE_COLUMN: &str = "TILE";

/// Column added to the output table holding the matched tile status.
pub const STATUS_COLUMN: &str = "STATUS";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in hours of right ascension
pub type Hour = f64;
/// Observation state of a tile, as stored in the catalog `STATUS` column
pub type StatusCode = i32;

/// Return `true` when `status` is one of the "already observed" codes.
pub fn is_observed_status(status: StatusCode) -> bool {
    OBSERVED_STATUS_CODES.contains(&status)
}
