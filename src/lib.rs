//! # Infoot
//!
//! Check whether sky positions fall within a survey footprint described by a catalog of
//! circular tiles, and report which tile(s) each position belongs to together with the
//! tile observation status.
//!
//! ## Modules
//!
//! * [`catalog`] – tile catalog loading and lookup.
//! * [`matcher`] – great-circle cross-matching, single-point and batch modes.
//! * [`sky`] – sky positions, RA units, separation.
//! * [`conversion`] – decimal / sexagesimal angle parsing.
//! * [`query_table`] – coordinates tables in, annotated `_matched` tables out.
//! * [`report`] – console rendering of match outcomes.
//! * [`config`] / [`infoot`] – run configuration and the end-to-end façade.
//!
//! ## Quick start
//!
//! ```rust
//! use infoot::{match_single, AngleUnit, Catalog, QueryPoint, Tile, DEFAULT_THRESHOLD_DEG};
//!
//! let catalog = Catalog::from_tiles(vec![Tile::new("T1", 10.0, 0.0, 1).unwrap()]).unwrap();
//! let query = QueryPoint::new(10.0, 0.0, AngleUnit::Hour).unwrap();
//!
//! let outcome = match_single(&query, &catalog, DEFAULT_THRESHOLD_DEG).unwrap();
//! assert_eq!(outcome.matches()[0].name(), "T1");
//! ```
pub mod catalog;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod infoot;
pub mod infoot_errors;
pub mod matcher;
pub mod query_table;
pub mod report;
pub mod sky;
mod tabular;

pub use catalog::{Catalog, Tile};
pub use config::MatchConfig;
pub use constants::{is_observed_status, Degree, StatusCode, DEFAULT_THRESHOLD_DEG};
pub use infoot::Infoot;
pub use infoot_errors::InfootError;
pub use matcher::{
    match_batch, match_single, BatchMatch, FootprintMatcher, QueryPoint, SingleMatch, TileMatch,
};
pub use query_table::{matched_output_path, QueryTable};
pub use sky::{angular_separation_deg, AngleUnit, SkyPosition};
