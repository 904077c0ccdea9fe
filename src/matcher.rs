//! # Footprint matching
//!
//! Cross-match query positions against a [`Catalog`] of tiles and decide footprint
//! membership.
//!
//! ## Overview
//! -----------------
//! Two modes are offered, serving two different consumers:
//!
//! * **Single-point** ([`FootprintMatcher::match_single`]): interactive inspection. Every tile
//!   whose center lies **strictly closer** than the threshold is reported, in catalog order.
//!   A position may legitimately sit within the radius of several adjacent or overlapping tiles.
//! * **Batch** ([`FootprintMatcher::match_batch`]): bulk annotation of a table. Each query gets
//!   one decisive answer: its **nearest** tile if that tile is closer than the threshold, the
//!   sentinel (`"-"`, `-10`) otherwise.
//!
//! Falling outside the footprint is data, not an error: single-point matching returns
//! [`SingleMatch::NoFootprintMatch`] and batch matching emits sentinel rows without aborting.
//!
//! ## Threshold
//! -----------------
//! Membership uses a **strict** comparison: `separation < threshold`. The default radius is
//! [`DEFAULT_THRESHOLD_DEG`] (1°).
//!
//! ## Concurrency
//! -----------------
//! The catalog is read-only and each query is independent, so batch matching runs on the
//! `rayon` thread pool. Output order always equals input order.
//!
//! ## Example
//! -----------------
//! ```rust
//! use infoot::catalog::{Catalog, Tile};
//! use infoot::matcher::{FootprintMatcher, QueryPoint, SingleMatch};
//! use infoot::sky::AngleUnit;
//!
//! let catalog = Catalog::from_tiles(vec![Tile::new("T1", 10.0, 0.0, 1).unwrap()]).unwrap();
//! let matcher = FootprintMatcher::new(&catalog).unwrap();
//!
//! let query = QueryPoint::new(150.0, 0.2, AngleUnit::Degree).unwrap();
//! match matcher.match_single(&query) {
//!     SingleMatch::InFootprint(matches) => assert_eq!(matches[0].name(), "T1"),
//!     SingleMatch::NoFootprintMatch => unreachable!(),
//! }
//! ```
use csv::StringRecord;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    catalog::{Catalog, Tile},
    constants::{Degree, StatusCode, DEFAULT_THRESHOLD_DEG, NO_MATCH_STATUS, NO_MATCH_TILE},
    infoot_errors::InfootError,
    sky::{separation_between, AngleUnit, SkyPosition},
};

/// One position to test against the footprint.
///
/// Fields
/// -----------------
/// * `position`: the sky position, RA already normalized to degrees.
/// * `passthrough`: the originating table row, when the query comes from a table. It is never
///   inspected by the matcher and is handed back untouched in [`BatchMatch::query`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPoint {
    pub position: SkyPosition,
    pub passthrough: Option<StringRecord>,
}

impl QueryPoint {
    /// Build a query from a right ascension in `ra_unit` and a declination in degrees.
    pub fn new(ra: f64, dec_deg: Degree, ra_unit: AngleUnit) -> Result<Self, InfootError> {
        Ok(Self::from_position(SkyPosition::new(ra, dec_deg, ra_unit)?))
    }

    pub fn from_position(position: SkyPosition) -> Self {
        QueryPoint {
            position,
            passthrough: None,
        }
    }

    /// Attach the table row this query was read from.
    pub fn with_passthrough(mut self, record: StringRecord) -> Self {
        self.passthrough = Some(record);
        self
    }
}

/// A tile found within the threshold of a single-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMatch<'c> {
    pub tile: &'c Tile,
    pub separation_deg: Degree,
}

impl TileMatch<'_> {
    pub fn name(&self) -> &str {
        self.tile.name()
    }

    pub fn status(&self) -> StatusCode {
        self.tile.status()
    }
}

/// Outcome of a single-point match.
#[derive(Debug, Clone, PartialEq)]
pub enum SingleMatch<'c> {
    /// Every tile closer than the threshold, in catalog order. Never empty.
    InFootprint(Vec<TileMatch<'c>>),
    /// No tile is closer than the threshold.
    NoFootprintMatch,
}

impl<'c> SingleMatch<'c> {
    pub fn is_in_footprint(&self) -> bool {
        matches!(self, SingleMatch::InFootprint(_))
    }

    /// Matching tiles, empty when outside the footprint.
    pub fn matches(&self) -> &[TileMatch<'c>] {
        match self {
            SingleMatch::InFootprint(matches) => matches,
            SingleMatch::NoFootprintMatch => &[],
        }
    }
}

/// Outcome of matching one query of a batch.
///
/// The nearest tile is always known (the catalog is never empty); it only counts as a match
/// when `in_footprint` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchMatch<'c, 'q> {
    pub query: &'q QueryPoint,
    pub nearest: &'c Tile,
    pub nearest_separation_deg: Degree,
    pub in_footprint: bool,
}

impl<'c> BatchMatch<'c, '_> {
    /// The matched tile, if any.
    pub fn matched_tile(&self) -> Option<&'c Tile> {
        self.in_footprint.then_some(self.nearest)
    }

    /// Name written in the `TILE` column: the matched tile or `"-"`.
    pub fn tile_name(&self) -> &'c str {
        self.matched_tile().map_or(NO_MATCH_TILE, |tile| tile.name())
    }

    /// Code written in the `STATUS` column: the matched tile status or `-10`.
    pub fn status(&self) -> StatusCode {
        self.matched_tile().map_or(NO_MATCH_STATUS, |tile| tile.status())
    }
}

/// Matches query positions against a borrowed, non-empty [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct FootprintMatcher<'c> {
    catalog: &'c Catalog,
    threshold_deg: Degree,
}

impl<'c> FootprintMatcher<'c> {
    /// Create a matcher with the default 1° threshold.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: the footprint tiles.
    ///
    /// Return
    /// ----------
    /// * The matcher, or [`InfootError::EmptyCatalog`] if `catalog` has no tiles.
    pub fn new(catalog: &'c Catalog) -> Result<Self, InfootError> {
        if catalog.is_empty() {
            return Err(InfootError::EmptyCatalog);
        }
        Ok(FootprintMatcher {
            catalog,
            threshold_deg: DEFAULT_THRESHOLD_DEG,
        })
    }

    /// Replace the membership radius.
    ///
    /// Return
    /// ----------
    /// * The matcher, or [`InfootError::InvalidThreshold`] unless `threshold_deg` is finite
    ///   and positive.
    pub fn with_threshold(mut self, threshold_deg: Degree) -> Result<Self, InfootError> {
        if !threshold_deg.is_finite() || threshold_deg <= 0.0 {
            return Err(InfootError::InvalidThreshold(threshold_deg));
        }
        self.threshold_deg = threshold_deg;
        Ok(self)
    }

    pub fn threshold_deg(&self) -> Degree {
        self.threshold_deg
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Report every tile closer than the threshold to `query`.
    ///
    /// Arguments
    /// -----------------
    /// * `query`: the position to test.
    ///
    /// Return
    /// ----------
    /// * [`SingleMatch::InFootprint`] with one entry per tile whose separation is strictly below
    ///   the threshold, in catalog order (not sorted by separation, not deduplicated), or
    ///   [`SingleMatch::NoFootprintMatch`].
    pub fn match_single(&self, query: &QueryPoint) -> SingleMatch<'c> {
        let query_vec = query.position.unit_vector();

        let matches: Vec<TileMatch<'c>> = self
            .catalog
            .iter()
            .map(|tile| TileMatch {
                tile,
                separation_deg: separation_between(&query_vec, tile.unit_vector()),
            })
            .filter(|m| m.separation_deg < self.threshold_deg)
            .collect();

        debug!(
            query = %query.position,
            matches = matches.len(),
            threshold_deg = self.threshold_deg,
            "single-point match"
        );

        if matches.is_empty() {
            SingleMatch::NoFootprintMatch
        } else {
            SingleMatch::InFootprint(matches)
        }
    }

    /// Find the nearest tile to `query` and decide membership.
    fn match_nearest<'q>(&self, query: &'q QueryPoint) -> BatchMatch<'c, 'q> {
        let query_vec = query.position.unit_vector();

        // the catalog is non-empty, checked in `new`
        let (nearest, nearest_separation_deg) = self
            .catalog
            .iter()
            .map(|tile| (tile, separation_between(&query_vec, tile.unit_vector())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .expect("catalog is not empty");

        BatchMatch {
            query,
            nearest,
            nearest_separation_deg,
            in_footprint: nearest_separation_deg < self.threshold_deg,
        }
    }

    /// Annotate every query with its nearest tile, or the sentinel when outside the footprint.
    ///
    /// Arguments
    /// -----------------
    /// * `queries`: the positions to test.
    ///
    /// Return
    /// ----------
    /// * Exactly one [`BatchMatch`] per query, in input order. Each result borrows its query, so
    ///   passthrough attributes are carried unmodified.
    pub fn match_batch<'q>(&self, queries: &'q [QueryPoint]) -> Vec<BatchMatch<'c, 'q>> {
        let results: Vec<BatchMatch<'c, 'q>> = queries
            .par_iter()
            .map(|query| self.match_nearest(query))
            .collect();

        let matched = results.iter().filter(|r| r.in_footprint).count();
        info!(
            queries = results.len(),
            matched,
            unmatched = results.len() - matched,
            threshold_deg = self.threshold_deg,
            "batch match done"
        );
        if matched == 0 && !results.is_empty() {
            warn!("no query position falls within the footprint");
        }

        results
    }
}

/// Match a single query against `catalog` with the given threshold.
///
/// See [`FootprintMatcher::match_single`].
pub fn match_single<'c>(
    query: &QueryPoint,
    catalog: &'c Catalog,
    threshold_deg: Degree,
) -> Result<SingleMatch<'c>, InfootError> {
    let matcher = FootprintMatcher::new(catalog)?.with_threshold(threshold_deg)?;
    Ok(matcher.match_single(query))
}

/// Match a batch of queries against `catalog` with the given threshold.
///
/// See [`FootprintMatcher::match_batch`].
pub fn match_batch<'c, 'q>(
    queries: &'q [QueryPoint],
    catalog: &'c Catalog,
    threshold_deg: Degree,
) -> Result<Vec<BatchMatch<'c, 'q>>, InfootError> {
    let matcher = FootprintMatcher::new(catalog)?.with_threshold(threshold_deg)?;
    Ok(matcher.match_batch(queries))
}
