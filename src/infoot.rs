//! # Infoot: catalog and configuration façade
//!
//! This module defines the [`Infoot`] struct, which owns the loaded tile [`Catalog`] together
//! with the [`MatchConfig`] of the run, and exposes the two end-to-end workflows:
//!
//! 1. [`Infoot::check_coordinates`]: parse an `"ra,dec"` string and match it in
//!    single-point mode.
//! 2. [`Infoot::check_table`]: read a coordinates table, match every row in batch mode, and
//!    write `<stem>_matched.<ext>` next to it.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use infoot::config::MatchConfig;
//! use infoot::infoot::Infoot;
//!
//! let config = MatchConfig::builder()
//!     .catalog_path("tiles_nc.csv")
//!     .ra_unit_str("hour")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let infoot = Infoot::new(config).unwrap();
//!
//! let (position, outcome) = infoot.check_coordinates("10:00:00,-00:30:00").unwrap();
//! println!("{position}: in footprint = {}", outcome.is_in_footprint());
//! ```
//!
//! ## Errors
//!
//! Loading fails fast: a missing or malformed catalog, or an empty one, is reported by
//! [`Infoot::new`] before any query is looked at.
use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    catalog::Catalog,
    config::MatchConfig,
    conversion::parse_coordinate_pair,
    infoot_errors::InfootError,
    matcher::{FootprintMatcher, QueryPoint, SingleMatch},
    query_table::{matched_output_path, QueryTable},
    report::BatchSummary,
    sky::SkyPosition,
};

/// Summary of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOutcome {
    pub destination: Utf8PathBuf,
    pub rows: usize,
    pub matched: usize,
    pub already_observed: usize,
}

impl TableOutcome {
    pub fn summary(&self) -> BatchSummary<'_> {
        BatchSummary {
            rows: self.rows,
            matched: self.matched,
            already_observed: self.already_observed,
            destination: &self.destination,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Infoot {
    config: MatchConfig,
    catalog: Catalog,
}

impl Infoot {
    /// Load the catalog named by `config`.
    ///
    /// Arguments
    /// -----------------
    /// * `config`: a validated run configuration.
    ///
    /// Return
    /// ----------
    /// * The façade, or the catalog loading error, or [`InfootError::EmptyCatalog`].
    pub fn new(config: MatchConfig) -> Result<Self, InfootError> {
        let catalog = Catalog::load(config.catalog_path())?;
        Self::with_catalog(config, catalog)
    }

    /// Use a catalog already in memory instead of loading `config.catalog_path`.
    pub fn with_catalog(config: MatchConfig, catalog: Catalog) -> Result<Self, InfootError> {
        let infoot = Infoot { config, catalog };
        // reject empty catalogs and bad thresholds up front
        infoot.matcher()?;
        Ok(infoot)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// A matcher over the catalog using the configured threshold.
    pub fn matcher(&self) -> Result<FootprintMatcher<'_>, InfootError> {
        FootprintMatcher::new(&self.catalog)?.with_threshold(self.config.threshold_deg)
    }

    /// Match one `"ra,dec"` pair in single-point mode.
    ///
    /// Arguments
    /// -----------------
    /// * `coordinates`: RA in the configured unit and DEC in degrees, comma separated, decimal
    ///   or sexagesimal.
    ///
    /// Return
    /// ----------
    /// * The parsed position and the outcome, or [`InfootError::InvalidCoordinate`].
    pub fn check_coordinates(
        &self,
        coordinates: &str,
    ) -> Result<(SkyPosition, SingleMatch<'_>), InfootError> {
        let position = parse_coordinate_pair(coordinates, self.config.ra_unit)?;
        let query = QueryPoint::from_position(position);
        Ok((position, self.matcher()?.match_single(&query)))
    }

    /// Match every row of a coordinates table and write the annotated copy.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: the coordinates table (`RA` in the configured unit, `DEC` in degrees).
    ///
    /// Return
    /// ----------
    /// * Where the output went and how many rows matched, or the first reading / writing error.
    pub fn check_table(&self, path: &Utf8Path) -> Result<TableOutcome, InfootError> {
        let table = QueryTable::read(path, self.config.ra_unit)?;
        let results = self.matcher()?.match_batch(table.queries());

        let destination = matched_output_path(path);
        table.write_matched(&results, &destination)?;

        let (rows, matched, already_observed) = {
            let summary = BatchSummary::from_results(&results, &destination);
            (summary.rows, summary.matched, summary.already_observed)
        };
        Ok(TableOutcome {
            destination,
            rows,
            matched,
            already_observed,
        })
    }
}
