//! # Console reports
//!
//! Display adaptors rendering match outcomes for humans. They borrow the results and write
//! text when used with `{}`; nothing is cloned.
//!
//! - [`SingleMatchReport`]: "In the footprint" followed by a `TILE | STATUS | SEPARATION`
//!   table (via `comfy-table`), or "Not in the footprint...".
//! - [`BatchSummary`]: row counts for a batch run and where the annotated table was written.
//!
//! The status interpretation rule
//! ([`OBSERVED_STATUS_HINT`](crate::constants::OBSERVED_STATUS_HINT)) closes every batch
//! summary, and a single-point report whenever at least one tile matched.
use std::fmt;

use camino::Utf8Path;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
    constants::{is_observed_status, OBSERVED_STATUS_HINT},
    matcher::{BatchMatch, SingleMatch},
    sky::SkyPosition,
};

/// Display adaptor for a single-point match.
pub struct SingleMatchReport<'a, 'c> {
    query: &'a SkyPosition,
    outcome: &'a SingleMatch<'c>,
    precision: usize,
}

impl<'a, 'c> SingleMatchReport<'a, 'c> {
    pub fn new(query: &'a SkyPosition, outcome: &'a SingleMatch<'c>) -> Self {
        SingleMatchReport {
            query,
            outcome,
            precision: 6,
        }
    }

    /// Number of decimals printed for separations (default 6).
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn render_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("TILE"),
            Cell::new("STATUS"),
            Cell::new("SEPARATION [deg]"),
            Cell::new("OBSERVED"),
        ]);

        for m in self.outcome.matches() {
            table.add_row(Row::from(vec![
                Cell::new(m.name()),
                Cell::new(m.status()).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.*}", self.precision, m.separation_deg))
                    .set_alignment(CellAlignment::Right),
                Cell::new(if is_observed_status(m.status()) { "yes" } else { "no" }),
            ]));
        }

        table.to_string()
    }
}

impl fmt::Display for SingleMatchReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Query {}", self.query)?;
        match self.outcome {
            SingleMatch::NoFootprintMatch => writeln!(f, "Not in the footprint..."),
            SingleMatch::InFootprint(_) => {
                writeln!(f, "In the footprint")?;
                writeln!(f, "{}", self.render_table())?;
                writeln!(f, "{OBSERVED_STATUS_HINT}")
            }
        }
    }
}

/// Counts of a batch run, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary<'a> {
    pub rows: usize,
    pub matched: usize,
    pub already_observed: usize,
    pub destination: &'a Utf8Path,
}

impl<'a> BatchSummary<'a> {
    /// Tally batch results written to `destination`.
    pub fn from_results(results: &[BatchMatch], destination: &'a Utf8Path) -> Self {
        let matched = results.iter().filter(|r| r.in_footprint).count();
        let already_observed = results
            .iter()
            .filter(|r| r.in_footprint && is_observed_status(r.status()))
            .count();
        BatchSummary {
            rows: results.len(),
            matched,
            already_observed,
            destination,
        }
    }

    pub fn unmatched(&self) -> usize {
        self.rows - self.matched
    }
}

impl fmt::Display for BatchSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} rows: {} in the footprint ({} already observed), {} outside",
            self.rows,
            self.matched,
            self.already_observed,
            self.unmatched()
        )?;
        writeln!(f, "Your results are within the table {}", self.destination)?;
        writeln!(f, "{OBSERVED_STATUS_HINT}")
    }
}
