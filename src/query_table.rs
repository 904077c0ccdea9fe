//! # Coordinate tables for batch matching
//!
//! Read a delimited table of query positions, keep every row verbatim, and write it back with
//! the match outcome appended.
//!
//! ## Input
//! -----------------
//! A header line plus one row per query. Columns `RA` and `DEC` are required
//! (case-sensitive); any other column is passed through untouched. `RA` is interpreted in the
//! caller's [`AngleUnit`], `DEC` in degrees; both accept decimal or sexagesimal values (see
//! [`conversion`](crate::conversion)).
//!
//! ## Output
//! -----------------
//! The same rows, same delimiter, with two more columns:
//! * `TILE`: matched tile name, or `"-"`;
//! * `STATUS`: matched tile status, or `-10`.
//!
//! Columns already named `TILE` or `STATUS` in the input are overwritten in place. The output
//! path is derived with [`matched_output_path`] and any existing file there is replaced.
use camino::{Utf8Path, Utf8PathBuf};
use csv::{StringRecord, Trim, WriterBuilder};
use itertools::Itertools;
use tracing::info;

use crate::{
    constants::{MATCHED_SUFFIX, STATUS_COLUMN, TILE_COLUMN},
    conversion::{parse_dec_to_deg, parse_ra_to_deg},
    infoot_errors::InfootError,
    matcher::{BatchMatch, QueryPoint},
    sky::{AngleUnit, SkyPosition},
    tabular::open_table,
};

/// Name of the right ascension column in a coordinates table.
pub const RA_COLUMN: &str = "RA";
/// Name of the declination column in a coordinates table.
pub const DEC_COLUMN: &str = "DEC";

/// A coordinates table loaded in memory.
#[derive(Debug, Clone)]
pub struct QueryTable {
    headers: StringRecord,
    delimiter: u8,
    queries: Vec<QueryPoint>,
}

/// Build the output path for a coordinates table: same directory, base name suffixed with
/// `_matched`, same extension.
///
/// Arguments
/// -----------------
/// * `input`: the coordinates table path.
///
/// Return
/// ----------
/// * `coords.csv` → `coords_matched.csv`, `data/run1` → `data/run1_matched`.
pub fn matched_output_path(input: &Utf8Path) -> Utf8PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{MATCHED_SUFFIX}.{ext}"),
        None => format!("{stem}{MATCHED_SUFFIX}"),
    };
    input.with_file_name(file_name)
}

/// Position of a required column in the header.
fn column_index(headers: &StringRecord, name: &str) -> Result<usize, InfootError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| InfootError::MissingColumn(name.to_string()))
}

impl QueryTable {
    /// Read a coordinates table.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: the table file.
    /// * `ra_unit`: unit of the `RA` column.
    ///
    /// Return
    /// ----------
    /// * The table, or
    ///     - [`InfootError::ResourceNotFound`] if `path` does not exist,
    ///     - [`InfootError::MissingColumn`] if `RA` or `DEC` is absent,
    ///     - [`InfootError::InvalidCoordinate`] naming the row whose position does not parse,
    ///     - [`InfootError::CsvError`] for structural problems (e.g. uneven row lengths).
    pub fn read(path: &Utf8Path, ra_unit: AngleUnit) -> Result<Self, InfootError> {
        let (mut reader, delimiter) = open_table(path, Trim::Headers)?;

        let headers = reader.headers()?.clone();
        let ra_idx = column_index(&headers, RA_COLUMN)?;
        let dec_idx = column_index(&headers, DEC_COLUMN)?;

        let mut queries = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let position = Self::row_position(&record, ra_idx, dec_idx, ra_unit).map_err(
                |e| match e {
                    InfootError::InvalidCoordinate(msg) => {
                        InfootError::InvalidCoordinate(format!("{path}: row {}: {msg}", row + 1))
                    }
                    other => other,
                },
            )?;
            queries.push(QueryPoint::from_position(position).with_passthrough(record));
        }

        info!(%path, rows = queries.len(), %ra_unit, "coordinates table loaded");
        Ok(QueryTable {
            headers,
            delimiter,
            queries,
        })
    }

    fn row_position(
        record: &StringRecord,
        ra_idx: usize,
        dec_idx: usize,
        ra_unit: AngleUnit,
    ) -> Result<SkyPosition, InfootError> {
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let ra_deg = parse_ra_to_deg(field(ra_idx), ra_unit)?;
        let dec_deg = parse_dec_to_deg(field(dec_idx))?;
        SkyPosition::from_degrees(ra_deg, dec_deg)
    }

    /// Queries in row order, each carrying its row as passthrough.
    pub fn queries(&self) -> &[QueryPoint] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Header of the output table: input columns, then `TILE` and `STATUS` unless already
    /// present. Returns the header with the two column positions.
    fn output_headers(&self) -> (StringRecord, usize, usize) {
        let mut headers = self.headers.clone();
        let mut locate = |name: &str| match headers.iter().position(|h| h == name) {
            Some(idx) => idx,
            None => {
                headers.push_field(name);
                headers.len() - 1
            }
        };
        let tile_idx = locate(TILE_COLUMN);
        let status_idx = locate(STATUS_COLUMN);
        (headers, tile_idx, status_idx)
    }

    /// Write the table with the match outcome of every row.
    ///
    /// Arguments
    /// -----------------
    /// * `results`: one result per row, in row order, as returned by
    ///   [`FootprintMatcher::match_batch`](crate::matcher::FootprintMatcher::match_batch) on
    ///   [`QueryTable::queries`].
    /// * `dest`: output path, overwritten if it exists.
    ///
    /// Return
    /// ----------
    /// * `Ok(())`, or [`InfootError::ResultLengthMismatch`] when `results` does not have one
    ///   entry per row, or an I/O / CSV error.
    pub fn write_matched(
        &self,
        results: &[BatchMatch],
        dest: &Utf8Path,
    ) -> Result<(), InfootError> {
        if results.len() != self.queries.len() {
            return Err(InfootError::ResultLengthMismatch {
                rows: self.queries.len(),
                results: results.len(),
            });
        }

        let (headers, tile_idx, status_idx) = self.output_headers();
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(dest)?;
        writer.write_record(&headers)?;

        for (query, result) in self.queries.iter().zip(results) {
            let row = query.passthrough.as_ref();
            let status = result.status().to_string();
            let fields = (0..headers.len()).map(|idx| {
                if idx == tile_idx {
                    result.tile_name()
                } else if idx == status_idx {
                    status.as_str()
                } else {
                    row.and_then(|record| record.get(idx)).unwrap_or_default()
                }
            });
            writer.write_record(fields)?;
        }
        writer.flush()?;

        info!(
            %dest,
            rows = results.len(),
            columns = %headers.iter().join(","),
            "matched table written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod query_table_test {
    use super::*;
    use crate::catalog::{Catalog, Tile};
    use crate::matcher::FootprintMatcher;
    use std::fs;

    fn write_table(dir: &tempfile::TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_matched_output_path() {
        assert_eq!(
            matched_output_path(Utf8Path::new("coords.csv")),
            Utf8PathBuf::from("coords_matched.csv")
        );
        assert_eq!(
            matched_output_path(Utf8Path::new("/data/run.v2/targets.txt")),
            Utf8PathBuf::from("/data/run.v2/targets_matched.txt")
        );
        assert_eq!(
            matched_output_path(Utf8Path::new("data/targets")),
            Utf8PathBuf::from("data/targets_matched")
        );
    }

    #[test]
    fn test_read_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "coords.csv",
            "ID,RA,DEC,MAG\nobj1,10:00:00,-00:30:00, 17.5\nobj2,10.5,1.0,18.0\n",
        );

        let table = QueryTable::read(&path, AngleUnit::Hour).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.queries()[0].position.ra_deg(), 150.0);
        assert_eq!(table.queries()[0].position.dec_deg(), -0.5);
        assert_eq!(table.queries()[1].position.ra_deg(), 157.5);

        // passthrough keeps the raw field, surrounding blank included
        let row = table.queries()[0].passthrough.as_ref().unwrap();
        assert_eq!(row.get(3), Some(" 17.5"));
    }

    #[test]
    fn test_read_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "coords.csv", "ID,ra,DEC\nobj1,10.0,0.0\n");

        assert_eq!(
            QueryTable::read(&path, AngleUnit::Hour).unwrap_err(),
            InfootError::MissingColumn("RA".into())
        );
    }

    #[test]
    fn test_read_bad_coordinate() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "coords.csv", "RA,DEC\n10.0,0.0\n10.0,abc\n");

        match QueryTable::read(&path, AngleUnit::Hour) {
            Err(InfootError::InvalidCoordinate(msg)) => {
                assert!(msg.contains("row 2"));
                assert!(msg.contains("'abc'"));
            }
            other => panic!("expected InvalidCoordinate, got {other:?}"),
        }
    }

    #[test]
    fn test_write_matched_replaces_existing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            &dir,
            "coords.csv",
            "STATUS,RA,DEC\nold,10.0,0.0\nold,3.0,-60.0\n",
        );
        let catalog = Catalog::from_tiles(vec![Tile::new("T1", 10.0, 0.1, 4).unwrap()]).unwrap();

        let table = QueryTable::read(&path, AngleUnit::Hour).unwrap();
        let matcher = FootprintMatcher::new(&catalog).unwrap();
        let results = matcher.match_batch(table.queries());

        let dest = matched_output_path(&path);
        fs::write(&dest, "stale content").unwrap();
        table.write_matched(&results, &dest).unwrap();

        let written = fs::read_to_string(&dest).unwrap();
        assert_eq!(written, "STATUS,RA,DEC,TILE\n4,10.0,0.0,T1\n-10,3.0,-60.0,-\n");
    }

    #[test]
    fn test_write_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(&dir, "coords.csv", "RA,DEC\n10.0,0.0\n");
        let table = QueryTable::read(&path, AngleUnit::Hour).unwrap();

        let dest = Utf8PathBuf::from_path_buf(dir.path().join("out.csv")).unwrap();
        let err = table.write_matched(&[], &dest).unwrap_err();
        assert_eq!(
            err,
            InfootError::ResultLengthMismatch {
                rows: 1,
                results: 0
            }
        );
    }
}
