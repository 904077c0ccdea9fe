//! # Tile catalog
//!
//! This module defines the survey footprint as an ordered, immutable collection of [`Tile`]s
//! and the loader that reads it from a delimited text table.
//!
//! ## File format
//! -----------------
//! A header line followed by one row per tile. Required columns (case-sensitive, any order,
//! extra columns ignored):
//!
//! | Column   | Content                                    |
//! |----------|--------------------------------------------|
//! | `NAME`   | unique tile identifier                     |
//! | `RA`     | tile center right ascension, **hours**     |
//! | `DEC`    | tile center declination, **degrees**       |
//! | `STATUS` | integer observation state                  |
//!
//! ## Invariants
//! -----------------
//! - Tile names are unique.
//! - The catalog keeps file order; single-point matches are reported in that order.
//! - A [`Catalog`] is never mutated after construction and can be shared across threads.
//!
//! ## Example
//! -----------------
//! ```rust,no_run
//! use camino::Utf8Path;
//! use infoot::catalog::Catalog;
//!
//! let catalog = Catalog::load(Utf8Path::new("tiles_nc.csv")).unwrap();
//! println!("{} tiles", catalog.len());
//! ```
use std::collections::HashMap;

use camino::Utf8Path;
use csv::Trim;
use nalgebra::Vector3;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    constants::{Degree, Hour, StatusCode},
    infoot_errors::InfootError,
    sky::SkyPosition,
    tabular::open_table,
};

/// Columns a tile catalog must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = ["NAME", "RA", "DEC", "STATUS"];

/// One row of the catalog table, as stored on disk.
#[derive(Debug, Deserialize)]
struct TileRecord {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "RA")]
    ra: Hour,
    #[serde(rename = "DEC")]
    dec: Degree,
    #[serde(rename = "STATUS")]
    status: StatusCode,
}

/// One footprint region: a named tile center with its observation status.
///
/// Fields are read-only once built: the unit vector of the center is cached for matching and
/// must stay in step with `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    name: String,
    position: SkyPosition,
    status: StatusCode,
    unit_vector: Vector3<f64>,
}

impl Tile {
    /// Create a tile from a center given with RA in hours and DEC in degrees.
    ///
    /// Arguments
    /// ---------
    /// * `name`: the tile identifier
    /// * `ra_hour`: right ascension of the tile center, in hours
    /// * `dec_deg`: declination of the tile center, in degrees
    /// * `status`: the observation status code
    ///
    /// Return
    /// ------
    /// * the tile, or [`InfootError::InvalidCoordinate`] if the center is not a valid position
    pub fn new(
        name: impl Into<String>,
        ra_hour: Hour,
        dec_deg: Degree,
        status: StatusCode,
    ) -> Result<Self, InfootError> {
        let position = SkyPosition::from_hours(ra_hour, dec_deg)?;
        Ok(Tile {
            name: name.into(),
            position,
            status,
            unit_vector: position.unit_vector(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Center of the tile.
    pub fn position(&self) -> &SkyPosition {
        &self.position
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Unit vector of the tile center, cached at construction.
    pub(crate) fn unit_vector(&self) -> &Vector3<f64> {
        &self.unit_vector
    }
}

/// The reference footprint: tiles in file order, plus a name index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tiles: Vec<Tile>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from tiles already in memory.
    ///
    /// Arguments
    /// ---------
    /// * `tiles`: the tiles, in the order matches should be reported
    ///
    /// Return
    /// ------
    /// * the catalog, or [`InfootError::MalformedCatalog`] if two tiles share a name
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, InfootError> {
        let mut by_name = HashMap::with_capacity(tiles.len());
        for (idx, tile) in tiles.iter().enumerate() {
            if by_name.insert(tile.name.clone(), idx).is_some() {
                return Err(InfootError::MalformedCatalog(format!(
                    "duplicate tile name '{}'",
                    tile.name
                )));
            }
        }
        Ok(Catalog { tiles, by_name })
    }

    /// Load a tile catalog from a delimited text table.
    ///
    /// Arguments
    /// ---------
    /// * `path`: the catalog file (columns `NAME`, `RA` [hours], `DEC` [deg], `STATUS`)
    ///
    /// Return
    /// ------
    /// * the catalog, or
    ///     - [`InfootError::ResourceNotFound`] if `path` does not exist,
    ///     - [`InfootError::MalformedCatalog`] if a required column is missing, a row does not
    ///       parse, a tile center is not a valid position, or a name is duplicated.
    ///
    /// A table with a header and no rows loads as an empty catalog; matching rejects it later
    /// with [`InfootError::EmptyCatalog`].
    pub fn load(path: &Utf8Path) -> Result<Self, InfootError> {
        let (mut reader, _) = open_table(path, Trim::All)?;

        let headers = reader.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|col| !headers.iter().any(|h| h == **col))
        {
            return Err(InfootError::MalformedCatalog(format!(
                "{path}: missing required column '{missing}'"
            )));
        }

        let mut tiles = Vec::new();
        for (row, record) in reader.deserialize::<TileRecord>().enumerate() {
            let record = record.map_err(|e| {
                debug!(%path, row = row + 1, error = %e, "rejecting catalog row");
                InfootError::MalformedCatalog(format!("{path}: row {}: {e}", row + 1))
            })?;

            let tile = Tile::new(record.name, record.ra, record.dec, record.status).map_err(
                |e| InfootError::MalformedCatalog(format!("{path}: row {}: {e}", row + 1)),
            )?;
            tiles.push(tile);
        }

        let catalog = Catalog::from_tiles(tiles).map_err(|e| match e {
            InfootError::MalformedCatalog(msg) => {
                InfootError::MalformedCatalog(format!("{path}: {msg}"))
            }
            other => other,
        })?;

        info!(%path, tiles = catalog.len(), "tile catalog loaded");
        Ok(catalog)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look a tile up by name.
    pub fn get(&self, name: &str) -> Option<&Tile> {
        self.by_name.get(name).map(|&idx| &self.tiles[idx])
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
