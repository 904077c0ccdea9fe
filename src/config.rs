//! Run configuration: which catalog to load, the membership radius, and the RA unit of the
//! query side.
//!
//! The catalog path is always explicit. There is no installation-relative default file;
//! front ends choose where the path comes from (flag, environment, working directory).
use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    constants::{Degree, DEFAULT_THRESHOLD_DEG},
    infoot_errors::InfootError,
    sky::AngleUnit,
};

/// Catalog file looked up in the working directory when nothing else is configured.
pub const DEFAULT_CATALOG_FILE: &str = "tiles_nc.csv";

/// Environment variable that front ends read the catalog path from.
pub const CATALOG_ENV_VAR: &str = "INFOOT_CATALOG";

/// Validated configuration of a matching run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub catalog_path: Utf8PathBuf,
    pub threshold_deg: Degree,
    pub ra_unit: AngleUnit,
}

impl MatchConfig {
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::new()
    }

    pub fn catalog_path(&self) -> &Utf8Path {
        &self.catalog_path
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            catalog_path: Utf8PathBuf::from(DEFAULT_CATALOG_FILE),
            threshold_deg: DEFAULT_THRESHOLD_DEG,
            ra_unit: AngleUnit::Hour,
        }
    }
}

/// Builder for [`MatchConfig`], with validation.
#[derive(Debug, Clone)]
pub struct MatchConfigBuilder {
    config: MatchConfig,
}

impl Default for MatchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchConfigBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            config: MatchConfig::default(),
        }
    }

    pub fn catalog_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.config.catalog_path = path.into();
        self
    }

    pub fn threshold_deg(mut self, v: Degree) -> Self {
        self.config.threshold_deg = v;
        self
    }

    pub fn ra_unit(mut self, unit: AngleUnit) -> Self {
        self.config.ra_unit = unit;
        self
    }

    /// Set the RA unit from a token such as `"hour"` or `"deg"`.
    pub fn ra_unit_str(self, token: &str) -> Result<Self, InfootError> {
        Ok(self.ra_unit(token.parse()?))
    }

    /// Validate and return the configuration.
    ///
    /// Return
    /// ----------
    /// * The configuration, or [`InfootError::InvalidThreshold`] unless the threshold is finite
    ///   and positive.
    pub fn build(self) -> Result<MatchConfig, InfootError> {
        let threshold = self.config.threshold_deg;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(InfootError::InvalidThreshold(threshold));
        }
        Ok(self.config)
    }
}
