use thiserror::Error;

/// Errors raised while loading a tile catalog, reading query tables, or configuring a match.
///
/// A query that falls outside the footprint is **not** an error: single-point matching reports
/// it as [`SingleMatch::NoFootprintMatch`](crate::matcher::SingleMatch::NoFootprintMatch) and
/// batch matching encodes it as a sentinel row.
#[derive(Error, Debug)]
pub enum InfootError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Malformed tile catalog: {0}")]
    MalformedCatalog(String),

    #[error("Invalid angle unit '{0}', expected 'hour' or 'deg'")]
    InvalidAngleUnit(String),

    #[error("The tile catalog contains no tiles")]
    EmptyCatalog,

    #[error("Invalid separation threshold: {0} (must be a finite, positive number of degrees)")]
    InvalidThreshold(f64),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Missing column '{0}' in the coordinates table")]
    MissingColumn(String),

    #[error("Cannot write {results} match results for a table of {rows} rows")]
    ResultLengthMismatch { rows: usize, results: usize },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for InfootError {
    fn eq(&self, other: &Self) -> bool {
        use InfootError::*;
        match (self, other) {
            (ResourceNotFound(a), ResourceNotFound(b)) => a == b,
            (MalformedCatalog(a), MalformedCatalog(b)) => a == b,
            (InvalidAngleUnit(a), InvalidAngleUnit(b)) => a == b,
            (InvalidThreshold(a), InvalidThreshold(b)) => a == b || (a.is_nan() && b.is_nan()),
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (MissingColumn(a), MissingColumn(b)) => a == b,
            (
                ResultLengthMismatch {
                    rows: r1,
                    results: n1,
                },
                ResultLengthMismatch {
                    rows: r2,
                    results: n2,
                },
            ) => r1 == r2 && n1 == n2,

            // wrapped errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (EmptyCatalog, EmptyCatalog) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod infoot_errors_test {
    use super::*;

    #[test]
    fn test_messages_name_the_cause() {
        let err = InfootError::InvalidAngleUnit("radian".into());
        assert_eq!(
            err.to_string(),
            "Invalid angle unit 'radian', expected 'hour' or 'deg'"
        );

        let err = InfootError::MissingColumn("DEC".into());
        assert!(err.to_string().contains("'DEC'"));

        let err = InfootError::ResourceNotFound("tiles_nc.csv".into());
        assert!(err.to_string().ends_with("tiles_nc.csv"));
    }

    #[test]
    fn test_partial_eq() {
        assert_eq!(InfootError::EmptyCatalog, InfootError::EmptyCatalog);
        assert_ne!(
            InfootError::MalformedCatalog("a".into()),
            InfootError::MalformedCatalog("b".into())
        );
        assert_eq!(
            InfootError::InvalidThreshold(f64::NAN),
            InfootError::InvalidThreshold(f64::NAN)
        );
        let io = || InfootError::from(std::io::Error::other("boom"));
        assert_eq!(io(), io());
        assert_ne!(io(), InfootError::EmptyCatalog);
    }
}
