//! Shared helpers for the delimited text tables read and written by the crate.
//!
//! Tables are plain text with a header line. The delimiter is sniffed from the header:
//! the first of `,`, `\t`, `;` found there wins, comma otherwise.
use std::{
    fs::File,
    io::{BufRead, BufReader},
};

use camino::Utf8Path;
use csv::{Reader, ReaderBuilder, Trim};

use crate::infoot_errors::InfootError;

const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b'\t', b';'];

/// Guess the field delimiter from a header line.
pub(crate) fn sniff_delimiter(header_line: &str) -> u8 {
    CANDIDATE_DELIMITERS
        .into_iter()
        .find(|d| header_line.as_bytes().contains(d))
        .unwrap_or(b',')
}

/// Open a delimited table for reading with a sniffed delimiter.
///
/// Arguments
/// -----------------
/// * `path`: the table file.
/// * `trim`: which fields get surrounding whitespace removed.
///
/// Return
/// ----------
/// * A `csv` reader positioned before the header and the delimiter in use, or
///   [`InfootError::ResourceNotFound`] when `path` is not an existing file.
pub(crate) fn open_table(path: &Utf8Path, trim: Trim) -> Result<(Reader<File>, u8), InfootError> {
    if !path.is_file() {
        return Err(InfootError::ResourceNotFound(path.to_string()));
    }

    let mut header_line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut header_line)?;
    let delimiter = sniff_delimiter(&header_line);

    let reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(trim)
        .from_path(path)?;
    Ok((reader, delimiter))
}

#[cfg(test)]
mod tabular_test {
    use super::*;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("NAME,RA,DEC,STATUS\n"), b',');
        assert_eq!(sniff_delimiter("NAME\tRA\tDEC\tSTATUS\n"), b'\t');
        assert_eq!(sniff_delimiter("NAME;RA;DEC;STATUS\n"), b';');
        assert_eq!(sniff_delimiter("RA"), b',');
    }

    #[test]
    fn test_open_missing_table() {
        let err = open_table(Utf8Path::new("does/not/exist.csv"), Trim::All).unwrap_err();
        assert_eq!(
            err,
            InfootError::ResourceNotFound("does/not/exist.csv".into())
        );
    }
}
