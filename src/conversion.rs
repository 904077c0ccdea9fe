//! Parsing of right ascension / declination strings.
//!
//! Accepted forms, for both axes:
//! - decimal numbers: `150.25`, `-2.5`, `1e1`
//! - sexagesimal with colon or blank separators: `10:00:00`, `-05 30 00.5`, `10:20`
//! - sexagesimal with unit letters: `10h20m30.5s`, `-5d30m00s`, `-5°30'00"`
//!
//! Without a unit letter the leading sexagesimal field is in the unit of the axis (hours or
//! degrees for RA, as declared by an [`AngleUnit`]; always degrees for DEC). A unit letter
//! written in the string (`h` for hours, `d` or `°` for degrees) takes precedence over the
//! declared RA unit. DEC only accepts degrees, so `5h30m` is rejected as a declination.
//! A leading sign applies to the whole value, so `-00:30:00` is `-0.5`.
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    constants::Degree,
    infoot_errors::InfootError,
    sky::{AngleUnit, SkyPosition},
};

static SEXAGESIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^([+-]?)(\d{1,3})(?:\s*:\s*|\s+|([hHdD°])\s*)(\d{1,2})(?:(?:\s*:\s*|\s+|[mM']\s*)(\d{1,2}(?:\.\d*)?)\s*[sS"]?|[mM'])?$"#,
    )
    .expect("sexagesimal pattern is valid")
});

/// An angle read from text, with the unit written next to it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ParsedAngle {
    value: f64,
    explicit_unit: Option<AngleUnit>,
}

/// Parse a sexagesimal string into a signed decimal value in the unit of its leading field.
///
/// Arguments
/// ---------
/// * `field`: a string such as `"10:20:30.5"` or `"-5d30m"`
///
/// Returns
/// -------
/// * the decimal value and the unit letter of the leading field (`h`, `d`, `°`) when one is
///   written, or `None` if the string is not sexagesimal or a minutes/seconds field is not
///   below 60
fn parse_sexagesimal(field: &str) -> Option<ParsedAngle> {
    let caps = SEXAGESIMAL.captures(field)?;

    let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
    let whole: f64 = caps[2].parse().ok()?;
    let explicit_unit = caps.get(3).map(|m| match m.as_str() {
        "h" | "H" => AngleUnit::Hour,
        _ => AngleUnit::Degree,
    });
    let minutes: f64 = caps[4].parse().ok()?;
    let seconds: f64 = match caps.get(5) {
        Some(s) => s.as_str().parse().ok()?,
        None => 0.0,
    };

    if minutes >= 60.0 || seconds >= 60.0 {
        return None;
    }

    Some(ParsedAngle {
        value: sign * (whole + minutes / 60.0 + seconds / 3600.0),
        explicit_unit,
    })
}

/// Parse a single angle, decimal first, then sexagesimal.
fn parse_angle(field: &str) -> Option<ParsedAngle> {
    let field = field.trim();
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(ParsedAngle {
            value,
            explicit_unit: None,
        }),
        Ok(_) => None,
        Err(_) => parse_sexagesimal(field),
    }
}

/// Parse a right ascension string to degrees
///
/// Arguments
/// ---------
/// * `ra`: the right ascension, decimal or sexagesimal
/// * `unit`: the unit of the value when the string does not carry its own unit letter
///
/// Returns
/// -------
/// * the right ascension in degrees, or [`InfootError::InvalidCoordinate`]
pub fn parse_ra_to_deg(ra: &str, unit: AngleUnit) -> Result<Degree, InfootError> {
    let angle = parse_angle(ra)
        .ok_or_else(|| InfootError::InvalidCoordinate(format!("cannot parse RA '{ra}'")))?;
    Ok(angle.explicit_unit.unwrap_or(unit).to_degrees(angle.value))
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `dec`: the declination in degrees, decimal or sexagesimal
///
/// Returns
/// -------
/// * the declination in degrees, or [`InfootError::InvalidCoordinate`] if the string does not
///   parse or is written in hours
pub fn parse_dec_to_deg(dec: &str) -> Result<Degree, InfootError> {
    let angle = parse_angle(dec)
        .ok_or_else(|| InfootError::InvalidCoordinate(format!("cannot parse DEC '{dec}'")))?;
    if angle.explicit_unit == Some(AngleUnit::Hour) {
        return Err(InfootError::InvalidCoordinate(format!(
            "DEC '{dec}' is written in hours, expected degrees"
        )));
    }
    Ok(angle.value)
}

/// Parse an `"ra,dec"` pair into a [`SkyPosition`].
///
/// Arguments
/// ---------
/// * `coordinates`: right ascension and declination separated by a comma
/// * `ra_unit`: the unit of the right ascension
///
/// Returns
/// -------
/// * the position, or [`InfootError::InvalidCoordinate`] if the comma is missing, either
///   side does not parse, or the declination is out of range
pub fn parse_coordinate_pair(
    coordinates: &str,
    ra_unit: AngleUnit,
) -> Result<SkyPosition, InfootError> {
    let (ra, dec) = coordinates.split_once(',').ok_or_else(|| {
        InfootError::InvalidCoordinate(format!(
            "'{coordinates}' is not a comma separated RA,DEC pair"
        ))
    })?;

    let ra_deg = parse_ra_to_deg(ra, ra_unit)?;
    let dec_deg = parse_dec_to_deg(dec)?;
    SkyPosition::from_degrees(ra_deg, dec_deg)
}
