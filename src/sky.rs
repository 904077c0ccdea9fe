//! # Sky positions and great-circle separation
//!
//! This module defines the [`SkyPosition`] type (an ICRS right ascension / declination pair,
//! always stored in **degrees**) and the [`AngleUnit`] convention used to interpret the right
//! ascension supplied by callers.
//!
//! ## Units & Conventions
//! -----------------
//! - **Right ascension** is accepted in **hours** (`1h = 15°`) or **degrees**, as declared by an
//!   [`AngleUnit`], and normalized to degrees in `[0, 360)` on construction.
//! - **Declination** is always in **degrees**, within `[-90, +90]`.
//! - **Separations** are returned in **degrees**, within `[0, 180]`.
//!
//! ## Separation formula
//! -----------------
//! Both points are projected onto the unit sphere and the angle between the two unit vectors is
//! computed as `atan2(|a × b|, a · b)`. This is the vector form of the Vincenty formula: it stays
//! accurate for coincident, nearby, and antipodal points, where the spherical law of cosines
//! loses precision.
//!
//! The formula is exactly symmetric in its two arguments and returns exactly `0` for identical
//! positions, since the cross product of a vector with itself cancels term by term.
use std::{fmt, str::FromStr};

use nalgebra::Vector3;

use crate::{
    constants::{Degree, Hour, DEG_PER_HOUR, RADEG},
    infoot_errors::InfootError,
};

/// Unit used to express a right ascension.
///
/// The catalog side always uses [`AngleUnit::Hour`]; the query side is declared by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleUnit {
    /// Hour angle, a full circle is 24 hours.
    #[default]
    Hour,
    /// Degrees, a full circle is 360 degrees.
    Degree,
}

impl AngleUnit {
    /// Convert a right ascension expressed in this unit to degrees.
    pub fn to_degrees(self, value: f64) -> Degree {
        match self {
            AngleUnit::Hour => value * DEG_PER_HOUR,
            AngleUnit::Degree => value,
        }
    }
}

impl FromStr for AngleUnit {
    type Err = InfootError;

    /// Parse a unit token.
    ///
    /// Accepted tokens (case-insensitive): `hour`, `hours`, `h`, `hourangle` for
    /// [`AngleUnit::Hour`]; `deg`, `degree`, `degrees`, `d` for [`AngleUnit::Degree`].
    /// Anything else is an [`InfootError::InvalidAngleUnit`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" | "hours" | "h" | "hourangle" => Ok(AngleUnit::Hour),
            "deg" | "degree" | "degrees" | "d" => Ok(AngleUnit::Degree),
            _ => Err(InfootError::InvalidAngleUnit(s.to_string())),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleUnit::Hour => write!(f, "hour"),
            AngleUnit::Degree => write!(f, "deg"),
        }
    }
}

/// A point on the celestial sphere (ICRS), stored in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPosition {
    ra_deg: Degree,
    dec_deg: Degree,
}

impl SkyPosition {
    /// Build a position from a right ascension in `ra_unit` and a declination in degrees.
    ///
    /// Arguments
    /// -----------------
    /// * `ra`: right ascension, expressed in `ra_unit`.
    /// * `dec_deg`: declination in degrees.
    /// * `ra_unit`: unit of `ra`.
    ///
    /// Return
    /// ----------
    /// * The position with RA normalized to `[0, 360)` degrees, or
    ///   [`InfootError::InvalidCoordinate`] if a value is not finite or the declination lies
    ///   outside `[-90, +90]`.
    pub fn new(ra: f64, dec_deg: Degree, ra_unit: AngleUnit) -> Result<Self, InfootError> {
        if !ra.is_finite() || !dec_deg.is_finite() {
            return Err(InfootError::InvalidCoordinate(format!(
                "non-finite value (ra = {ra}, dec = {dec_deg})"
            )));
        }
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(InfootError::InvalidCoordinate(format!(
                "declination {dec_deg} is outside [-90, 90] degrees"
            )));
        }

        let ra_deg = ra_unit.to_degrees(ra).rem_euclid(360.0);
        Ok(SkyPosition { ra_deg, dec_deg })
    }

    /// Build a position from a right ascension in hours.
    pub fn from_hours(ra_hour: Hour, dec_deg: Degree) -> Result<Self, InfootError> {
        Self::new(ra_hour, dec_deg, AngleUnit::Hour)
    }

    /// Build a position from a right ascension in degrees.
    pub fn from_degrees(ra_deg: Degree, dec_deg: Degree) -> Result<Self, InfootError> {
        Self::new(ra_deg, dec_deg, AngleUnit::Degree)
    }

    /// Right ascension in degrees, within `[0, 360)`.
    pub fn ra_deg(&self) -> Degree {
        self.ra_deg
    }

    /// Right ascension in hours, within `[0, 24)`.
    pub fn ra_hour(&self) -> Hour {
        self.ra_deg / DEG_PER_HOUR
    }

    pub fn dec_deg(&self) -> Degree {
        self.dec_deg
    }

    /// Cartesian unit vector pointing at this position (equatorial frame).
    pub fn unit_vector(&self) -> Vector3<f64> {
        let (sin_ra, cos_ra) = (self.ra_deg * RADEG).sin_cos();
        let (sin_dec, cos_dec) = (self.dec_deg * RADEG).sin_cos();
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
    }

    /// Great-circle separation to `other`, in degrees.
    pub fn separation(&self, other: &SkyPosition) -> Degree {
        separation_between(&self.unit_vector(), &other.unit_vector())
    }
}

impl fmt::Display for SkyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(RA = {:.6}°, DEC = {:+.6}°)", self.ra_deg, self.dec_deg)
    }
}

/// Angle between two unit vectors, in degrees within `[0, 180]`.
///
/// Arguments
/// -----------------
/// * `a`, `b`: unit vectors, typically from [`SkyPosition::unit_vector`].
///
/// Return
/// ----------
/// * `atan2(|a × b|, a · b)` converted to degrees.
#[inline]
pub fn separation_between(a: &Vector3<f64>, b: &Vector3<f64>) -> Degree {
    let sin_sep = a.cross(b).norm();
    let cos_sep = a.dot(b);
    sin_sep.atan2(cos_sep).to_degrees().clamp(0.0, 180.0)
}

/// Great-circle separation between two `(ra, dec)` pairs given in degrees.
///
/// Arguments
/// -----------------
/// * `ra1_deg`, `dec1_deg`: first position, degrees.
/// * `ra2_deg`, `dec2_deg`: second position, degrees.
///
/// Return
/// ----------
/// * The separation in degrees, within `[0, 180]`.
pub fn angular_separation_deg(
    ra1_deg: Degree,
    dec1_deg: Degree,
    ra2_deg: Degree,
    dec2_deg: Degree,
) -> Degree {
    let unit = |ra: Degree, dec: Degree| {
        let (sin_ra, cos_ra) = (ra * RADEG).sin_cos();
        let (sin_dec, cos_dec) = (dec * RADEG).sin_cos();
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
    };
    separation_between(&unit(ra1_deg, dec1_deg), &unit(ra2_deg, dec2_deg))
}

#[cfg(test)]
mod sky_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_angle_unit_from_str() {
        assert_eq!("hour".parse::<AngleUnit>().unwrap(), AngleUnit::Hour);
        assert_eq!("HOUR".parse::<AngleUnit>().unwrap(), AngleUnit::Hour);
        assert_eq!("deg".parse::<AngleUnit>().unwrap(), AngleUnit::Degree);
        assert_eq!(" degree ".parse::<AngleUnit>().unwrap(), AngleUnit::Degree);
        assert_eq!(
            "rad".parse::<AngleUnit>(),
            Err(InfootError::InvalidAngleUnit("rad".into()))
        );
        assert_eq!(AngleUnit::default(), AngleUnit::Hour);
    }

    #[test]
    fn test_hour_degree_equivalence() {
        let a = SkyPosition::from_hours(1.0, 12.0).unwrap();
        let b = SkyPosition::from_degrees(15.0, 12.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.ra_hour(), 1.0);
    }

    #[test]
    fn test_ra_is_wrapped() {
        let p = SkyPosition::from_degrees(-15.0, 0.0).unwrap();
        assert_abs_diff_eq!(p.ra_deg(), 345.0, epsilon = 1e-12);
        let p = SkyPosition::from_hours(25.0, 0.0).unwrap();
        assert_abs_diff_eq!(p.ra_deg(), 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_positions() {
        assert!(matches!(
            SkyPosition::from_degrees(10.0, 90.5),
            Err(InfootError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            SkyPosition::from_degrees(f64::NAN, 0.0),
            Err(InfootError::InvalidCoordinate(_))
        ));
        assert!(SkyPosition::from_degrees(0.0, -90.0).is_ok());
    }

    #[test]
    fn test_known_separations() {
        assert_eq!(angular_separation_deg(10.0, 20.0, 10.0, 20.0), 0.0);
        assert_abs_diff_eq!(
            angular_separation_deg(0.0, 0.0, 90.0, 0.0),
            90.0,
            epsilon = 1e-10
        );
        assert_abs_diff_eq!(
            angular_separation_deg(0.0, 0.0, 180.0, 0.0),
            180.0,
            epsilon = 1e-10
        );
        assert_abs_diff_eq!(
            angular_separation_deg(0.0, 90.0, 123.0, -90.0),
            180.0,
            epsilon = 1e-10
        );
        // across the RA origin
        assert_abs_diff_eq!(
            angular_separation_deg(359.5, 0.0, 0.5, 0.0),
            1.0,
            epsilon = 1e-10
        );
        // RA differences shrink with cos(dec)
        assert_abs_diff_eq!(
            angular_separation_deg(0.0, 60.0, 1.0, 60.0),
            0.5,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_small_separation_precision() {
        let a = SkyPosition::from_hours(10.0, 0.0).unwrap();
        let b = SkyPosition::from_hours(10.0, 0.001).unwrap();
        assert_abs_diff_eq!(a.separation(&b), 0.001, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let a = SkyPosition::from_degrees(12.3, -45.6).unwrap();
        let b = SkyPosition::from_degrees(250.1, 33.3).unwrap();
        assert_eq!(a.separation(&b), b.separation(&a));
    }
}
