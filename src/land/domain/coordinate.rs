//! Geographic coordinates and range validation.

use super::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Accepted latitude range in decimal degrees.
const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Accepted longitude range in decimal degrees.
const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Construction does not validate; use [`Coordinate::validated`] or
/// [`validate_all`] at the boundary where untrusted input arrives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Creates a coordinate without range checks.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a range-checked coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CoordinateOutOfRange`] when the latitude is
    /// outside `[-90, 90]`, the longitude is outside `[-180, 180]`, or either
    /// value is not finite.
    pub fn validated(lat: f64, lng: f64) -> Result<Self, GeometryError> {
        if is_valid_coordinate(lat, lng) {
            Ok(Self { lat, lng })
        } else {
            Err(GeometryError::CoordinateOutOfRange { lat, lng })
        }
    }

    /// Returns the latitude in decimal degrees.
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// Returns the longitude in decimal degrees.
    #[must_use]
    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Returns `true` when both components are within range.
    #[must_use]
    pub fn is_valid(self) -> bool {
        is_valid_coordinate(self.lat, self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Returns `true` iff `lat` is in `[-90, 90]` and `lng` is in `[-180, 180]`.
///
/// `NaN` is never in range, so non-finite input is rejected as well.
#[must_use]
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    LATITUDE_RANGE.contains(&lat) && LONGITUDE_RANGE.contains(&lng)
}

/// Validates every vertex of a shape.
///
/// A shape is accepted or rejected as a whole: one out-of-range vertex
/// rejects all of them.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidCoordinate`] naming the first offending
/// vertex.
pub fn validate_all(vertices: &[Coordinate]) -> Result<(), GeometryError> {
    match vertices
        .iter()
        .enumerate()
        .find(|(_, vertex)| !vertex.is_valid())
    {
        Some((index, vertex)) => Err(GeometryError::InvalidCoordinate {
            index,
            lat: vertex.lat,
            lng: vertex.lng,
        }),
        None => Ok(()),
    }
}
