//! Error types for land domain validation and parsing.

use super::ShapeKind;
use thiserror::Error;

/// Errors produced while validating or measuring a drawn shape.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryError {
    /// A vertex lies outside the valid latitude/longitude range.
    #[error("vertex {index} is out of range: lat {lat}, lng {lng}")]
    InvalidCoordinate {
        /// Position of the offending vertex in the submitted shape.
        index: usize,
        /// Submitted latitude.
        lat: f64,
        /// Submitted longitude.
        lng: f64,
    },

    /// A standalone coordinate lies outside the valid range.
    #[error("coordinate is out of range: lat {lat}, lng {lng}")]
    CoordinateOutOfRange {
        /// Submitted latitude.
        lat: f64,
        /// Submitted longitude.
        lng: f64,
    },

    /// The shape has the wrong number of vertices for its kind.
    #[error("{kind} shape expects {expected} vertices, found {found}")]
    VertexCount {
        /// Shape kind being measured.
        kind: ShapeKind,
        /// Human-readable expected count.
        expected: &'static str,
        /// Number of vertices supplied.
        found: usize,
    },

    /// The shape measured to zero area and no manual size was supplied.
    #[error("{0} shape has no measurable area")]
    NonPositiveArea(ShapeKind),
}

/// Errors returned while constructing land domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LandDomainError {
    /// The drawn shape was rejected.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    /// A manually entered size is not a positive finite number.
    #[error("invalid land size {0}, expected a positive number of acres")]
    InvalidLandSize(f64),

    /// The owner identifier is empty after trimming.
    #[error("owner identifier must not be empty")]
    EmptyOwnerId,

    /// The soil type could not be parsed.
    #[error(transparent)]
    InvalidSoilType(#[from] ParseSoilTypeError),
}

/// Error returned while parsing soil types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown soil type: '{0}'")]
pub struct ParseSoilTypeError(pub String);

/// Error returned while parsing shape kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown shape kind: {0}")]
pub struct ParseShapeKindError(pub String);
