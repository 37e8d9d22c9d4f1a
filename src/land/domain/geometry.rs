//! Planar area measurement for drawn land shapes.
//!
//! Areas are computed with the shoelace formula over `(lng, lat)` pairs and
//! scaled to square metres with a local flat-earth approximation anchored
//! at the latitude of the first vertex. This is accurate enough for plots
//! from city-block to farm scale and degrades towards the poles; it is not
//! a geodesic calculation.
#![expect(
    clippy::float_arithmetic,
    reason = "area measurement is floating-point by definition"
)]

use super::{Coordinate, GeometryError, ParseShapeKindError, validate_all};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metres per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Conversion factor from square metres to acres.
pub const ACRES_PER_SQUARE_METER: f64 = 0.000_247_105;

/// Placeholder area assigned to point selections: one acre in square metres.
pub const POINT_DEFAULT_SQUARE_METERS: f64 = 4_046.86;

/// Placeholder acreage assigned to point selections.
pub const POINT_DEFAULT_ACRES: f64 = 1.0;

/// Kind of shape drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// A single selected location.
    Point,
    /// An axis-aligned rectangle given by two opposite corners.
    Rectangle,
    /// A free-form polygon.
    Polygon,
}

impl ShapeKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Rectangle => "rectangle",
            Self::Polygon => "polygon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ShapeKind {
    type Error = ParseShapeKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "point" => Ok(Self::Point),
            "rectangle" => Ok(Self::Rectangle),
            "polygon" => Ok(Self::Polygon),
            _ => Err(ParseShapeKindError(value.to_owned())),
        }
    }
}

/// A shape as submitted by the map collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnShape {
    kind: ShapeKind,
    vertices: Vec<Coordinate>,
}

impl DrawnShape {
    /// Creates a shape of the given kind from raw vertices.
    #[must_use]
    pub const fn new(kind: ShapeKind, vertices: Vec<Coordinate>) -> Self {
        Self { kind, vertices }
    }

    /// Creates a point selection.
    #[must_use]
    pub fn point(location: Coordinate) -> Self {
        Self::new(ShapeKind::Point, vec![location])
    }

    /// Creates a rectangle from two opposite corners.
    #[must_use]
    pub fn rectangle(first_corner: Coordinate, opposite_corner: Coordinate) -> Self {
        Self::new(ShapeKind::Rectangle, vec![first_corner, opposite_corner])
    }

    /// Creates a polygon from an ordered vertex list (open or closed).
    #[must_use]
    pub fn polygon(vertices: impl IntoIterator<Item = Coordinate>) -> Self {
        Self::new(ShapeKind::Polygon, vertices.into_iter().collect())
    }

    /// Returns the shape kind.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns the submitted vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }
}

/// Result of measuring a validated shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaMeasurement {
    kind: ShapeKind,
    ring: Vec<Coordinate>,
    square_meters: f64,
    acres: f64,
}

impl AreaMeasurement {
    /// Returns the measured shape kind.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns the boundary ring: closed for rectangles and polygons, a
    /// single vertex (or none) for points.
    #[must_use]
    pub fn ring(&self) -> &[Coordinate] {
        &self.ring
    }

    /// Consumes the measurement and returns its ring.
    #[must_use]
    pub fn into_ring(self) -> Vec<Coordinate> {
        self.ring
    }

    /// Returns the area in square metres.
    #[must_use]
    pub const fn square_meters(&self) -> f64 {
        self.square_meters
    }

    /// Returns the area in acres.
    #[must_use]
    pub const fn acres(&self) -> f64 {
        self.acres
    }

    /// Returns `true` when the shape has a usable, strictly positive area.
    ///
    /// Degenerate polygons measure as zero instead of failing, so callers
    /// must check this before accepting a shape.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.acres > 0.0
    }

    /// Returns the representative location of the shape: the vertex at the
    /// middle position of the ring.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "the middle vertex is chosen by floor division"
    )]
    pub fn center(&self) -> Option<Coordinate> {
        self.ring.get(self.ring.len() / 2).copied()
    }
}

/// Validates and measures a drawn shape.
///
/// - `point`: at most one vertex; returns the fixed one-acre placeholder.
/// - `rectangle`: exactly two opposite corners; the four-corner ring is
///   synthesised and measured as a polygon.
/// - `polygon`: any vertex count; fewer than three distinct vertices
///   measures as zero.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidCoordinate`] when any vertex is out of
/// range, or [`GeometryError::VertexCount`] when a point or rectangle has
/// the wrong number of vertices.
pub fn measure(shape: &DrawnShape) -> Result<AreaMeasurement, GeometryError> {
    validate_all(shape.vertices())?;

    match shape.kind() {
        ShapeKind::Point => {
            if shape.vertices().len() > 1 {
                return Err(GeometryError::VertexCount {
                    kind: ShapeKind::Point,
                    expected: "at most 1",
                    found: shape.vertices().len(),
                });
            }
            Ok(AreaMeasurement {
                kind: ShapeKind::Point,
                ring: shape.vertices().to_vec(),
                square_meters: POINT_DEFAULT_SQUARE_METERS,
                acres: POINT_DEFAULT_ACRES,
            })
        }
        ShapeKind::Rectangle => {
            let [first, opposite] = shape.vertices() else {
                return Err(GeometryError::VertexCount {
                    kind: ShapeKind::Rectangle,
                    expected: "exactly 2",
                    found: shape.vertices().len(),
                });
            };
            Ok(measured(
                ShapeKind::Rectangle,
                rectangle_ring(*first, *opposite),
            ))
        }
        ShapeKind::Polygon => Ok(measured(ShapeKind::Polygon, closed_ring(shape.vertices()))),
    }
}

fn measured(kind: ShapeKind, ring: Vec<Coordinate>) -> AreaMeasurement {
    let square_meters = polygon_square_meters(&ring);
    AreaMeasurement {
        kind,
        ring,
        square_meters,
        acres: square_meters_to_acres(square_meters),
    }
}

/// Builds the closed ring `c1, (c1.lat, c2.lng), c2, (c2.lat, c1.lng), c1`.
#[must_use]
pub fn rectangle_ring(first: Coordinate, opposite: Coordinate) -> Vec<Coordinate> {
    vec![
        first,
        Coordinate::new(first.lat(), opposite.lng()),
        opposite,
        Coordinate::new(opposite.lat(), first.lng()),
        first,
    ]
}

/// Returns the vertices as a closed ring, appending the first vertex when
/// the input is open.
#[must_use]
pub fn closed_ring(vertices: &[Coordinate]) -> Vec<Coordinate> {
    let mut ring = vertices.to_vec();
    if let (Some(first), Some(last)) = (vertices.first(), vertices.last())
        && vertices.len() > 1
        && first != last
    {
        ring.push(*first);
    }
    ring
}

/// Strips a trailing closing vertex, if present.
fn open_ring(vertices: &[Coordinate]) -> &[Coordinate] {
    match vertices.split_last() {
        Some((last, rest)) if vertices.len() > 1 && vertices.first() == Some(last) => rest,
        _ => vertices,
    }
}

/// Computes the shoelace area of a vertex list in squared degrees.
///
/// The ring may be open or closed. Winding direction does not matter.
#[must_use]
pub fn degree_area(vertices: &[Coordinate]) -> f64 {
    let open = open_ring(vertices);
    if open.len() < 3 {
        return 0.0;
    }

    let twice_signed_area: f64 = open
        .iter()
        .zip(open.iter().cycle().skip(1))
        .map(|(current, next)| current.lng() * next.lat() - next.lng() * current.lat())
        .sum();
    twice_signed_area.abs() / 2.0
}

/// Computes the area of a vertex list in square metres.
///
/// Returns `0.0` for fewer than three distinct vertices. Longitude degrees
/// are scaled by the cosine of the first vertex's latitude.
#[must_use]
pub fn polygon_square_meters(vertices: &[Coordinate]) -> f64 {
    let Some(anchor) = vertices.first() else {
        return 0.0;
    };
    let meters_per_degree_lon = METERS_PER_DEGREE_LAT * anchor.lat().to_radians().cos();
    let area = degree_area(vertices) * METERS_PER_DEGREE_LAT * meters_per_degree_lon;
    area.abs()
}

/// Converts square metres to acres.
#[must_use]
pub fn square_meters_to_acres(square_meters: f64) -> f64 {
    square_meters * ACRES_PER_SQUARE_METER
}
