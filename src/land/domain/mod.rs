//! Domain model for land registration.
//!
//! Geometry is kept pure: coordinates are validated all-or-nothing and
//! measured with a planar approximation, with no knowledge of persistence.

mod coordinate;
mod error;
pub mod geometry;
mod ids;
mod land;
mod soil;

pub use coordinate::{Coordinate, is_valid_coordinate, validate_all};
pub use error::{GeometryError, LandDomainError, ParseShapeKindError, ParseSoilTypeError};
pub use geometry::{AreaMeasurement, DrawnShape, ShapeKind};
pub use ids::{LandId, OwnerId};
pub use land::{Boundary, Land, LandRegistration, PersistedLandData, SizeSource};
pub use soil::SoilType;
