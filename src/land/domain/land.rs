//! Land aggregate root.

use super::{
    AreaMeasurement, Coordinate, DrawnShape, GeometryError, LandDomainError, LandId, OwnerId,
    ShapeKind, SoilType, geometry,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Where a land's acreage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSource {
    /// Measured from a rectangle or polygon boundary.
    Measured,
    /// The fixed one-acre placeholder assigned to point selections.
    PointDefault,
    /// Entered by the grower because the shape had no measurable area.
    Manual,
}

/// Validated boundary of a land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    kind: ShapeKind,
    ring: Vec<Coordinate>,
}

impl Boundary {
    /// Returns the shape kind the boundary was drawn as.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Returns the boundary ring (a single vertex for points).
    #[must_use]
    pub fn ring(&self) -> &[Coordinate] {
        &self.ring
    }
}

impl From<AreaMeasurement> for Boundary {
    fn from(measurement: AreaMeasurement) -> Self {
        Self {
            kind: measurement.kind(),
            ring: measurement.into_ring(),
        }
    }
}

/// Parameter object for registering a new land.
#[derive(Debug, Clone, PartialEq)]
pub struct LandRegistration {
    /// Owning grower.
    pub owner_id: OwnerId,
    /// Display name; blank names are replaced with a location-derived name.
    pub name: String,
    /// Soil classification.
    pub soil_type: SoilType,
    /// Shape drawn on the map.
    pub shape: DrawnShape,
    /// Size typed in by the grower, used only when the shape has no area.
    pub manual_size_acres: Option<f64>,
}

/// Land aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Land {
    id: LandId,
    owner_id: OwnerId,
    name: String,
    size_acres: f64,
    size_source: SizeSource,
    soil_type: SoilType,
    center: Coordinate,
    boundary: Boundary,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted land aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedLandData {
    /// Persisted land identifier.
    pub id: LandId,
    /// Persisted owner.
    pub owner_id: OwnerId,
    /// Persisted display name.
    pub name: String,
    /// Persisted acreage.
    pub size_acres: f64,
    /// Persisted acreage origin.
    pub size_source: SizeSource,
    /// Persisted soil type.
    pub soil_type: SoilType,
    /// Persisted centre location.
    pub center: Coordinate,
    /// Persisted boundary.
    pub boundary: Boundary,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Land {
    /// Registers a land from a drawn shape.
    ///
    /// The boundary-derived acreage takes precedence whenever it is
    /// positive; the manual size is only used for shapes that measure as
    /// zero. Nothing is partially accepted: any invalid vertex rejects the
    /// whole registration.
    ///
    /// # Errors
    ///
    /// Returns [`LandDomainError::InvalidGeometry`] when the shape fails
    /// validation or has no area and no manual size was supplied, and
    /// [`LandDomainError::InvalidLandSize`] when a zero-area shape comes with
    /// a manual size that is not a positive finite number.
    pub fn register(
        registration: LandRegistration,
        clock: &impl Clock,
    ) -> Result<Self, LandDomainError> {
        let LandRegistration {
            owner_id,
            name,
            soil_type,
            shape,
            manual_size_acres,
        } = registration;

        let measurement = geometry::measure(&shape)?;
        let center = measurement.center().ok_or(GeometryError::VertexCount {
            kind: shape.kind(),
            expected: "at least 1",
            found: 0,
        })?;

        let (size_acres, size_source) = match (measurement.is_positive(), manual_size_acres) {
            (true, _) if shape.kind() == ShapeKind::Point => {
                (measurement.acres(), SizeSource::PointDefault)
            }
            (true, _) => (measurement.acres(), SizeSource::Measured),
            (false, Some(manual)) if is_positive_size(manual) => (manual, SizeSource::Manual),
            (false, Some(manual)) => return Err(LandDomainError::InvalidLandSize(manual)),
            (false, None) => return Err(GeometryError::NonPositiveArea(shape.kind()).into()),
        };

        let trimmed_name = name.trim();
        let display_name = if trimmed_name.is_empty() {
            format!("Land at {center}")
        } else {
            trimmed_name.to_owned()
        };

        let timestamp = clock.utc();
        Ok(Self {
            id: LandId::new(),
            owner_id,
            name: display_name,
            size_acres,
            size_source,
            soil_type,
            center,
            boundary: Boundary::from(measurement),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a land from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLandData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            name: data.name,
            size_acres: data.size_acres,
            size_source: data.size_source,
            soil_type: data.soil_type,
            center: data.center,
            boundary: data.boundary,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the land identifier.
    #[must_use]
    pub const fn id(&self) -> LandId {
        self.id
    }

    /// Returns the owning grower.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the acreage.
    #[must_use]
    pub const fn size_acres(&self) -> f64 {
        self.size_acres
    }

    /// Returns where the acreage came from.
    #[must_use]
    pub const fn size_source(&self) -> SizeSource {
        self.size_source
    }

    /// Returns the soil type.
    #[must_use]
    pub const fn soil_type(&self) -> &SoilType {
        &self.soil_type
    }

    /// Returns the representative location.
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    /// Returns the validated boundary.
    #[must_use]
    pub const fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn is_positive_size(acres: f64) -> bool {
    acres.is_finite() && acres > 0.0
}
