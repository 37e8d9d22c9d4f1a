//! Seasons and saved crop-planning records.

use super::{CropName, ParseSeasonError, PlanningRecordId, ScheduleDomainError};
use crate::land::domain::{LandId, SoilType};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Growing season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// March to May.
    Spring,
    /// June to August.
    Summer,
    /// September to November.
    Autumn,
    /// December to February.
    Winter,
}

impl Season {
    /// Returns the season containing a calendar month (1 = January).
    ///
    /// Months outside `1..=12` fall through to winter.
    #[must_use]
    pub const fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    /// Returns the season containing a date.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Season {
    type Error = ParseSeasonError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "autumn" | "fall" => Ok(Self::Autumn),
            "winter" => Ok(Self::Winter),
            _ => Err(ParseSeasonError(value.to_owned())),
        }
    }
}

/// One crop suggested by the planning collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSuggestion {
    /// Crop name.
    pub name: String,
    /// Typical cycle length, e.g. `90-120 days`.
    pub duration: String,
    /// Water requirement, e.g. `Moderate`.
    pub water_needs: String,
    /// Expected yield, e.g. `High`.
    pub yield_potential: String,
}

impl CropSuggestion {
    /// Creates a suggestion.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        duration: impl Into<String>,
        water_needs: impl Into<String>,
        yield_potential: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            duration: duration.into(),
            water_needs: water_needs.into(),
            yield_potential: yield_potential.into(),
        }
    }
}

/// Saved result of a crop-planning session for one land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningRecord {
    id: PlanningRecordId,
    land_id: LandId,
    soil_type: SoilType,
    season: Season,
    suggestions: Vec<CropSuggestion>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted planning record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPlanningRecordData {
    /// Persisted record identifier.
    pub id: PlanningRecordId,
    /// Land the plan was made for.
    pub land_id: LandId,
    /// Soil type at planning time.
    pub soil_type: SoilType,
    /// Season planned for.
    pub season: Season,
    /// Suggested crops.
    pub suggestions: Vec<CropSuggestion>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl PlanningRecord {
    /// Records a planning session.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptyPlanningRecord`] when no crops
    /// were suggested.
    pub fn new(
        land_id: LandId,
        soil_type: SoilType,
        season: Season,
        suggestions: Vec<CropSuggestion>,
        clock: &impl Clock,
    ) -> Result<Self, ScheduleDomainError> {
        if suggestions.is_empty() {
            return Err(ScheduleDomainError::EmptyPlanningRecord);
        }
        Ok(Self {
            id: PlanningRecordId::new(),
            land_id,
            soil_type,
            season,
            suggestions,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a planning record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPlanningRecordData) -> Self {
        Self {
            id: data.id,
            land_id: data.land_id,
            soil_type: data.soil_type,
            season: data.season,
            suggestions: data.suggestions,
            created_at: data.created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> PlanningRecordId {
        self.id
    }

    /// Returns the land the plan was made for.
    #[must_use]
    pub const fn land_id(&self) -> LandId {
        self.land_id
    }

    /// Returns the soil type at planning time.
    #[must_use]
    pub const fn soil_type(&self) -> &SoilType {
        &self.soil_type
    }

    /// Returns the season planned for.
    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Returns the suggested crops.
    #[must_use]
    pub fn suggestions(&self) -> &[CropSuggestion] {
        &self.suggestions
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Finds the suggestion for a crop, ignoring letter case.
    #[must_use]
    pub fn suggestion(&self, crop_name: &CropName) -> Option<&CropSuggestion> {
        self.suggestions
            .iter()
            .find(|suggestion| suggestion.name.trim().eq_ignore_ascii_case(crop_name.as_str()))
    }
}
