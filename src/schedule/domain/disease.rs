//! Classification of free-text disease recommendations into typed tasks.
//!
//! Rules are checked in table order and the first rule with a keyword
//! contained in the recommendation (ignoring letter case) wins, so a
//! recommendation mentioning both "fungicide" and "drainage" is a
//! treatment task.

use super::{Priority, ScheduleDomainError, Task};

/// Phase assigned to every disease-management task.
pub const DISEASE_PHASE: &str = "Disease Management";

/// Kind of disease-management task a recommendation maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiseaseTaskKind {
    /// Chemical treatment.
    Treatment,
    /// Removing infected material.
    Sanitation,
    /// Drainage and irrigation changes.
    WaterManagement,
    /// Scouting for spread.
    Monitoring,
    /// Spacing and pruning for airflow.
    AirCirculation,
    /// Nutrient adjustments.
    Fertilization,
    /// Anything no rule recognises.
    GeneralControl,
}

const RULES: [(DiseaseTaskKind, &[&str]); 6] = [
    (
        DiseaseTaskKind::Treatment,
        &["fungicide", "bactericide", "chemical"],
    ),
    (
        DiseaseTaskKind::Sanitation,
        &["remove", "sanitation", "debris"],
    ),
    (
        DiseaseTaskKind::WaterManagement,
        &["drainage", "water", "irrigation"],
    ),
    (
        DiseaseTaskKind::Monitoring,
        &["monitoring", "scouting", "detect"],
    ),
    (
        DiseaseTaskKind::AirCirculation,
        &["spacing", "circulation", "air"],
    ),
    (
        DiseaseTaskKind::Fertilization,
        &["fertilization", "nitrogen", "nutrient"],
    ),
];

impl DiseaseTaskKind {
    /// Classifies a recommendation.
    #[must_use]
    pub fn classify(recommendation: &str) -> Self {
        let lowered = recommendation.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map_or(Self::GeneralControl, |(kind, _)| *kind)
    }

    /// Returns the task label produced for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Treatment => "Apply Disease Treatment",
            Self::Sanitation => "Field Sanitation",
            Self::WaterManagement => "Improve Water Management",
            Self::Monitoring => "Disease Monitoring",
            Self::AirCirculation => "Improve Air Circulation",
            Self::Fertilization => "Adjust Fertilization",
            Self::GeneralControl => "Implement Disease Control",
        }
    }

    /// Returns the priority of tasks of this kind.
    #[must_use]
    pub const fn priority(self) -> Priority {
        match self {
            Self::Treatment | Self::Sanitation => Priority::High,
            Self::WaterManagement
            | Self::Monitoring
            | Self::AirCirculation
            | Self::Fertilization
            | Self::GeneralControl => Priority::Medium,
        }
    }
}

/// Builds one task per recommendation, numbering days upward from
/// `first_day`.
///
/// Identical recommendations produce identical, separate tasks.
///
/// # Errors
///
/// Returns [`ScheduleDomainError::NoRecommendations`] for an empty list and
/// [`ScheduleDomainError::EmptyRecommendation`] for a blank entry.
pub fn tasks_from_recommendations(
    recommendations: &[String],
    first_day: u32,
) -> Result<Vec<Task>, ScheduleDomainError> {
    if recommendations.is_empty() {
        return Err(ScheduleDomainError::NoRecommendations);
    }

    let mut day = first_day;
    let mut tasks = Vec::with_capacity(recommendations.len());
    for (index, recommendation) in recommendations.iter().enumerate() {
        let text = recommendation.trim();
        if text.is_empty() {
            return Err(ScheduleDomainError::EmptyRecommendation { index });
        }
        let kind = DiseaseTaskKind::classify(text);
        tasks.push(Task::new(
            day,
            kind.label(),
            text,
            DISEASE_PHASE,
            kind.priority(),
        )?);
        day = day.saturating_add(1);
    }
    Ok(tasks)
}
