//! Tunable schedule behaviour.

use crate::schedule::domain::DiseaseInsertion;
use chrono::Duration;

/// Behaviour switches for schedule services.
///
/// # Examples
///
/// ```
/// use furrow::schedule::domain::DiseaseInsertion;
/// use furrow::schedule::services::ScheduleConfig;
///
/// let config = ScheduleConfig::default();
/// assert!(!config.skip_requires_sequence);
/// assert_eq!(config.disease_insertion, DiseaseInsertion::Preempt);
///
/// let strict = ScheduleConfig::strict();
/// assert!(strict.skip_requires_sequence);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Whether skipping a task also requires every earlier task to be
    /// resolved. Completing always does.
    pub skip_requires_sequence: bool,
    /// Where disease-management tasks go in a running schedule.
    pub disease_insertion: DiseaseInsertion,
    /// How long an activation token is remembered.
    pub idempotency_ttl: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            skip_requires_sequence: false,
            disease_insertion: DiseaseInsertion::Preempt,
            idempotency_ttl: Duration::hours(24),
        }
    }
}

impl ScheduleConfig {
    /// Creates a configuration that gates skips like completions.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            skip_requires_sequence: true,
            ..Default::default()
        }
    }

    /// Creates a configuration that appends disease tasks after the
    /// existing ones, leaving skips ungated.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            disease_insertion: DiseaseInsertion::Append,
            ..Default::default()
        }
    }

    /// Returns the configuration with a different token time to live.
    #[must_use]
    pub const fn with_idempotency_ttl(mut self, ttl: Duration) -> Self {
        self.idempotency_ttl = ttl;
        self
    }
}
