//! Identifier and validated name types for the schedule domain.

use super::ScheduleDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a crop schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(Uuid);

impl ScheduleId {
    /// Creates a new random schedule identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a schedule identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ScheduleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a saved crop-planning record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanningRecordId(Uuid);

impl PlanningRecordId {
    /// Creates a new random planning record identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a planning record identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for PlanningRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlanningRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Crop name as chosen by the grower, e.g. `Tomato`.
///
/// Names are trimmed but otherwise compared exactly, so `Tomato` and
/// `tomato` are different crops.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropName(String);

impl CropName {
    /// Creates a validated crop name.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptyCropName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ScheduleDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ScheduleDomainError::EmptyCropName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the crop name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CropName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CropName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied token deduplicating activation requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyToken(String);

impl IdempotencyToken {
    /// Longest accepted token, in bytes.
    pub const MAX_LEN: usize = 128;

    /// Creates a validated idempotency token.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptyIdempotencyToken`] for blank
    /// tokens and [`ScheduleDomainError::IdempotencyTokenTooLong`] when the
    /// trimmed token exceeds [`Self::MAX_LEN`].
    pub fn new(value: impl Into<String>) -> Result<Self, ScheduleDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ScheduleDomainError::EmptyIdempotencyToken);
        }
        if normalized.len() > Self::MAX_LEN {
            return Err(ScheduleDomainError::IdempotencyTokenTooLong {
                length: normalized.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
