//! Schedule tasks and their terminal transitions.

use super::{ParsePriorityError, ParseTaskActionError, ScheduleDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Do first.
    High,
    /// Normal urgency.
    Medium,
    /// Can wait.
    Low,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Action a grower takes on a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Mark the task completed.
    Done,
    /// Defer the task without completing it.
    Skip,
}

impl TaskAction {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskAction {
    type Error = ParseTaskActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "done" => Ok(Self::Done),
            "skip" => Ok(Self::Skip),
            _ => Err(ParseTaskActionError(value.to_owned())),
        }
    }
}

/// Resolution state of a task.
///
/// `Completed` and `Skipped` are terminal. Both carry the moment the task
/// was resolved, so "completed" and "skipped" can never be set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet resolved.
    Pending,
    /// Completed by the grower.
    Completed {
        /// When the task was completed.
        at: DateTime<Utc>,
    },
    /// Skipped by the grower.
    Skipped {
        /// When the task was skipped.
        at: DateTime<Utc>,
    },
}

impl TaskStatus {
    /// Returns `true` while the task is unresolved.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` once the task is completed or skipped.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !self.is_pending()
    }

    /// Returns `true` for completed tasks.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns `true` for skipped tasks.
    #[must_use]
    pub const fn is_skipped(self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    /// Returns when the task was resolved, if it was.
    #[must_use]
    pub const fn resolved_at(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Pending => None,
            Self::Completed { at } | Self::Skipped { at } => Some(at),
        }
    }
}

/// A single step in a crop schedule.
///
/// The `day` is advisory and relative to the schedule start. A task's
/// position in its schedule, not its day, decides ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    day: u32,
    #[serde(rename = "task")]
    label: String,
    description: String,
    phase: String,
    priority: Priority,
    status: TaskStatus,
}

impl Task {
    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::EmptyTaskLabel`] or
    /// [`ScheduleDomainError::EmptyTaskPhase`] when either is blank.
    pub fn new(
        day: u32,
        label: impl Into<String>,
        description: impl Into<String>,
        phase: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, ScheduleDomainError> {
        let raw_label: String = label.into();
        let raw_phase: String = phase.into();
        let raw_description: String = description.into();
        Ok(Self {
            day,
            label: non_blank(&raw_label, ScheduleDomainError::EmptyTaskLabel)?,
            description: raw_description.trim().to_owned(),
            phase: non_blank(&raw_phase, ScheduleDomainError::EmptyTaskPhase)?,
            priority,
            status: TaskStatus::Pending,
        })
    }

    /// Returns the task with the given status, for reconstructing stored
    /// tasks.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the schedule-relative day.
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Returns the task label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the growth phase the task belongs to.
    #[must_use]
    pub fn phase(&self) -> &str {
        &self.phase
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the resolution state.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns `true` while the task is unresolved.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Returns when the task was completed or skipped, if it was.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.status.resolved_at()
    }

    pub(crate) const fn resolve(&mut self, action: TaskAction, at: DateTime<Utc>) {
        self.status = match action {
            TaskAction::Done => TaskStatus::Completed { at },
            TaskAction::Skip => TaskStatus::Skipped { at },
        };
    }

    pub(crate) fn reset(&self) -> Self {
        self.clone().with_status(TaskStatus::Pending)
    }
}

fn non_blank(value: &str, error: ScheduleDomainError) -> Result<String, ScheduleDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}
