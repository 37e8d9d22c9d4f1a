//! Error types for schedule domain validation and task transitions.

use super::ScheduleId;
use thiserror::Error;

/// Errors returned by schedule construction and state transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleDomainError {
    /// The crop name is empty after trimming.
    #[error("crop name must not be empty")]
    EmptyCropName,

    /// The idempotency token is empty after trimming.
    #[error("idempotency token must not be empty")]
    EmptyIdempotencyToken,

    /// The idempotency token exceeds the accepted length.
    #[error("idempotency token is {length} bytes, at most {max} are accepted")]
    IdempotencyTokenTooLong {
        /// Length of the rejected token.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// A task label is empty after trimming.
    #[error("task label must not be empty")]
    EmptyTaskLabel,

    /// A task phase is empty after trimming.
    #[error("task phase must not be empty")]
    EmptyTaskPhase,

    /// A task day is negative or too large.
    #[error("invalid task day {0}, expected a non-negative schedule day")]
    InvalidTaskDay(i64),

    /// A task priority could not be parsed.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// A generated schedule payload could not be decoded.
    #[error("malformed schedule payload: {0}")]
    MalformedSchedulePayload(String),

    /// A schedule was built without any tasks.
    #[error("a schedule needs at least one task")]
    EmptySchedule,

    /// A planning record was built without any crop suggestions.
    #[error("a planning record needs at least one crop suggestion")]
    EmptyPlanningRecord,

    /// A disease integration was requested without recommendations.
    #[error("at least one recommendation is required")]
    NoRecommendations,

    /// A recommendation string is empty after trimming.
    #[error("recommendation {index} is empty")]
    EmptyRecommendation {
        /// Position of the blank recommendation.
        index: usize,
    },

    /// The schedule is not active and cannot be mutated.
    #[error("schedule {0} is not active")]
    ScheduleInactive(ScheduleId),

    /// The task index is out of bounds.
    #[error("task {index} not found, schedule has {len} tasks")]
    TaskNotFound {
        /// Requested task position.
        index: usize,
        /// Number of tasks in the schedule.
        len: usize,
    },

    /// No task matches the given label and day.
    #[error("no task labelled '{label}' on day {day}")]
    TaskLabelNotFound {
        /// Requested task label.
        label: String,
        /// Requested task day.
        day: u32,
    },

    /// The task is already completed or skipped.
    #[error("task {index} is already resolved")]
    TaskAlreadyResolved {
        /// Requested task position.
        index: usize,
    },

    /// An earlier task is still pending.
    #[error("task {index} cannot be resolved before task {blocking_index}")]
    OutOfSequence {
        /// Requested task position.
        index: usize,
        /// Position of the earliest pending task.
        blocking_index: usize,
    },
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing task actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task action: {0}")]
pub struct ParseTaskActionError(pub String);

/// Error returned while parsing activation policies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activation policy: {0}")]
pub struct ParseActivationPolicyError(pub String);

/// Error returned while parsing seasons.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown season: {0}")]
pub struct ParseSeasonError(pub String);
