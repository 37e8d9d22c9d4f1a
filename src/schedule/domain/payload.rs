//! Intake of AI-generated schedule task lists.
//!
//! Generated schedules are untrusted: every field is checked before a
//! [`Task`] is built, and a single bad entry rejects the whole payload.

use super::{Priority, ScheduleDomainError, Task};
use serde::{Deserialize, Serialize};

/// One task entry as produced by the schedule generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTask {
    /// Schedule-relative day; must not be negative.
    pub day: i64,
    /// Task label.
    pub task: String,
    /// Free-text instructions.
    #[serde(default)]
    pub description: String,
    /// Growth phase, e.g. `Land Preparation`.
    pub phase: String,
    /// `High`, `Medium`, or `Low` in any letter case.
    pub priority: String,
}

impl TryFrom<GeneratedTask> for Task {
    type Error = ScheduleDomainError;

    fn try_from(generated: GeneratedTask) -> Result<Self, Self::Error> {
        let day = u32::try_from(generated.day)
            .map_err(|_| ScheduleDomainError::InvalidTaskDay(generated.day))?;
        let priority = Priority::try_from(generated.priority.as_str())?;
        Self::new(
            day,
            generated.task,
            generated.description,
            generated.phase,
            priority,
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GeneratedPayload {
    Bare(Vec<GeneratedTask>),
    Wrapped { schedule: Vec<GeneratedTask> },
}

/// Decodes and validates a generated task list.
///
/// Accepts either a bare JSON array of tasks or an object with a
/// `schedule` array.
///
/// # Errors
///
/// Returns [`ScheduleDomainError::MalformedSchedulePayload`] when the JSON
/// does not match either shape, [`ScheduleDomainError::EmptySchedule`] when
/// it holds no tasks, and the task validation error for the first invalid
/// entry otherwise.
pub fn parse_generated_tasks(json: &str) -> Result<Vec<Task>, ScheduleDomainError> {
    let payload: GeneratedPayload = serde_json::from_str(json)
        .map_err(|err| ScheduleDomainError::MalformedSchedulePayload(err.to_string()))?;
    let entries = match payload {
        GeneratedPayload::Bare(entries) | GeneratedPayload::Wrapped { schedule: entries } => {
            entries
        }
    };
    if entries.is_empty() {
        return Err(ScheduleDomainError::EmptySchedule);
    }
    entries.into_iter().map(Task::try_from).collect()
}
