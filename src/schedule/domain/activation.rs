//! Activation policies deciding which prior progress survives when a crop
//! cycle is re-activated.

use super::{ParseActivationPolicyError, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How task states carry over into a re-activated schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Every task starts pending again.
    Fresh,
    /// Task states are kept verbatim.
    Continue,
    /// Completed tasks are kept; skipped tasks become pending again.
    Smart,
    /// Tasks at the listed positions keep their state; all others are
    /// reset. An empty selection behaves like [`Self::Fresh`].
    Custom {
        /// Positions whose state is kept.
        #[serde(default)]
        keep: BTreeSet<usize>,
    },
}

impl ActivationPolicy {
    /// Creates a custom policy keeping the given positions.
    #[must_use]
    pub fn custom(keep: impl IntoIterator<Item = usize>) -> Self {
        Self::Custom {
            keep: keep.into_iter().collect(),
        }
    }

    /// Returns the canonical policy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Continue => "continue",
            Self::Smart => "smart",
            Self::Custom { .. } => "custom",
        }
    }

    /// Returns `true` when no prior task state can survive, meaning the
    /// crop cycle effectively starts over.
    #[must_use]
    pub fn resets_progress(&self) -> bool {
        match self {
            Self::Fresh => true,
            Self::Continue | Self::Smart => false,
            Self::Custom { keep } => keep.is_empty(),
        }
    }

    /// Builds the task list for a new activation from an existing one.
    ///
    /// Task order, days, labels, and priorities are always preserved; only
    /// resolution states change.
    #[must_use]
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .enumerate()
            .map(|(position, task)| {
                if self.keeps(position, task) {
                    task.clone()
                } else {
                    task.reset()
                }
            })
            .collect()
    }

    fn keeps(&self, position: usize, task: &Task) -> bool {
        match self {
            Self::Fresh => false,
            Self::Continue => true,
            Self::Smart => !task.status().is_skipped(),
            Self::Custom { keep } => keep.contains(&position),
        }
    }

    /// Returns a stable textual key identifying the policy and its
    /// selection, used when fingerprinting activation requests.
    #[must_use]
    pub fn fingerprint_key(&self) -> String {
        match self {
            Self::Custom { keep } => {
                let positions: Vec<String> = keep.iter().map(ToString::to_string).collect();
                format!("custom:{}", positions.join(","))
            }
            _ => self.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ActivationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActivationPolicy {
    type Error = ParseActivationPolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "fresh" => Ok(Self::Fresh),
            "continue" => Ok(Self::Continue),
            "smart" => Ok(Self::Smart),
            "custom" => Ok(Self::Custom {
                keep: BTreeSet::new(),
            }),
            _ => Err(ParseActivationPolicyError(value.to_owned())),
        }
    }
}
