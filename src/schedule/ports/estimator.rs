//! Yield estimation port.
//!
//! Yield figures are heuristics, not measurements. Keeping them behind a
//! trait lets the estimation policy change without touching schedules.

use crate::schedule::domain::{YieldEstimate, YieldInput};

/// Yield estimation policy.
pub trait YieldEstimator: Send + Sync {
    /// Estimates the yield for a crop.
    fn estimate(&self, input: &YieldInput) -> YieldEstimate;
}
