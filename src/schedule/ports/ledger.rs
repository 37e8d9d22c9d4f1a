//! Idempotency ledger port for activation requests.
//!
//! Each activation carries a caller-supplied token. The ledger records the
//! token with a fingerprint of the request and, once the activation has
//! finished, its result. Entries expire after a configured time to live.

use crate::schedule::domain::{CropSchedule, IdempotencyToken, ScheduleId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for ledger operations.
pub type ActivationLedgerResult<T> = Result<T, ActivationLedgerError>;

/// Stored outcome of a finished activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRecord {
    /// The schedule the activation produced.
    pub schedule: CropSchedule,
    /// Schedules the activation deactivated.
    pub deactivated: Vec<ScheduleId>,
}

/// Outcome of claiming a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerClaim {
    /// The token was free and is now held by the caller.
    Acquired,
    /// The token already completed with the same request.
    Replay(Box<ActivationRecord>),
    /// Another request with this token is still running.
    InFlight,
    /// The token was used for a different request.
    Mismatch,
}

/// Activation deduplication contract.
#[async_trait]
pub trait ActivationLedger: Send + Sync {
    /// Claims a token for a request fingerprint.
    ///
    /// Entries whose expiry is at or before `now` are treated as absent.
    async fn claim(
        &self,
        token: &IdempotencyToken,
        fingerprint: &str,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> ActivationLedgerResult<LedgerClaim>;

    /// Records the outcome for a claimed token.
    ///
    /// # Errors
    ///
    /// Returns [`ActivationLedgerError::NotClaimed`] when the token is not
    /// held.
    async fn complete(
        &self,
        token: &IdempotencyToken,
        record: &ActivationRecord,
    ) -> ActivationLedgerResult<()>;

    /// Releases a claimed token whose activation failed, so it can be
    /// retried.
    async fn release(&self, token: &IdempotencyToken) -> ActivationLedgerResult<()>;

    /// Drops entries that expired at or before `now` and returns how many
    /// were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> ActivationLedgerResult<usize>;
}

/// Errors returned by ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivationLedgerError {
    /// The token is not currently claimed.
    #[error("idempotency token {0} is not claimed")]
    NotClaimed(IdempotencyToken),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivationLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
