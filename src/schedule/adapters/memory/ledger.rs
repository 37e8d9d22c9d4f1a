//! In-memory idempotency ledger for activations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::schedule::{
    domain::IdempotencyToken,
    ports::{
        ActivationLedger, ActivationLedgerError, ActivationLedgerResult, ActivationRecord,
        LedgerClaim,
    },
};

/// Thread-safe in-memory activation ledger.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivationLedger {
    entries: Arc<RwLock<HashMap<IdempotencyToken, LedgerEntry>>>,
}

#[derive(Debug)]
struct LedgerEntry {
    fingerprint: String,
    expires_at: DateTime<Utc>,
    record: Option<ActivationRecord>,
}

impl InMemoryActivationLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ActivationLedgerError {
    ActivationLedgerError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ActivationLedger for InMemoryActivationLedger {
    async fn claim(
        &self,
        token: &IdempotencyToken,
        fingerprint: &str,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> ActivationLedgerResult<LedgerClaim> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        if let Some(entry) = entries.get(token)
            && entry.expires_at > now
        {
            if entry.fingerprint != fingerprint {
                return Ok(LedgerClaim::Mismatch);
            }
            return Ok(entry.record.as_ref().map_or(LedgerClaim::InFlight, |record| {
                LedgerClaim::Replay(Box::new(record.clone()))
            }));
        }

        entries.insert(
            token.clone(),
            LedgerEntry {
                fingerprint: fingerprint.to_owned(),
                expires_at,
                record: None,
            },
        );
        Ok(LedgerClaim::Acquired)
    }

    async fn complete(
        &self,
        token: &IdempotencyToken,
        record: &ActivationRecord,
    ) -> ActivationLedgerResult<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        let entry = entries
            .get_mut(token)
            .ok_or_else(|| ActivationLedgerError::NotClaimed(token.clone()))?;
        entry.record = Some(record.clone());
        Ok(())
    }

    async fn release(&self, token: &IdempotencyToken) -> ActivationLedgerResult<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        if entries
            .get(token)
            .is_some_and(|entry| entry.record.is_none())
        {
            entries.remove(token);
        }
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> ActivationLedgerResult<usize> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok(before.saturating_sub(entries.len()))
    }
}
