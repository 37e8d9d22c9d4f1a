//! Port contracts for crop-schedule management.
//!
//! Ports define infrastructure-agnostic interfaces used by schedule
//! services.

pub mod estimator;
pub mod ledger;
pub mod planning;
pub mod repository;

pub use estimator::YieldEstimator;
pub use ledger::{
    ActivationLedger, ActivationLedgerError, ActivationLedgerResult, ActivationRecord, LedgerClaim,
};
pub use planning::{
    PlanningRecordRepository, PlanningRecordRepositoryError, PlanningRecordRepositoryResult,
};
pub use repository::{ScheduleRepository, ScheduleRepositoryError, ScheduleRepositoryResult};
