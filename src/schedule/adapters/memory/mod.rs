//! Thread-safe in-memory adapters for schedule ports.

mod ledger;
mod planning;
mod schedule;

pub use ledger::InMemoryActivationLedger;
pub use planning::InMemoryPlanningRecordRepository;
pub use schedule::InMemoryScheduleRepository;
