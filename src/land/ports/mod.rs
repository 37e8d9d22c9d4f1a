//! Port contracts for land registration.
//!
//! Ports define infrastructure-agnostic interfaces used by land services.

pub mod repository;

pub use repository::{LandRepository, LandRepositoryError, LandRepositoryResult};
