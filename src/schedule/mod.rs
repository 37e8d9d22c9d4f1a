//! Crop-schedule lifecycle for Furrow.
//!
//! A crop schedule is the ordered task list for one crop cycle on one land.
//! Tasks are resolved strictly in order, a (land, crop) pair has at most one
//! active schedule, and earlier cycles can be re-activated under a policy
//! that decides which prior progress survives. Disease-management tasks
//! derived from free-text recommendations can be spliced into a running
//! schedule at any point. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
