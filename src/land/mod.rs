//! Land registration for Furrow.
//!
//! A land is registered from a shape drawn on a map: a single point, a
//! rectangle given by two opposite corners, or a free-form polygon. Every
//! vertex is range-checked before the shape is measured, and the measured
//! acreage takes precedence over any size the grower typed in. The module
//! follows hexagonal architecture:
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
