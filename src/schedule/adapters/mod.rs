//! Adapter implementations for schedule ports.

pub mod heuristic;
pub mod memory;

pub use heuristic::HeuristicYieldEstimator;
