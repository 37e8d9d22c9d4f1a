//! Furrow: land geometry and crop-schedule lifecycle engine.
//!
//! This crate provides the engineering core of a farm-management system:
//! turning user-drawn shapes into validated land areas, and managing the
//! ordered task schedule that governs each crop cycle on a piece of land.
//!
//! # Architecture
//!
//! Furrow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores, estimators)
//! - **Services**: Request/response orchestration over ports
//!
//! # Modules
//!
//! - [`land`]: Coordinate validation, area measurement, and land registration
//! - [`schedule`]: Crop schedules, activation policies, disease task
//!   integration, and historical plan reuse

pub mod land;
pub mod schedule;
