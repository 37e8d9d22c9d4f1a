//! Step definitions for crop schedule lifecycle scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
