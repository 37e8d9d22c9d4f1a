//! Adapter implementations for land ports.

pub mod memory;
