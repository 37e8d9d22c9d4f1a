//! In-memory adapters for land ports.

mod land;

pub use land::InMemoryLandRepository;
