//! Unit tests for the land domain and registration service.
