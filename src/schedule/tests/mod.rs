//! Unit tests for the schedule domain, adapters, and services.
