//! Shared fixtures and in-memory collaborators for integration tests.

pub mod fixtures;
