//! Producer pipeline tests
//!
//! End-to-end runs of each request kind through the Producer facade, with
//! in-memory registration, description and component collaborators.

pub mod tests_config;
pub mod tests_event;
pub mod tests_faults;
pub mod tests_render;
