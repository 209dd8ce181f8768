//! Foundation types for the WSRP pipeline.
//!
//! This module provides the vocabulary every other layer speaks:
//! - [`constants`] - The URL rewriting token grammar (markers, parameter names)
//! - [`Mode`], [`WindowState`] - Portlet modes and window states, with custom values
//! - [`Cacheability`] - Resource cacheability levels
//! - [`ComponentHandle`] - Opaque handle naming a hosted component
//!
//! This module has NO dependencies on other pipeline modules.

pub mod constants;
mod handle;
mod modes;

pub use handle::ComponentHandle;
pub use modes::{Cacheability, Mode, WindowState};
