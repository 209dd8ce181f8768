//! # wsrp
//!
//! Producer-side URL rewriting and request processing for WSRP (Web
//! Services for Remote Portlets).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! producer     → request-processing state machine, response translation
//!   ↓
//! negotiation  → MIME type / mode / window state / locale selection
//! rewrite      → namespace substitution, absolute-URL repair
//! url          → rewritable URL model and codec
//!   ↓
//! config       → strict/relaxed validation, custom vocabulary, reload
//!   ↓
//! base         → token grammar, modes, window states, handles
//! ```
//!
//! The SOAP layer is out of scope: it hands typed requests to
//! [`producer::Producer`] and marshals the typed responses or
//! [`producer::ProducerError`] faults it gets back.

// ============================================================================
// MODULES (dependency order: base → config → url/rewrite/negotiation → producer)
// ============================================================================

/// Token grammar constants and protocol vocabulary
pub mod base;

/// Validation mode and custom vocabulary, with snapshot reload
pub mod config;

/// Rewritable URL model and its encoder/decoder
pub mod url;

/// Markup post-processing: namespace marker and absolute URLs
pub mod rewrite;

/// Capability negotiation against declared markup types
pub mod negotiation;

/// Request processors, execution context and the Producer facade
pub mod producer;

pub use base::{Cacheability, ComponentHandle, Mode, WindowState};
pub use config::{ProducerConfig, SharedConfig, ValidationMode};
pub use producer::{CallContext, FaultCode, Producer, ProducerError};
pub use url::{PortalUrl, UrlCodec, UrlError};
