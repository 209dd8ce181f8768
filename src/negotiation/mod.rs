//! Capability negotiation between caller preferences and a component's
//! declared markup types.
//!
//! ## Axes
//!
//! ```text
//! MIME type     caller order, first declared match wins     → UnsupportedMimeType
//! locale        caller order filtered by declared locales   → soft fallback
//! mode          exact match in the winning markup type      → UnsupportedMode
//! window state  exact match in the winning markup type      → UnsupportedWindowState
//! charset       caller order filtered by declared charsets  → default charset
//! ```
//!
//! Negotiation is a pure function of its inputs: ties go to declaration
//! order, there is no scoring and no hidden state.

mod capabilities;
mod negotiator;

pub use capabilities::{CapabilityDescriptor, MarkupPreferences, MarkupType, NegotiatedMarkup};
pub use negotiator::{NegotiationError, Negotiator};
