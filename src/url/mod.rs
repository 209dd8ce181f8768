//! WSRP rewritten URLs: model, lexer and codec.
//!
//! ```text
//! "wsrp_rewrite?wsrp-urlType=render&wsrp-mode=wsrp:edit/wsrp_rewrite"
//!     │                                   ▲
//!     │ UrlCodec::decode                  │ UrlCodec::encode
//!     ▼                                   │
//! PortalUrl { kind: UrlKind::Render, mode: Some(Mode::Edit), .. }
//! ```
//!
//! Strict validation rejects anything outside the grammar; relaxed
//! validation keeps unknown parameters and concatenated text as
//! [`Extras`] and writes them back where they were found.

mod codec;
mod error;
mod lexer;
mod model;

pub use codec::{EncodeOptions, UrlCodec};
pub use error::{MalformedReason, UrlError};
pub use model::{ActionTarget, ExtraPosition, Extras, PortalUrl, ResourceTarget, UrlKind};
