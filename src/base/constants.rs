//! WSRP URL rewriting token grammar.
//!
//! These strings are the wire contract shared with every Consumer and must
//! stay byte-compatible with the WSRP 1.0/2.0 rewriting convention.

// ============================================================================
// MARKERS
// ============================================================================

/// Opens a rewritten URL: `wsrp_rewrite?`
pub const BEGIN_REWRITE: &str = "wsrp_rewrite?";

/// Closes a rewritten URL: `/wsrp_rewrite`
pub const END_REWRITE: &str = "/wsrp_rewrite";

/// In-markup namespace marker the Consumer replaces with its own prefix.
pub const NAMESPACE_MARKER: &str = "wsrp_rewrite_";

/// Every well-known parameter name starts with this prefix.
pub const PARAMETER_PREFIX: &str = "wsrp-";

// ============================================================================
// SEPARATORS
// ============================================================================

pub const AMPERSAND: &str = "&";
pub const ENCODED_AMPERSAND: &str = "&amp;";
pub const DOUBLE_ENCODED_AMPERSAND: &str = "&amp;amp;";
pub const EQUALS: &str = "=";

// ============================================================================
// PARAMETER NAMES
// ============================================================================

pub const URL_TYPE: &str = "wsrp-urlType";
pub const MODE: &str = "wsrp-mode";
pub const WINDOW_STATE: &str = "wsrp-windowState";
pub const NAVIGATIONAL_STATE: &str = "wsrp-navigationalState";
pub const INTERACTION_STATE: &str = "wsrp-interactionState";
pub const SECURE_URL: &str = "wsrp-secureURL";
pub const RESOURCE_URL: &str = "wsrp-url";
pub const RESOURCE_REQUIRES_REWRITE: &str = "wsrp-requiresRewrite";
pub const RESOURCE_ID: &str = "wsrp-resourceID";
pub const RESOURCE_STATE: &str = "wsrp-resourceState";
pub const RESOURCE_CACHEABILITY: &str = "wsrp-resourceCacheability";
pub const FRAGMENT_ID: &str = "wsrp-fragmentID";
/// Reserved for public navigational state changes on render URLs; no
/// encoding is defined for it yet.
pub const NAVIGATIONAL_VALUES: &str = "wsrp-navigationalValues";
pub const EXTENSIONS: &str = "wsrp-extensions";

/// Well-known names with no field in the URL model: dropped by strict
/// decoding, kept as extras by relaxed decoding.
pub const RESERVED_PARAMETERS: [&str; 2] = [NAVIGATIONAL_VALUES, EXTENSIONS];

// ============================================================================
// URL KINDS (values of `wsrp-urlType`)
// ============================================================================

pub const URL_TYPE_RENDER: &str = "render";
pub const URL_TYPE_BLOCKING_ACTION: &str = "blockingAction";
pub const URL_TYPE_RESOURCE: &str = "resource";

/// Interaction states produced under this prefix were once double-encoded
/// with a stray trailing backslash.
pub const INTERACTION_STATE_SENTINEL: &str = "JBPNS_";

/// Character set used when negotiation has nothing better to offer.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Returns true for parameter names carrying the `wsrp-` prefix.
pub fn is_wsrp_parameter(name: &str) -> bool {
    name.starts_with(PARAMETER_PREFIX)
}
