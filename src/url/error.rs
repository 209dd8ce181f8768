//! Errors raised while decoding rewritten URLs.

use thiserror::Error;

/// Why a URL was rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("does not start with 'wsrp_rewrite?'")]
    MissingBeginMarker,

    #[error("no '/wsrp_rewrite' end marker")]
    MissingEndMarker,

    #[error("unexpected text '{0}' after the end marker")]
    TextAfterEndMarker(String),

    #[error("contains a double-encoded '&amp;amp;' separator")]
    DoubleEncodedSeparator,

    #[error("first parameter must be 'wsrp-urlType'")]
    MissingUrlType,

    #[error("unknown URL type '{0}'")]
    UnknownUrlType(String),

    #[error("badly formed parameter '{0}'")]
    BadParameter(String),

    #[error("parameter '{0}' lacks the 'wsrp-' prefix")]
    DisallowedParameter(String),

    #[error("parameter '{0}' appears more than once")]
    DuplicateParameter(String),

    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("invalid value '{value}' for parameter '{name}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Errors raised by [`UrlCodec::decode`](super::UrlCodec::decode).
///
/// Every variant carries the offending original text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("malformed WSRP URL '{url}': {reason}")]
    Malformed { url: String, reason: MalformedReason },

    #[error("unsupported mode '{mode}' in WSRP URL '{url}'")]
    UnsupportedMode { url: String, mode: String },

    #[error("unsupported window state '{window_state}' in WSRP URL '{url}'")]
    UnsupportedWindowState { url: String, window_state: String },
}

impl UrlError {
    pub fn malformed(url: impl Into<String>, reason: MalformedReason) -> Self {
        Self::Malformed {
            url: url.into(),
            reason,
        }
    }

    /// The text that failed to decode.
    pub fn url(&self) -> &str {
        match self {
            Self::Malformed { url, .. }
            | Self::UnsupportedMode { url, .. }
            | Self::UnsupportedWindowState { url, .. } => url,
        }
    }

    /// The malformation reason, if this is a malformed-input error.
    pub fn reason(&self) -> Option<&MalformedReason> {
        match self {
            Self::Malformed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
