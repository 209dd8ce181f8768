//! Content rewriting applied to component output before it goes on the wire.
//!
//! Two independent passes over text content:
//! 1. The window-scoped namespace is replaced by the `wsrp_rewrite_` marker,
//!    which the Consumer later swaps for its own unique prefix.
//! 2. Local URLs (`/path/...`) in URL-bearing attributes and CSS `url(...)`
//!    references are made absolute against the Producer's server address.
//!
//! Binary content passes through untouched.

use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::FxHasher;

use crate::base::constants::{BEGIN_REWRITE, NAMESPACE_MARKER};

/// Attribute values that hold URLs: double-quoted, single-quoted or bare.
static URL_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:href|src|action|background|codebase|data|formaction|poster|cite)\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<uq>[^\s"'<>`]+))"#,
    )
    .expect("URL attribute pattern is valid")
});

/// CSS `url(...)` references, quoted or not.
static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*['"]?(?P<url>[^'")\s]+)['"]?\s*\)"#).expect("CSS url pattern is valid")
});

/// Body of a component response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Binary(Vec<u8>),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }
}

/// Derive the in-markup namespace for a window id.
///
/// Deterministic across processes: FxHash has no per-process seed.
pub fn namespace_for(window_id: &str) -> String {
    let mut hasher = FxHasher::default();
    window_id.hash(&mut hasher);
    format!("ns{:x}", hasher.finish())
}

/// True for URLs that are local to this server: a single leading `/`.
pub fn is_local_url(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}

/// Rewrites text content for one invocation.
#[derive(Debug, Clone)]
pub struct ContentRewriter {
    namespace: String,
    server_address: String,
}

impl ContentRewriter {
    /// `server_address` is a scheme + authority, e.g. `https://host:8443`.
    pub fn new(namespace: impl Into<String>, server_address: impl Into<String>) -> Self {
        let server_address = server_address.into();
        Self {
            namespace: namespace.into(),
            server_address: server_address.trim_end_matches('/').to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    /// Apply both passes to text; binary content is returned as is.
    pub fn rewrite(&self, content: Content) -> Content {
        match content {
            Content::Text(text) => {
                let rewritten = match self.rewrite_text(&text) {
                    Cow::Owned(owned) => Some(owned),
                    Cow::Borrowed(_) => None,
                };
                Content::Text(rewritten.unwrap_or(text))
            }
            binary @ Content::Binary(_) => binary,
        }
    }

    pub fn rewrite_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.rewrite_namespace(text) {
            Cow::Borrowed(text) => self.absolutize_urls(text),
            Cow::Owned(text) => Cow::Owned(self.absolutize_urls(&text).into_owned()),
        }
    }

    /// Replace the window namespace with the `wsrp_rewrite_` marker.
    pub fn rewrite_namespace<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.namespace.is_empty() || !text.contains(&self.namespace) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text.replace(&self.namespace, NAMESPACE_MARKER))
    }

    /// Prefix local URLs with the server address.
    pub fn absolutize_urls<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.server_address.is_empty() {
            return Cow::Borrowed(text);
        }

        let attributes = URL_ATTRIBUTE.replace_all(text, |caps: &Captures<'_>| {
            let value = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("uq"));
            self.splice(caps, value)
        });
        match attributes {
            Cow::Borrowed(text) => {
                CSS_URL.replace_all(text, |caps: &Captures<'_>| self.splice(caps, caps.name("url")))
            }
            Cow::Owned(text) => Cow::Owned(
                CSS_URL
                    .replace_all(&text, |caps: &Captures<'_>| self.splice(caps, caps.name("url")))
                    .into_owned(),
            ),
        }
    }

    /// Rebuild a whole match, inserting the server address before `value`
    /// when it is a local URL.
    fn splice(&self, caps: &Captures<'_>, value: Option<regex::Match<'_>>) -> String {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let Some(value) = value else {
            return whole.to_string();
        };
        let url = value.as_str();
        if url.starts_with(BEGIN_REWRITE) || !is_local_url(url) {
            return whole.to_string();
        }

        let offset = value.start() - caps.get(0).map_or(0, |m| m.start());
        let mut out = String::with_capacity(whole.len() + self.server_address.len());
        out.push_str(&whole[..offset]);
        out.push_str(&self.server_address);
        out.push_str(&whole[offset..]);
        out
    }
}
