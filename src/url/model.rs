//! Decoded WSRP URLs.
//!
//! A [`PortalUrl`] holds the fields common to every URL kind and a
//! [`UrlKind`] payload for the kind-specific ones. Navigational and
//! interaction state are opaque: they are carried verbatim and never parsed.

use indexmap::IndexMap;

use crate::base::constants::{URL_TYPE_BLOCKING_ACTION, URL_TYPE_RENDER, URL_TYPE_RESOURCE};
use crate::base::{Cacheability, Mode, WindowState};

/// Kind-specific payload of a [`PortalUrl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    Render,
    Action(ActionTarget),
    Resource(ResourceTarget),
}

impl UrlKind {
    /// Value of the `wsrp-urlType` parameter.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Render => URL_TYPE_RENDER,
            Self::Action(_) => URL_TYPE_BLOCKING_ACTION,
            Self::Resource(_) => URL_TYPE_RESOURCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionTarget {
    pub interaction_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTarget {
    /// Absolute URL of the resource
    pub url: String,
    pub requires_rewrite: bool,
    pub resource_id: Option<String>,
    pub resource_state: Option<String>,
    pub cacheability: Option<Cacheability>,
}

impl ResourceTarget {
    pub fn new(url: impl Into<String>, requires_rewrite: bool) -> Self {
        Self {
            url: url.into(),
            requires_rewrite,
            resource_id: None,
            resource_state: None,
            cacheability: None,
        }
    }
}

/// Where an extra parameter sat relative to the end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraPosition {
    BeforeEnd,
    AfterEnd,
}

/// Unrecognized content kept by relaxed decoding, written back in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extras {
    before_end: IndexMap<String, String>,
    after_end: IndexMap<String, String>,
    trailing: Option<String>,
}

impl Extras {
    pub fn is_empty(&self) -> bool {
        self.before_end.is_empty() && self.after_end.is_empty() && self.trailing.is_none()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>, position: ExtraPosition) {
        let map = match position {
            ExtraPosition::BeforeEnd => &mut self.before_end,
            ExtraPosition::AfterEnd => &mut self.after_end,
        };
        map.insert(name.into(), value.into());
    }

    /// Raw value of an extra parameter, wherever it sat.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.before_end
            .get(name)
            .or_else(|| self.after_end.get(name))
            .map(String::as_str)
    }

    pub fn position_of(&self, name: &str) -> Option<ExtraPosition> {
        if self.before_end.contains_key(name) {
            Some(ExtraPosition::BeforeEnd)
        } else if self.after_end.contains_key(name) {
            Some(ExtraPosition::AfterEnd)
        } else {
            None
        }
    }

    pub fn parameters(&self, position: ExtraPosition) -> impl Iterator<Item = (&str, &str)> {
        let map = match position {
            ExtraPosition::BeforeEnd => &self.before_end,
            ExtraPosition::AfterEnd => &self.after_end,
        };
        map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Text following the end marker, e.g. a concatenated context path.
    pub fn trailing(&self) -> Option<&str> {
        self.trailing.as_deref()
    }

    pub fn set_trailing(&mut self, trailing: Option<String>) {
        self.trailing = trailing;
    }
}

/// A decoded (or about-to-be-encoded) WSRP URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalUrl {
    kind: UrlKind,
    mode: Option<Mode>,
    window_state: Option<WindowState>,
    secure: bool,
    navigational_state: Option<String>,
    fragment_id: Option<String>,
    extras: Extras,
}

impl PortalUrl {
    pub fn new(kind: UrlKind) -> Self {
        Self {
            kind,
            mode: None,
            window_state: None,
            secure: false,
            navigational_state: None,
            fragment_id: None,
            extras: Extras::default(),
        }
    }

    pub fn render() -> Self {
        Self::new(UrlKind::Render)
    }

    pub fn action() -> Self {
        Self::new(UrlKind::Action(ActionTarget::default()))
    }

    pub fn resource(url: impl Into<String>, requires_rewrite: bool) -> Self {
        Self::new(UrlKind::Resource(ResourceTarget::new(url, requires_rewrite)))
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_window_state(mut self, window_state: WindowState) -> Self {
        self.window_state = Some(window_state);
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_navigational_state(mut self, state: impl Into<String>) -> Self {
        self.navigational_state = Some(state.into());
        self
    }

    /// Anchor within the component's markup the portal should scroll to
    pub fn with_fragment_id(mut self, fragment_id: impl Into<String>) -> Self {
        self.fragment_id = Some(fragment_id.into());
        self
    }

    /// Set the interaction state. No effect on non-action URLs.
    pub fn with_interaction_state(mut self, state: impl Into<String>) -> Self {
        if let UrlKind::Action(action) = &mut self.kind {
            action.interaction_state = Some(state.into());
        }
        self
    }

    /// Adjust resource-specific fields. No effect on non-resource URLs.
    pub fn with_resource(mut self, f: impl FnOnce(&mut ResourceTarget)) -> Self {
        if let UrlKind::Resource(resource) = &mut self.kind {
            f(resource);
        }
        self
    }

    pub(crate) fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = extras;
        self
    }

    pub fn kind(&self) -> &UrlKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn mode(&self) -> Option<&Mode> {
        self.mode.as_ref()
    }

    pub fn window_state(&self) -> Option<&WindowState> {
        self.window_state.as_ref()
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn navigational_state(&self) -> Option<&str> {
        self.navigational_state.as_deref()
    }

    pub fn fragment_id(&self) -> Option<&str> {
        self.fragment_id.as_deref()
    }

    pub fn interaction_state(&self) -> Option<&str> {
        match &self.kind {
            UrlKind::Action(action) => action.interaction_state.as_deref(),
            _ => None,
        }
    }

    pub fn resource_target(&self) -> Option<&ResourceTarget> {
        match &self.kind {
            UrlKind::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    /// Relaxed-mode bookkeeping is the only mutation a URL allows.
    pub fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
}
