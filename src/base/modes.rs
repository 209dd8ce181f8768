//! Portlet modes, window states and resource cacheability levels.
//!
//! Modes and window states share one shape: a fixed default vocabulary
//! (`wsrp:view`, `wsrp:normal`, ...) plus producer-registered custom values.

use std::fmt;

use smol_str::SmolStr;

/// A portlet mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    View,
    Edit,
    Help,
    Preview,
    /// A custom mode registered with the Producer
    Custom(SmolStr),
}

impl Mode {
    /// Wire names of the default vocabulary.
    pub const DEFAULTS: [&'static str; 4] = ["wsrp:view", "wsrp:edit", "wsrp:help", "wsrp:preview"];

    /// Look up a default mode by wire name.
    pub fn from_default(name: &str) -> Option<Self> {
        match name {
            "wsrp:view" => Some(Self::View),
            "wsrp:edit" => Some(Self::Edit),
            "wsrp:help" => Some(Self::Help),
            "wsrp:preview" => Some(Self::Preview),
            _ => None,
        }
    }

    /// Parse a wire name, falling back to a custom mode.
    pub fn from_wire(name: &str) -> Self {
        Self::from_default(name).unwrap_or_else(|| Self::Custom(SmolStr::new(name)))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::View => "wsrp:view",
            Self::Edit => "wsrp:edit",
            Self::Help => "wsrp:help",
            Self::Preview => "wsrp:preview",
            Self::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A portlet window state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    Solo,
    /// A custom window state registered with the Producer
    Custom(SmolStr),
}

impl WindowState {
    /// Wire names of the default vocabulary.
    pub const DEFAULTS: [&'static str; 4] =
        ["wsrp:normal", "wsrp:minimized", "wsrp:maximized", "wsrp:solo"];

    /// Look up a default window state by wire name.
    pub fn from_default(name: &str) -> Option<Self> {
        match name {
            "wsrp:normal" => Some(Self::Normal),
            "wsrp:minimized" => Some(Self::Minimized),
            "wsrp:maximized" => Some(Self::Maximized),
            "wsrp:solo" => Some(Self::Solo),
            _ => None,
        }
    }

    /// Parse a wire name, falling back to a custom window state.
    pub fn from_wire(name: &str) -> Self {
        Self::from_default(name).unwrap_or_else(|| Self::Custom(SmolStr::new(name)))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "wsrp:normal",
            Self::Minimized => "wsrp:minimized",
            Self::Maximized => "wsrp:maximized",
            Self::Solo => "wsrp:solo",
            Self::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far up the page a resource response may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cacheability {
    /// Cacheable independently of portlet and page state
    Full,
    /// Depends on the portlet's state only
    Portlet,
    /// Depends on the whole page
    #[default]
    Page,
}

impl Cacheability {
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "full" => Some(Self::Full),
            "portlet" => Some(Self::Portlet),
            "page" => Some(Self::Page),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Portlet => "portlet",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for Cacheability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
