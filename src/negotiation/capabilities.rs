use crate::base::{Mode, WindowState};

/// What a component declares for one MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupType {
    pub mime_type: String,
    pub modes: Vec<Mode>,
    pub window_states: Vec<WindowState>,
    /// Empty means no locale restriction
    pub locales: Vec<String>,
    /// Not declared by components today; empty means "use the default"
    pub character_sets: Vec<String>,
}

impl MarkupType {
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            modes: Vec::new(),
            window_states: Vec::new(),
            locales: Vec::new(),
            character_sets: Vec::new(),
        }
    }

    pub fn with_modes(mut self, modes: impl IntoIterator<Item = Mode>) -> Self {
        self.modes.extend(modes);
        self
    }

    pub fn with_window_states(mut self, states: impl IntoIterator<Item = WindowState>) -> Self {
        self.window_states.extend(states);
        self
    }

    pub fn with_locales<S: Into<String>>(mut self, locales: impl IntoIterator<Item = S>) -> Self {
        self.locales.extend(locales.into_iter().map(Into::into));
        self
    }

    pub fn supports_mode(&self, mode: &Mode) -> bool {
        self.modes.iter().any(|m| m.as_str() == mode.as_str())
    }

    pub fn supports_window_state(&self, state: &WindowState) -> bool {
        self.window_states.iter().any(|s| s.as_str() == state.as_str())
    }
}

/// The capabilities a component declares, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapabilityDescriptor {
    pub markup_types: Vec<MarkupType>,
}

impl CapabilityDescriptor {
    pub fn new(markup_types: Vec<MarkupType>) -> Self {
        Self { markup_types }
    }

    pub fn markup_type(&self, mime_type: &str) -> Option<&MarkupType> {
        self.markup_types
            .iter()
            .find(|m| m.mime_type.eq_ignore_ascii_case(mime_type))
    }
}

/// What the caller asks for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupPreferences {
    /// Acceptable MIME types, most preferred first
    pub mime_types: Vec<String>,
    pub mode: Mode,
    pub window_state: WindowState,
    /// Acceptable locales, most preferred first
    pub locales: Vec<String>,
    /// Acceptable character sets, most preferred first
    pub character_sets: Vec<String>,
}

/// The single best match for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedMarkup {
    pub mime_type: String,
    pub mode: Mode,
    pub window_state: WindowState,
    pub character_set: String,
    /// Resolved locales, most preferred first
    pub locales: Vec<String>,
}

impl NegotiatedMarkup {
    /// The locale the response is rendered in, if any.
    pub fn preferred_locale(&self) -> Option<&str> {
        self.locales.first().map(String::as_str)
    }
}
