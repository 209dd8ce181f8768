use std::fmt;
use std::sync::Arc;

/// Opaque handle naming a hosted component on this Producer.
///
/// Cheap to clone (`Arc<str>`); compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentHandle(Arc<str>);

impl ComponentHandle {
    pub fn new(handle: impl AsRef<str>) -> Self {
        Self(Arc::from(handle.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Derive the handle of a clone of this component.
    pub fn cloned_with(&self, suffix: impl fmt::Display) -> Self {
        Self(Arc::from(format!("{}.{}", self.0, suffix)))
    }
}

impl fmt::Display for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentHandle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ComponentHandle {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}
