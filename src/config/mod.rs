//! Producer configuration and its reloadable snapshot.
//!
//! The only behavioural switch is the [`ValidationMode`]; the rest of
//! [`ProducerConfig`] lists the custom modes and window states the Producer
//! accepts and the fallback character set.
//!
//! ## Lifecycle
//!
//! ```text
//! ProducerConfig::load(path)     ← parse JSON once at startup
//!     │
//!     ▼
//! SharedConfig::new(config)      ← generation 1
//!     │
//!     ├── snapshot()             ← readers take one Arc per call
//!     │
//!     └── reload(config)         ← atomically swap, generation + 1
//! ```
//!
//! In-flight calls keep the snapshot they started with; a reload only
//! affects calls that start after it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::constants::DEFAULT_CHARSET;
use crate::base::{Mode, WindowState};

/// Strict or relaxed parsing of rewritten URLs and caller preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject anything outside the WSRP grammar
    #[default]
    Strict,
    /// Log and keep what can be kept
    Relaxed,
}

impl ValidationMode {
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Producer configuration as written on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    pub validation: ValidationMode,
    /// Custom modes accepted on top of the `wsrp:` defaults
    pub custom_modes: Vec<String>,
    /// Custom window states accepted on top of the `wsrp:` defaults
    pub custom_window_states: Vec<String>,
    /// Character set used when the caller's preferences can't be matched
    pub default_charset: String,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::Strict,
            custom_modes: Vec::new(),
            custom_window_states: Vec::new(),
            default_charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl ProducerConfig {
    /// A relaxed configuration with no custom values.
    pub fn relaxed() -> Self {
        Self {
            validation: ValidationMode::Relaxed,
            ..Self::default()
        }
    }

    pub fn with_custom_mode(mut self, mode: impl Into<String>) -> Self {
        self.custom_modes.push(mode.into());
        self
    }

    pub fn with_custom_window_state(mut self, state: impl Into<String>) -> Self {
        self.custom_window_states.push(state.into());
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(
            "Loaded producer config from {} ({:?})",
            path.display(),
            config.validation
        );
        Ok(config)
    }

    /// Check custom values don't shadow the default vocabulary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in &self.custom_modes {
            if mode.trim().is_empty() {
                return Err(ConfigError::Invalid("empty custom mode".to_string()));
            }
            if Mode::from_default(mode).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "custom mode '{}' shadows a default mode",
                    mode
                )));
            }
        }
        for state in &self.custom_window_states {
            if state.trim().is_empty() {
                return Err(ConfigError::Invalid("empty custom window state".to_string()));
            }
            if WindowState::from_default(state).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "custom window state '{}' shadows a default window state",
                    state
                )));
            }
        }
        if self.default_charset.trim().is_empty() {
            return Err(ConfigError::Invalid("empty default charset".to_string()));
        }
        Ok(())
    }
}

/// An immutable view of the configuration for one generation.
#[derive(Debug)]
pub struct ConfigSnapshot {
    generation: u64,
    config: ProducerConfig,
    custom_modes: FxHashSet<SmolStr>,
    custom_window_states: FxHashSet<SmolStr>,
}

impl ConfigSnapshot {
    fn new(generation: u64, config: ProducerConfig) -> Self {
        let custom_modes = config.custom_modes.iter().map(SmolStr::new).collect();
        let custom_window_states = config.custom_window_states.iter().map(SmolStr::new).collect();
        Self {
            generation,
            config,
            custom_modes,
            custom_window_states,
        }
    }

    /// A standalone snapshot, for callers that don't share config.
    pub fn standalone(config: ProducerConfig) -> Arc<Self> {
        Arc::new(Self::new(0, config))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &ProducerConfig {
        &self.config
    }

    pub fn validation(&self) -> ValidationMode {
        self.config.validation
    }

    pub fn is_strict(&self) -> bool {
        self.config.validation.is_strict()
    }

    pub fn default_charset(&self) -> &str {
        &self.config.default_charset
    }

    pub fn is_registered_mode(&self, name: &str) -> bool {
        self.custom_modes.contains(name)
    }

    pub fn is_registered_window_state(&self, name: &str) -> bool {
        self.custom_window_states.contains(name)
    }
}

/// Process-wide configuration handle.
///
/// Cloning shares the same underlying slot. Reads never block on each other;
/// `reload` swaps the whole snapshot rather than mutating it.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    current: Arc<RwLock<Arc<ConfigSnapshot>>>,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(ProducerConfig::default())
    }
}

impl SharedConfig {
    pub fn new(config: ProducerConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(ConfigSnapshot::new(1, config)))),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&*self.current.read())
    }

    /// Validate and publish a new configuration, returning its generation.
    pub fn reload(&self, config: ProducerConfig) -> Result<u64, ConfigError> {
        config.validate()?;
        let mut slot = self.current.write();
        let generation = slot.generation + 1;
        *slot = Arc::new(ConfigSnapshot::new(generation, config));
        tracing::info!(
            "Producer config reloaded (generation {}, {:?})",
            generation,
            slot.validation()
        );
        Ok(generation)
    }
}
