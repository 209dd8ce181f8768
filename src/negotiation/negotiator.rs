use thiserror::Error;

use super::capabilities::{CapabilityDescriptor, MarkupPreferences, MarkupType, NegotiatedMarkup};
use crate::config::{ConfigSnapshot, ValidationMode};

/// A negotiation axis with no acceptable match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    #[error("none of the requested MIME types [{}] is supported", .requested.join(", "))]
    UnsupportedMimeType { requested: Vec<String> },

    #[error("mode '{mode}' is not supported for MIME type '{mime_type}'")]
    UnsupportedMode { mode: String, mime_type: String },

    #[error("window state '{window_state}' is not supported for MIME type '{mime_type}'")]
    UnsupportedWindowState {
        window_state: String,
        mime_type: String,
    },
}

/// Selects the best markup match for a component.
#[derive(Debug, Clone)]
pub struct Negotiator {
    validation: ValidationMode,
    default_charset: String,
}

impl Negotiator {
    pub fn new(validation: ValidationMode, default_charset: impl Into<String>) -> Self {
        Self {
            validation,
            default_charset: default_charset.into(),
        }
    }

    pub fn from_config(config: &ConfigSnapshot) -> Self {
        Self::new(config.validation(), config.default_charset())
    }

    pub fn negotiate(
        &self,
        capabilities: &CapabilityDescriptor,
        preferences: &MarkupPreferences,
    ) -> Result<NegotiatedMarkup, NegotiationError> {
        let markup_type = self.select_markup_type(capabilities, &preferences.mime_types)?;
        let locales = select_locales(markup_type, &preferences.locales);

        if !markup_type.supports_mode(&preferences.mode) {
            return Err(NegotiationError::UnsupportedMode {
                mode: preferences.mode.to_string(),
                mime_type: markup_type.mime_type.clone(),
            });
        }
        if !markup_type.supports_window_state(&preferences.window_state) {
            return Err(NegotiationError::UnsupportedWindowState {
                window_state: preferences.window_state.to_string(),
                mime_type: markup_type.mime_type.clone(),
            });
        }

        let character_set = preferences
            .character_sets
            .iter()
            .find(|wanted| {
                markup_type
                    .character_sets
                    .iter()
                    .any(|declared| declared.eq_ignore_ascii_case(wanted))
            })
            .cloned()
            .unwrap_or_else(|| self.default_charset.clone());

        Ok(NegotiatedMarkup {
            mime_type: markup_type.mime_type.clone(),
            mode: preferences.mode.clone(),
            window_state: preferences.window_state.clone(),
            character_set,
            locales,
        })
    }

    fn select_markup_type<'a>(
        &self,
        capabilities: &'a CapabilityDescriptor,
        requested: &[String],
    ) -> Result<&'a MarkupType, NegotiationError> {
        for wanted in requested {
            if let Some(found) = capabilities.markup_type(wanted) {
                return Ok(found);
            }
            if !self.validation.is_strict() {
                if let Some(found) = capabilities
                    .markup_types
                    .iter()
                    .find(|m| wildcard_matches(wanted, &m.mime_type))
                {
                    tracing::debug!("MIME wildcard '{}' matched '{}'", wanted, found.mime_type);
                    return Ok(found);
                }
            }
        }
        Err(NegotiationError::UnsupportedMimeType {
            requested: requested.to_vec(),
        })
    }
}

/// `*/*` matches anything; `type/*` matches any subtype of `type`.
fn wildcard_matches(pattern: &str, mime_type: &str) -> bool {
    if pattern == "*" || pattern == "*/*" {
        return true;
    }
    match pattern.strip_suffix("/*") {
        Some(major) => mime_type
            .split_once('/')
            .is_some_and(|(declared, _)| declared.eq_ignore_ascii_case(major)),
        None => false,
    }
}

/// Caller locales the markup type accepts, in caller order.
///
/// No declared locales accepts the caller's list as is; no overlap falls
/// back to the caller's list too.
fn select_locales(markup_type: &MarkupType, requested: &[String]) -> Vec<String> {
    if markup_type.locales.is_empty() {
        return requested.to_vec();
    }

    let matching: Vec<String> = requested
        .iter()
        .filter(|wanted| {
            markup_type
                .locales
                .iter()
                .any(|declared| same_locale(declared, wanted))
        })
        .cloned()
        .collect();

    if matching.is_empty() {
        tracing::warn!(
            "No requested locale in [{}] is declared for '{}' ([{}]); using the requested list",
            requested.join(", "),
            markup_type.mime_type,
            markup_type.locales.join(", ")
        );
        return requested.to_vec();
    }
    matching
}

/// `en-US`, `en_us` and `EN-us` are the same locale.
fn same_locale(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            let x = if x == '_' { '-' } else { x };
            let y = if y == '_' { '-' } else { y };
            x.eq_ignore_ascii_case(&y)
        })
}
