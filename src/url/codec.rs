//! Encoding and decoding of rewritten URLs.
//!
//! ## Wire form
//!
//! ```text
//! wsrp_rewrite?wsrp-urlType=<kind>[&name=value]*/wsrp_rewrite[extra]
//! ```
//!
//! Parameters are emitted in a fixed order: url type, secure flag, mode,
//! window state, navigational state, fragment id, then the kind-specific
//! ones.

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::error::{MalformedReason, UrlError};
use super::lexer::{RawParam, split_parameters, strip_leading_separator};
use super::model::{ActionTarget, ExtraPosition, Extras, PortalUrl, ResourceTarget, UrlKind};
use crate::base::constants::*;
use crate::base::{Cacheability, Mode, WindowState};
use crate::config::{ConfigSnapshot, ProducerConfig};

/// Characters escaped in mode and window-state values. `:` stays literal.
const NAME_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?');

/// Characters escaped in the resource URL value.
const RESOURCE_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Options controlling [`UrlCodec::encode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Join parameters with `&amp;` instead of `&`
    pub escape_xml: bool,
}

/// Encodes [`PortalUrl`]s to wire text and decodes them back.
///
/// Bound to one configuration snapshot: the validation mode and the
/// registered custom modes / window states.
#[derive(Debug, Clone)]
pub struct UrlCodec {
    config: Arc<ConfigSnapshot>,
}

impl UrlCodec {
    pub fn new(config: Arc<ConfigSnapshot>) -> Self {
        Self { config }
    }

    /// A strict codec with no custom modes or window states.
    pub fn strict() -> Self {
        Self::new(ConfigSnapshot::standalone(ProducerConfig::default()))
    }

    /// A relaxed codec with no custom modes or window states.
    pub fn relaxed() -> Self {
        Self::new(ConfigSnapshot::standalone(ProducerConfig::relaxed()))
    }

    pub fn is_strict(&self) -> bool {
        self.config.is_strict()
    }

    // =========================================================================
    // ENCODING
    // =========================================================================

    pub fn encode(&self, url: &PortalUrl) -> String {
        self.encode_with(url, EncodeOptions::default())
    }

    pub fn encode_with(&self, url: &PortalUrl, options: EncodeOptions) -> String {
        let mut writer = ParamWriter::new(options);

        writer.first(URL_TYPE, url.type_name());
        if url.is_secure() {
            writer.param(SECURE_URL, "true");
        }
        if let Some(mode) = url.mode() {
            writer.param(MODE, &utf8_percent_encode(mode.as_str(), NAME_VALUE).to_string());
        }
        if let Some(state) = url.window_state() {
            writer.param(WINDOW_STATE, &utf8_percent_encode(state.as_str(), NAME_VALUE).to_string());
        }
        if let Some(nav) = url.navigational_state() {
            writer.param(NAVIGATIONAL_STATE, nav);
        }
        if let Some(fragment_id) = url.fragment_id() {
            writer.param(FRAGMENT_ID, fragment_id);
        }

        match url.kind() {
            UrlKind::Render => {}
            UrlKind::Action(action) => {
                if let Some(state) = &action.interaction_state {
                    writer.param(INTERACTION_STATE, state);
                }
            }
            UrlKind::Resource(resource) => {
                writer.param(
                    RESOURCE_URL,
                    &utf8_percent_encode(&resource.url, RESOURCE_VALUE).to_string(),
                );
                writer.param(
                    RESOURCE_REQUIRES_REWRITE,
                    if resource.requires_rewrite { "true" } else { "false" },
                );
                if let Some(id) = &resource.resource_id {
                    writer.param(RESOURCE_ID, id);
                }
                if let Some(state) = &resource.resource_state {
                    writer.param(RESOURCE_STATE, state);
                }
                if let Some(cacheability) = resource.cacheability {
                    writer.param(RESOURCE_CACHEABILITY, cacheability.as_str());
                }
            }
        }

        let extras = url.extras();
        if !self.is_strict() {
            for (name, value) in extras.parameters(ExtraPosition::BeforeEnd) {
                writer.param(name, value);
            }
        }
        writer.raw(END_REWRITE);
        if !self.is_strict() {
            for (name, value) in extras.parameters(ExtraPosition::AfterEnd) {
                writer.param(name, value);
            }
        }
        if let Some(trailing) = extras.trailing() {
            writer.raw(trailing);
        }

        writer.finish()
    }

    // =========================================================================
    // DECODING
    // =========================================================================

    /// Decode wire text into a [`PortalUrl`].
    pub fn decode(&self, text: &str) -> Result<PortalUrl, UrlError> {
        let malformed = |reason| UrlError::malformed(text, reason);

        let Some(body) = text.strip_prefix(BEGIN_REWRITE) else {
            return Err(malformed(MalformedReason::MissingBeginMarker));
        };
        if text.contains(DOUBLE_ENCODED_AMPERSAND) {
            return Err(malformed(MalformedReason::DoubleEncodedSeparator));
        }

        // The end marker normally closes the text; anything after it was
        // concatenated by the caller (typically a context path).
        let end = body
            .find(END_REWRITE)
            .ok_or_else(|| malformed(MalformedReason::MissingEndMarker))?;
        let params_text = &body[..end];
        let mut extras = self.decode_tail(text, &body[end + END_REWRITE.len()..])?;

        let raw = split_parameters(params_text)
            .map_err(|segment| malformed(MalformedReason::BadParameter(segment.to_string())))?;
        let (first, rest) = raw
            .split_first()
            .ok_or_else(|| malformed(MalformedReason::MissingUrlType))?;
        if first.name != URL_TYPE {
            return Err(malformed(MalformedReason::MissingUrlType));
        }

        let mut params = self.collect_parameters(text, rest)?;

        let mode = params
            .shift_remove(MODE)
            .map(|value| self.decode_mode(text, value))
            .transpose()?;
        let window_state = params
            .shift_remove(WINDOW_STATE)
            .map(|value| self.decode_window_state(text, value))
            .transpose()?;
        let secure = match params.shift_remove(SECURE_URL) {
            Some(value) => self.decode_bool(text, SECURE_URL, value)?,
            None => false,
        };
        let navigational_state = params.shift_remove(NAVIGATIONAL_STATE).map(str::to_string);
        let fragment_id = params.shift_remove(FRAGMENT_ID).map(str::to_string);

        let kind = match first.value {
            URL_TYPE_RENDER => UrlKind::Render,
            URL_TYPE_BLOCKING_ACTION => UrlKind::Action(ActionTarget {
                interaction_state: params
                    .shift_remove(INTERACTION_STATE)
                    .map(|value| repair_interaction_state(value).to_string()),
            }),
            URL_TYPE_RESOURCE => UrlKind::Resource(self.decode_resource(text, &mut params)?),
            other => return Err(malformed(MalformedReason::UnknownUrlType(other.to_string()))),
        };

        for (name, value) in params {
            if self.is_strict() {
                if RESERVED_PARAMETERS.iter().any(|reserved| *reserved == name) {
                    tracing::debug!("Ignoring reserved parameter '{}' in '{}'", name, text);
                } else {
                    tracing::debug!("Ignoring unrecognized parameter '{}' in '{}'", name, text);
                }
            } else {
                tracing::warn!("Keeping unrecognized parameter '{}' in '{}' as extra", name, text);
                extras.insert(name, value, ExtraPosition::BeforeEnd);
            }
        }

        let mut url = PortalUrl::new(kind).with_secure(secure).with_extras(extras);
        if let Some(mode) = mode {
            url = url.with_mode(mode);
        }
        if let Some(state) = window_state {
            url = url.with_window_state(state);
        }
        if let Some(nav) = navigational_state {
            url = url.with_navigational_state(nav);
        }
        if let Some(fragment_id) = fragment_id {
            url = url.with_fragment_id(fragment_id);
        }
        Ok(url)
    }

    /// Handle whatever follows the end marker.
    fn decode_tail(&self, text: &str, tail: &str) -> Result<Extras, UrlError> {
        let mut extras = Extras::default();
        if tail.is_empty() {
            return Ok(extras);
        }

        let (stray, rest) = match tail.find('/') {
            Some(slash) => tail.split_at(slash),
            None => (tail, ""),
        };

        if stray.is_empty() {
            extras.set_trailing(Some(rest.to_string()));
            return Ok(extras);
        }

        if self.is_strict() {
            return Err(UrlError::malformed(
                text,
                MalformedReason::TextAfterEndMarker(stray.to_string()),
            ));
        }

        tracing::warn!("Accepting text '{}' after the end marker of '{}'", stray, text);
        let after_params = strip_leading_separator(stray).and_then(|s| split_parameters(s).ok());
        match after_params {
            Some(params) => {
                for RawParam { name, value } in params {
                    extras.insert(name, value, ExtraPosition::AfterEnd);
                }
                if !rest.is_empty() {
                    extras.set_trailing(Some(rest.to_string()));
                }
            }
            None => extras.set_trailing(Some(tail.to_string())),
        }
        Ok(extras)
    }

    /// Index parameters by name, enforcing prefix and uniqueness rules.
    fn collect_parameters<'a>(
        &self,
        text: &str,
        raw: &[RawParam<'a>],
    ) -> Result<IndexMap<&'a str, &'a str>, UrlError> {
        let mut params = IndexMap::with_capacity(raw.len());
        for param in raw {
            if self.is_strict() && !is_wsrp_parameter(param.name) {
                return Err(UrlError::malformed(
                    text,
                    MalformedReason::DisallowedParameter(param.name.to_string()),
                ));
            }
            if params.contains_key(param.name) {
                if self.is_strict() {
                    return Err(UrlError::malformed(
                        text,
                        MalformedReason::DuplicateParameter(param.name.to_string()),
                    ));
                }
                tracing::warn!("Ignoring repeated parameter '{}' in '{}'", param.name, text);
                continue;
            }
            params.insert(param.name, param.value);
        }
        Ok(params)
    }

    fn decode_mode(&self, text: &str, value: &str) -> Result<Mode, UrlError> {
        let name = decode_value(text, MODE, value)?;
        if let Some(mode) = Mode::from_default(&name) {
            return Ok(mode);
        }
        if self.config.is_registered_mode(&name) {
            return Ok(Mode::from_wire(&name));
        }
        Err(UrlError::UnsupportedMode {
            url: text.to_string(),
            mode: name.into_owned(),
        })
    }

    fn decode_window_state(&self, text: &str, value: &str) -> Result<WindowState, UrlError> {
        let name = decode_value(text, WINDOW_STATE, value)?;
        if let Some(state) = WindowState::from_default(&name) {
            return Ok(state);
        }
        if self.config.is_registered_window_state(&name) {
            return Ok(WindowState::from_wire(&name));
        }
        Err(UrlError::UnsupportedWindowState {
            url: text.to_string(),
            window_state: name.into_owned(),
        })
    }

    fn decode_bool(&self, text: &str, name: &'static str, value: &str) -> Result<bool, UrlError> {
        match value {
            "true" => Ok(true),
            "false" => Ok(false),
            _ if !self.is_strict() => Ok(value.eq_ignore_ascii_case("true")),
            _ => Err(UrlError::malformed(
                text,
                MalformedReason::InvalidValue {
                    name,
                    value: value.to_string(),
                },
            )),
        }
    }

    fn decode_resource(
        &self,
        text: &str,
        params: &mut IndexMap<&str, &str>,
    ) -> Result<ResourceTarget, UrlError> {
        let url = params
            .shift_remove(RESOURCE_URL)
            .ok_or_else(|| UrlError::malformed(text, MalformedReason::MissingParameter(RESOURCE_URL)))?;
        let requires_rewrite = params.shift_remove(RESOURCE_REQUIRES_REWRITE).ok_or_else(|| {
            UrlError::malformed(text, MalformedReason::MissingParameter(RESOURCE_REQUIRES_REWRITE))
        })?;

        let url = decode_value(text, RESOURCE_URL, url)?;
        if ::url::Url::parse(&url).is_err() {
            return Err(UrlError::malformed(
                text,
                MalformedReason::InvalidValue {
                    name: RESOURCE_URL,
                    value: url.into_owned(),
                },
            ));
        }
        let requires_rewrite = self.decode_bool(text, RESOURCE_REQUIRES_REWRITE, requires_rewrite)?;

        let cacheability = params
            .shift_remove(RESOURCE_CACHEABILITY)
            .map(|value| {
                Cacheability::from_wire(value).ok_or_else(|| {
                    UrlError::malformed(
                        text,
                        MalformedReason::InvalidValue {
                            name: RESOURCE_CACHEABILITY,
                            value: value.to_string(),
                        },
                    )
                })
            })
            .transpose()?;

        Ok(ResourceTarget {
            url: url.into_owned(),
            requires_rewrite,
            resource_id: params.shift_remove(RESOURCE_ID).map(str::to_string),
            resource_state: params.shift_remove(RESOURCE_STATE).map(str::to_string),
            cacheability,
        })
    }
}

/// Strip the stray trailing backslash a past double-encoding bug appended
/// to sentinel-prefixed interaction states. Applies to nothing else.
fn repair_interaction_state(value: &str) -> &str {
    if value.starts_with(INTERACTION_STATE_SENTINEL) {
        if let Some(repaired) = value.strip_suffix('\\') {
            tracing::debug!("Stripped trailing backslash from interaction state '{}'", value);
            return repaired;
        }
    }
    value
}

fn decode_value<'a>(text: &str, name: &'static str, value: &'a str) -> Result<Cow<'a, str>, UrlError> {
    percent_decode_str(value).decode_utf8().map_err(|_| {
        UrlError::malformed(
            text,
            MalformedReason::InvalidValue {
                name,
                value: value.to_string(),
            },
        )
    })
}

/// Accumulates `name=value` pairs with the chosen separator.
struct ParamWriter {
    out: String,
    separator: &'static str,
}

impl ParamWriter {
    fn new(options: EncodeOptions) -> Self {
        let mut out = String::with_capacity(128);
        out.push_str(BEGIN_REWRITE);
        Self {
            out,
            separator: if options.escape_xml {
                ENCODED_AMPERSAND
            } else {
                AMPERSAND
            },
        }
    }

    fn first(&mut self, name: &str, value: &str) {
        self.out.push_str(name);
        self.out.push_str(EQUALS);
        self.out.push_str(value);
    }

    fn param(&mut self, name: &str, value: &str) {
        self.out.push_str(self.separator);
        self.first(name, value);
    }

    fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn finish(self) -> String {
        self.out
    }
}

