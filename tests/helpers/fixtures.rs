//! Request and component fixtures.

use std::sync::Arc;

use wsrp::producer::services::{ComponentDescription, InvocationResponse};
use wsrp::producer::{
    CallContext, ComponentContext, GetMarkup, MarkupParams, Producer, RegistrationContext,
    RequestHeader, RuntimeContext,
};
use wsrp::negotiation::{CapabilityDescriptor, MarkupType};
use wsrp::{ComponentHandle, Mode, ProducerConfig, SharedConfig, WindowState};

use super::services::{ScriptedInvoker, StaticDescriptions, StaticRegistrations};

pub const SERVER: &str = "https://producer.example:8443";
pub const REGISTRATION: &str = "reg-1";
pub const WEATHER: &str = "weather";
pub const NOTES: &str = "notes";

/// HTML (view/edit, normal/maximized, en/de) plus plain text (view only).
pub fn weather() -> ComponentDescription {
    ComponentDescription {
        handle: ComponentHandle::new(WEATHER),
        title: Some("Weather".to_string()),
        capabilities: CapabilityDescriptor::new(vec![
            MarkupType::new("text/html")
                .with_modes([Mode::View, Mode::Edit, Mode::Help])
                .with_window_states([WindowState::Normal, WindowState::Maximized])
                .with_locales(["en", "de"]),
            MarkupType::new("text/plain")
                .with_modes([Mode::View])
                .with_window_states([WindowState::Normal])
                .with_locales(["fr"]),
        ]),
    }
}

/// Plain text only, French.
pub fn notes() -> ComponentDescription {
    ComponentDescription {
        handle: ComponentHandle::new(NOTES),
        title: None,
        capabilities: CapabilityDescriptor::new(vec![
            MarkupType::new("text/plain")
                .with_modes([Mode::View])
                .with_window_states([WindowState::Normal])
                .with_locales(["fr"]),
        ]),
    }
}

pub fn call() -> CallContext {
    CallContext::new(SERVER, true)
}

pub fn markup_params() -> MarkupParams {
    MarkupParams {
        locales: vec!["en".to_string()],
        mime_types: vec!["text/html".to_string()],
        ..MarkupParams::default()
    }
}

/// A complete header targeting `handle`.
pub fn header(handle: &str) -> RequestHeader {
    RequestHeader {
        registration_context: Some(RegistrationContext::new(REGISTRATION)),
        component_context: Some(ComponentContext::new(handle)),
        runtime_context: Some(RuntimeContext {
            user_authentication: "wsrp:none".to_string(),
            ..RuntimeContext::default()
        }),
        user_context: None,
        markup_params: Some(markup_params()),
    }
}

pub fn get_markup(handle: &str) -> GetMarkup {
    GetMarkup {
        header: header(handle),
    }
}

pub fn producer_with(invoker: Arc<ScriptedInvoker>, config: ProducerConfig) -> Producer {
    Producer::new(
        Arc::new(StaticRegistrations::accepting(&[REGISTRATION])),
        Arc::new(StaticDescriptions::with([weather(), notes()])),
        invoker,
        SharedConfig::new(config),
    )
}

pub fn producer(invoker: Arc<ScriptedInvoker>) -> Producer {
    producer_with(invoker, ProducerConfig::default())
}

pub fn answering(response: InvocationResponse) -> Arc<ScriptedInvoker> {
    Arc::new(ScriptedInvoker::answering(response))
}
