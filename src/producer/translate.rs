//! Component responses to protocol responses.

use super::context::ExecutionContext;
use super::error::ProducerError;
use super::services::{
    CacheHint, CacheScope, ComponentDescription, ComponentFailure, ContentFragment,
    InvocationResponse, StateUpdate,
};
use super::types::{
    CacheControl, MarkupContext, NavigationalContext, ResourceContext, UpdateResponse,
};
use crate::rewrite::ContentRewriter;

pub const USER_SCOPE_PER_USER: &str = "wsrp:perUser";
pub const USER_SCOPE_FOR_ALL: &str = "wsrp:forAll";

/// What the translators need besides the component's response.
#[derive(Debug)]
pub struct Outcome<'a> {
    pub context: &'a mut ExecutionContext,
    pub description: &'a ComponentDescription,
    pub rewriter: &'a ContentRewriter,
}

/// Cache hint to wire cache control. A zero expiration means no caching.
pub fn cache_control(hint: Option<&CacheHint>) -> Option<CacheControl> {
    let hint = hint?;
    if hint.expiration_secs == 0 {
        return None;
    }
    Some(CacheControl {
        expires: hint.expiration_secs.max(-1),
        user_scope: match hint.scope {
            CacheScope::Private => USER_SCOPE_PER_USER,
            CacheScope::Public => USER_SCOPE_FOR_ALL,
        }
        .to_string(),
        validate_tag: hint.validation_token.clone(),
    })
}

pub fn component_failure(failure: ComponentFailure) -> ProducerError {
    match failure {
        ComponentFailure::ModeNotAllowed(mode) => ProducerError::UnsupportedMode(mode.to_string()),
        ComponentFailure::WindowStateNotAllowed(state) => {
            ProducerError::UnsupportedWindowState(state.to_string())
        }
        ComponentFailure::Other { message, cause } => match cause {
            Some(cause) => ProducerError::operation_failed_with(message, cause),
            None => ProducerError::operation_failed(message),
        },
    }
}

/// Failure for a response variant the request kind cannot carry.
pub fn unexpected(request_kind: &str, response: &InvocationResponse) -> ProducerError {
    tracing::warn!(
        "Component returned a {} response to a {} request",
        response.kind(),
        request_kind
    );
    ProducerError::operation_failed(format!(
        "unexpected {} response to a {} request",
        response.kind(),
        request_kind
    ))
}

pub fn markup_context(fragment: ContentFragment, outcome: &Outcome<'_>) -> MarkupContext {
    let markup = &outcome.context.markup;
    let requires_rewriting = !fragment.content.is_binary();
    MarkupContext {
        mime_type: fragment.mime_type.unwrap_or_else(|| markup.mime_type.clone()),
        content: outcome.rewriter.rewrite(fragment.content),
        locale: markup.preferred_locale().map(str::to_string),
        character_set: markup.character_set.clone(),
        requires_rewriting,
        cache_control: cache_control(fragment.cache.as_ref()),
        preferred_title: fragment.title.or_else(|| outcome.description.title.clone()),
    }
}

pub fn resource_context(fragment: ContentFragment, outcome: &Outcome<'_>) -> ResourceContext {
    let markup = &outcome.context.markup;
    let requires_rewriting = !fragment.content.is_binary();
    ResourceContext {
        mime_type: fragment.mime_type.unwrap_or_else(|| markup.mime_type.clone()),
        content: outcome.rewriter.rewrite(fragment.content),
        character_set: markup.character_set.clone(),
        requires_rewriting,
        cache_control: cache_control(fragment.cache.as_ref()),
    }
}

/// Carries new mode, window state, navigational state, events, and the
/// component context when the invocation wrote state.
pub fn update_response(update: StateUpdate, outcome: &mut Outcome<'_>) -> UpdateResponse {
    let navigational_context =
        if update.navigational_state.is_some() || !update.public_navigational_state.is_empty() {
            Some(NavigationalContext {
                opaque_value: update.navigational_state,
                public_values: update.public_navigational_state,
            })
        } else {
            None
        };

    UpdateResponse {
        navigational_context,
        new_mode: update.mode,
        new_window_state: update.window_state,
        component_context: outcome.context.instance.take_modified(),
        events: update.events,
    }
}
