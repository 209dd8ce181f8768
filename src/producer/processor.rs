//! The request-processing state machine shared by every request kind.
//!
//! ```text
//! registration → mandatory fields → target → negotiation
//!              → execution context → dispatch → translation
//! ```
//!
//! Each stage either advances or fails with a typed [`ProducerError`];
//! there is no retry and no partial result.

use super::Producer;
use super::context::{CallContext, ExecutionContext, InstanceContext, SecurityContext, UserInfo, WindowContext};
use super::error::ProducerError;
use super::services::{Invocation, InvocationPayload, InvocationResponse};
use super::translate::{Outcome, component_failure};
use super::types::{ComponentContext, MarkupParams, RequestHeader, RuntimeContext, StateChange, UserContext};
use crate::base::ComponentHandle;
use crate::config::ConfigSnapshot;
use crate::negotiation::{MarkupPreferences, NegotiatedMarkup, Negotiator};
use crate::rewrite::ContentRewriter;

/// One request kind's contribution to the pipeline.
pub trait RequestProcessor {
    type Response;

    /// Short name for logs and faults
    fn kind(&self) -> &'static str;

    fn header(&self) -> &RequestHeader;

    /// Fields the kind requires beyond the shared ones
    fn check_fields(&self) -> Result<(), ProducerError> {
        Ok(())
    }

    /// Access the component's persistent state is opened with
    fn state_change(&self) -> StateChange {
        StateChange::ReadOnly
    }

    fn payload(&self) -> InvocationPayload;

    /// Map a non-error component response to the protocol response
    fn translate(
        &self,
        response: InvocationResponse,
        outcome: Outcome<'_>,
    ) -> Result<Self::Response, ProducerError>;
}

/// Mandatory parts of the shared header, once checked.
struct Checked<'a> {
    runtime: &'a RuntimeContext,
    params: &'a MarkupParams,
    component: &'a ComponentContext,
}

pub(crate) fn run<P: RequestProcessor>(
    producer: &Producer,
    config: &ConfigSnapshot,
    call: &CallContext,
    processor: &P,
) -> Result<P::Response, ProducerError> {
    let kind = processor.kind();
    let header = processor.header();
    tracing::debug!("Processing {} request (config generation {})", kind, config.generation());

    let registration = producer
        .registrations
        .validate(header.registration_context.as_ref())?;
    tracing::trace!("Registration accepted: {:?}", registration.handle);

    let checked = check_mandatory(header)?;
    processor.check_fields()?;

    let handle = ComponentHandle::new(&checked.component.handle);
    if handle.is_empty() {
        return Err(ProducerError::InvalidHandle(checked.component.handle.clone()));
    }
    let description = producer
        .descriptions
        .describe(&registration, &handle, &checked.params.locales)?;

    let markup = Negotiator::from_config(config).negotiate(
        &description.capabilities,
        &preferences(checked.params),
    )?;
    tracing::debug!(
        "Negotiated {} / {} / {} for '{}'",
        markup.mime_type,
        markup.mode,
        markup.window_state,
        handle
    );

    let context = execution_context(
        call,
        header.user_context.as_ref(),
        &checked,
        handle.clone(),
        processor.state_change(),
        markup,
    )?;
    let rewriter = ContentRewriter::new(context.window.namespace(), call.server_address.as_str());

    let navigational = checked.params.navigational_context.as_ref();
    let mut invocation = Invocation {
        target: handle,
        mode: context.markup.mode.clone(),
        window_state: context.markup.window_state.clone(),
        navigational_state: navigational.and_then(|nav| nav.opaque_value.clone()),
        public_navigational_state: navigational
            .map(|nav| nav.public_values.clone())
            .unwrap_or_default(),
        payload: processor.payload(),
        context,
    };

    let response = producer.invoker.invoke(&mut invocation)?;
    tracing::debug!(
        "Component '{}' answered {} with {}",
        invocation.target,
        kind,
        response.kind()
    );

    if let InvocationResponse::Error(failure) = response {
        let err = component_failure(failure);
        tracing::warn!("Component '{}' failed: {}", invocation.target, err);
        return Err(err);
    }

    processor.translate(
        response,
        Outcome {
            context: &mut invocation.context,
            description: &description,
            rewriter: &rewriter,
        },
    )
}

fn check_mandatory(header: &RequestHeader) -> Result<Checked<'_>, ProducerError> {
    let runtime = header
        .runtime_context
        .as_ref()
        .ok_or(ProducerError::MissingRequiredField("runtimeContext"))?;
    if let Some(session_id) = &runtime.session_id {
        tracing::warn!("Rejecting caller-supplied session id '{}'", session_id);
        return Err(ProducerError::SessionProtocolViolation(session_id.clone()));
    }

    let params = header
        .markup_params
        .as_ref()
        .ok_or(ProducerError::MissingRequiredField("markupParams"))?;
    let component = header
        .component_context
        .as_ref()
        .ok_or(ProducerError::MissingRequiredField("portletContext"))?;

    Ok(Checked {
        runtime,
        params,
        component,
    })
}

fn preferences(params: &MarkupParams) -> MarkupPreferences {
    MarkupPreferences {
        mime_types: params.mime_types.clone(),
        mode: params.mode.clone(),
        window_state: params.window_state.clone(),
        locales: params.locales.clone(),
        character_sets: params.markup_character_sets.clone(),
    }
}

fn execution_context(
    call: &CallContext,
    user_context: Option<&UserContext>,
    checked: &Checked<'_>,
    handle: ComponentHandle,
    access: StateChange,
    markup: NegotiatedMarkup,
) -> Result<ExecutionContext, ProducerError> {
    let user = user_context.map(user_info).transpose()?;
    let security = SecurityContext {
        auth_type: checked.runtime.user_authentication.clone(),
        remote_user: user.as_ref().map(|user| user.key.clone()),
        // The client leg counts as secure when either hop reports it.
        secure: call.secure || checked.params.secure_client_communication,
    };

    let window_id = [
        checked.runtime.namespace_prefix.as_deref(),
        checked.runtime.portlet_instance_key.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|id| !id.is_empty())
    .unwrap_or(handle.as_str())
    .to_string();

    Ok(ExecutionContext {
        security,
        user,
        window: WindowContext::new(window_id),
        instance: InstanceContext::new(handle, checked.component.state.clone(), access),
        markup,
    })
}

fn user_info(context: &UserContext) -> Result<UserInfo, ProducerError> {
    let key = context
        .user_context_key
        .as_ref()
        .filter(|key| !key.is_empty())
        .ok_or(ProducerError::MissingRequiredField("userContextKey"))?;
    Ok(UserInfo {
        key: key.clone(),
        categories: context.user_categories.clone(),
        profile: context.profile.clone(),
    })
}
