#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rstest::rstest;
use wsrp::producer::services::{
    ComponentFailure, ContentFragment, InvocationResponse, InvokerError,
};
use wsrp::producer::{
    ComponentContext, GetMarkup, MarkupParams, Producer, RegistrationContext, RuntimeContext,
    UserContext,
};
use wsrp::{FaultCode, Mode, SharedConfig, WindowState};

use crate::helpers::fixtures::*;
use crate::helpers::services::{ScriptedInvoker, StaticDescriptions, StaticRegistrations};

fn ok_invoker() -> Arc<ScriptedInvoker> {
    answering(InvocationResponse::Fragment(ContentFragment::text("ok")))
}

fn fault_of(producer: &Producer, request: GetMarkup) -> FaultCode {
    producer.get_markup(&call(), request).unwrap_err().fault_code()
}

// ============================================================================
// SESSION REJECTION
// ============================================================================

#[rstest]
#[case::plain(None, None, "wsrp:none")]
#[case::with_prefix(Some("ns"), None, "wsrp:none")]
#[case::with_instance(None, Some("inst"), "wsrp:password")]
#[case::everything(Some("ns"), Some("inst"), "wsrp:certificate")]
fn test_session_id_is_always_rejected(
    #[case] namespace_prefix: Option<&str>,
    #[case] instance_key: Option<&str>,
    #[case] auth: &str,
) {
    let invoker = ok_invoker();
    let producer = producer(invoker.clone());
    let mut request = get_markup(WEATHER);
    request.header.runtime_context = Some(RuntimeContext {
        user_authentication: auth.to_string(),
        portlet_instance_key: instance_key.map(str::to_string),
        namespace_prefix: namespace_prefix.map(str::to_string),
        session_id: Some("S-1".to_string()),
    });

    let err = producer.get_markup(&call(), request).unwrap_err();
    assert!(matches!(
        err,
        wsrp::ProducerError::SessionProtocolViolation(ref id) if id == "S-1"
    ));
    assert_eq!(err.fault_code(), FaultCode::OperationFailed);
    assert_eq!(invoker.calls(), 0);
}

#[test]
fn test_session_id_rejected_even_with_other_fields_missing() {
    let producer = producer(ok_invoker());
    let mut request = get_markup(WEATHER);
    request.header.markup_params = None;
    request.header.component_context = None;
    request.header.runtime_context.as_mut().unwrap().session_id = Some(String::new());

    let err = producer.get_markup(&call(), request).unwrap_err();
    assert!(matches!(err, wsrp::ProducerError::SessionProtocolViolation(_)));
}

// ============================================================================
// MANDATORY FIELDS AND TARGET
// ============================================================================

#[rstest]
#[case::runtime_context("runtimeContext")]
#[case::markup_params("markupParams")]
#[case::component_context("portletContext")]
#[case::user_context_key("userContextKey")]
fn test_missing_required_field(#[case] field: &str) {
    let producer = producer(ok_invoker());
    let mut request = get_markup(WEATHER);
    match field {
        "runtimeContext" => request.header.runtime_context = None,
        "markupParams" => request.header.markup_params = None,
        "portletContext" => request.header.component_context = None,
        _ => request.header.user_context = Some(UserContext::default()),
    }

    let err = producer.get_markup(&call(), request).unwrap_err();
    match err {
        wsrp::ProducerError::MissingRequiredField(name) => assert_eq!(name, field),
        other => panic!("expected a missing field, got {other:?}"),
    }
}

#[rstest]
#[case::unknown("no-such-component")]
#[case::blank("   ")]
fn test_invalid_handle(#[case] handle: &str) {
    let producer = producer(ok_invoker());
    let mut request = get_markup(WEATHER);
    request.header.component_context = Some(ComponentContext::new(handle));
    assert_eq!(fault_of(&producer, request), FaultCode::InvalidHandle);
}

// ============================================================================
// REGISTRATION
// ============================================================================

#[test]
fn test_unknown_registration() {
    let producer = producer(ok_invoker());
    let mut request = get_markup(WEATHER);
    request.header.registration_context = Some(RegistrationContext::new("reg-unknown"));
    assert_eq!(fault_of(&producer, request), FaultCode::InvalidRegistration);
}

#[test]
fn test_registration_needing_modification() {
    let registrations = StaticRegistrations {
        known: vec![REGISTRATION.to_string()],
        needs_modify: vec![REGISTRATION.to_string()],
    };
    let producer = Producer::new(
        Arc::new(registrations),
        Arc::new(StaticDescriptions::with([weather()])),
        ok_invoker(),
        SharedConfig::default(),
    );
    assert_eq!(
        fault_of(&producer, get_markup(WEATHER)),
        FaultCode::ModifyRegistrationRequired
    );
}

#[test]
fn test_unregistered_caller_is_accepted() {
    let producer = producer(ok_invoker());
    let mut request = get_markup(WEATHER);
    request.header.registration_context = None;
    assert!(producer.get_markup(&call(), request).is_ok());
}

// ============================================================================
// NEGOTIATION
// ============================================================================

fn with_params(edit: impl FnOnce(&mut MarkupParams)) -> GetMarkup {
    let mut request = get_markup(WEATHER);
    edit(request.header.markup_params.as_mut().unwrap());
    request
}

#[rstest]
#[case::mime_type(
    with_params(|p| p.mime_types = vec!["image/png".to_string()]),
    FaultCode::UnsupportedMimeType
)]
#[case::mode(with_params(|p| p.mode = Mode::Preview), FaultCode::UnsupportedMode)]
#[case::window_state(
    with_params(|p| p.window_state = WindowState::Minimized),
    FaultCode::UnsupportedWindowState
)]
#[case::mode_on_fallback_type(
    with_params(|p| {
        p.mime_types = vec!["text/plain".to_string()];
        p.mode = Mode::Edit;
    }),
    FaultCode::UnsupportedMode
)]
fn test_negotiation_failures(#[case] request: GetMarkup, #[case] expected: FaultCode) {
    let invoker = ok_invoker();
    let producer = producer(invoker.clone());
    assert_eq!(fault_of(&producer, request), expected);
    assert_eq!(invoker.calls(), 0);
}

#[test]
fn test_unsupported_locale_comes_from_description() {
    let mut descriptions = StaticDescriptions::with([weather()]);
    descriptions.supported_locales = Some(vec!["en".to_string()]);
    let producer = Producer::new(
        Arc::new(StaticRegistrations::accepting(&[REGISTRATION])),
        Arc::new(descriptions),
        ok_invoker(),
        SharedConfig::default(),
    );

    let request = with_params(|p| p.locales = vec!["ja".to_string()]);
    assert_eq!(fault_of(&producer, request), FaultCode::UnsupportedLocale);
}

#[test]
fn test_undeclared_locale_is_not_a_fault() {
    let producer = producer(ok_invoker());
    let request = with_params(|p| p.locales = vec!["ja".to_string()]);
    let markup = producer.get_markup(&call(), request).unwrap().markup_context;
    assert_eq!(markup.locale.as_deref(), Some("ja"));
}

// ============================================================================
// COMPONENT FAILURES
// ============================================================================

#[rstest]
#[case::mode(ComponentFailure::ModeNotAllowed(Mode::Edit), FaultCode::UnsupportedMode)]
#[case::window_state(
    ComponentFailure::WindowStateNotAllowed(WindowState::Maximized),
    FaultCode::UnsupportedWindowState
)]
#[case::other(
    ComponentFailure::Other { message: "template missing".to_string(), cause: None },
    FaultCode::OperationFailed
)]
fn test_component_errors_map_to_faults(#[case] failure: ComponentFailure, #[case] expected: FaultCode) {
    let producer = producer(answering(InvocationResponse::Error(failure)));
    assert_eq!(fault_of(&producer, get_markup(WEATHER)), expected);
}

#[test]
fn test_invoker_failure_keeps_cause() {
    let invoker = Arc::new(ScriptedInvoker::new(|_| {
        Err(InvokerError::Runtime {
            message: "container down".to_string(),
            source: None,
        })
    }));
    let producer = producer(invoker);

    let err = producer.get_markup(&call(), get_markup(WEATHER)).unwrap_err();
    assert_eq!(err.fault_code(), FaultCode::OperationFailed);
    let cause = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(cause.as_deref(), Some("container down"));
}

#[test]
fn test_state_update_to_render_is_operation_failed() {
    let producer = producer(answering(InvocationResponse::Update(Default::default())));
    assert_eq!(fault_of(&producer, get_markup(WEATHER)), FaultCode::OperationFailed);
}
