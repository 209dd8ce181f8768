#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rstest::rstest;
use wsrp::producer::services::{
    CacheHint, CacheScope, ContentFragment, InvocationPayload, InvocationResponse,
};
use wsrp::producer::{
    NavigationalContext, NamedString, RuntimeContext, USER_SCOPE_PER_USER, UserContext,
};
use wsrp::rewrite::{Content, namespace_for};
use wsrp::{Mode, WindowState};

use crate::helpers::fixtures::*;
use crate::helpers::services::ScriptedInvoker;

#[test]
fn test_render_rewrites_namespace_and_local_urls() {
    let invoker = Arc::new(ScriptedInvoker::new(|invocation| {
        let ns = invocation.context.window.namespace().to_string();
        Ok(InvocationResponse::Fragment(ContentFragment::text(format!(
            r#"<form id="{ns}form" action="/portal/submit"><img src="http://cdn.example/x.png"></form>"#
        ))))
    }));
    let producer = producer(invoker.clone());

    let response = producer.get_markup(&call(), get_markup(WEATHER)).unwrap();
    let markup = response.markup_context;

    assert_eq!(
        markup.content,
        Content::Text(
            r#"<form id="wsrp_rewrite_form" action="https://producer.example:8443/portal/submit"><img src="http://cdn.example/x.png"></form>"#
                .to_string()
        )
    );
    assert!(markup.requires_rewriting);
    assert_eq!(markup.mime_type, "text/html");
    assert_eq!(markup.locale.as_deref(), Some("en"));
    assert_eq!(markup.character_set, "UTF-8");
    assert_eq!(markup.preferred_title.as_deref(), Some("Weather"));
    assert_eq!(markup.cache_control, None);
    assert_eq!(invoker.calls(), 1);
}

#[test]
fn test_render_passes_negotiated_state_to_component() {
    let invoker = answering(InvocationResponse::Fragment(ContentFragment::text("ok")));
    let producer = producer(invoker.clone());

    let mut request = get_markup(WEATHER);
    let params = request.header.markup_params.as_mut().unwrap();
    params.mode = Mode::Edit;
    params.window_state = WindowState::Maximized;
    params.navigational_context = Some(NavigationalContext {
        opaque_value: Some("city=Oslo".to_string()),
        public_values: vec![NamedString::new("units", "metric")],
    });
    producer.get_markup(&call(), request).unwrap();

    let invocation = invoker.last();
    assert_eq!(invocation.target.as_str(), WEATHER);
    assert_eq!(invocation.mode, Mode::Edit);
    assert_eq!(invocation.window_state, WindowState::Maximized);
    assert_eq!(invocation.navigational_state.as_deref(), Some("city=Oslo"));
    assert_eq!(invocation.public_navigational_state, vec![NamedString::new("units", "metric")]);
    assert_eq!(invocation.payload, InvocationPayload::Render);
    assert_eq!(invocation.context.markup.mime_type, "text/html");
}

#[test]
fn test_render_falls_back_to_plain_text_component() {
    let invoker = answering(InvocationResponse::Fragment(ContentFragment::text("bonjour")));
    let producer = producer(invoker.clone());

    let mut request = get_markup(NOTES);
    let params = request.header.markup_params.as_mut().unwrap();
    params.mime_types = vec!["text/html".to_string(), "text/plain".to_string()];
    params.locales = vec!["fr".to_string()];

    let markup = producer.get_markup(&call(), request).unwrap().markup_context;
    assert_eq!(markup.mime_type, "text/plain");
    assert_eq!(markup.locale.as_deref(), Some("fr"));
    assert_eq!(markup.preferred_title, None);
}

#[test]
fn test_fragment_title_and_cache_hint() {
    let fragment = ContentFragment::text("<p>sunny</p>")
        .with_title("Oslo weather")
        .with_cache(CacheHint {
            expiration_secs: 300,
            scope: CacheScope::Private,
            validation_token: Some("v7".to_string()),
        });
    let producer = producer(answering(InvocationResponse::Fragment(fragment)));

    let markup = producer.get_markup(&call(), get_markup(WEATHER)).unwrap().markup_context;
    assert_eq!(markup.preferred_title.as_deref(), Some("Oslo weather"));
    let cache = markup.cache_control.unwrap();
    assert_eq!(cache.expires, 300);
    assert_eq!(cache.user_scope, USER_SCOPE_PER_USER);
    assert_eq!(cache.validate_tag.as_deref(), Some("v7"));
}

#[test]
fn test_binary_fragment_is_untouched() {
    let bytes = b"/not/a/url \x00\xff".to_vec();
    let fragment = ContentFragment::binary(bytes.clone(), "image/png");
    let producer = producer(answering(InvocationResponse::Fragment(fragment)));

    let markup = producer.get_markup(&call(), get_markup(WEATHER)).unwrap().markup_context;
    assert_eq!(markup.content, Content::Binary(bytes));
    assert_eq!(markup.mime_type, "image/png");
    assert!(!markup.requires_rewriting);
}

#[rstest]
#[case::namespace_prefix(Some("portal_ns_1"), Some("instance-9"), "portal_ns_1")]
#[case::instance_key(None, Some("instance-9"), "instance-9")]
#[case::empty_prefix(Some(""), Some("instance-9"), "instance-9")]
#[case::component_handle(None, None, WEATHER)]
fn test_window_identity_fallback(
    #[case] namespace_prefix: Option<&str>,
    #[case] instance_key: Option<&str>,
    #[case] expected: &str,
) {
    let invoker = answering(InvocationResponse::Fragment(ContentFragment::text("")));
    let producer = producer(invoker.clone());

    let mut request = get_markup(WEATHER);
    request.header.runtime_context = Some(RuntimeContext {
        user_authentication: "wsrp:none".to_string(),
        namespace_prefix: namespace_prefix.map(str::to_string),
        portlet_instance_key: instance_key.map(str::to_string),
        session_id: None,
    });
    producer.get_markup(&call(), request).unwrap();

    let window = invoker.last().context.window;
    assert_eq!(window.id(), expected);
    assert_eq!(window.namespace(), namespace_for(expected));
}

#[test]
fn test_security_and_user_context() {
    let invoker = answering(InvocationResponse::Fragment(ContentFragment::text("")));
    let producer = producer(invoker.clone());

    let mut request = get_markup(WEATHER);
    request.header.runtime_context.as_mut().unwrap().user_authentication =
        "wsrp:password".to_string();
    request.header.user_context = Some(UserContext {
        user_context_key: Some("alice".to_string()),
        user_categories: vec!["staff".to_string()],
        profile: None,
    });
    producer.get_markup(&call(), request).unwrap();

    let context = invoker.last().context;
    assert_eq!(context.security.auth_type, "wsrp:password");
    assert_eq!(context.security.remote_user.as_deref(), Some("alice"));
    assert!(context.security.secure);
    assert!(context.security.is_authenticated());
    let user = context.user.unwrap();
    assert_eq!(user.key, "alice");
    assert_eq!(user.categories, vec!["staff".to_string()]);
}

#[test]
fn test_anonymous_call_has_no_user() {
    let invoker = answering(InvocationResponse::Fragment(ContentFragment::text("")));
    let producer = producer(invoker.clone());
    producer.get_markup(&call(), get_markup(WEATHER)).unwrap();

    let context = invoker.last().context;
    assert!(context.user.is_none());
    assert!(!context.security.is_authenticated());
}

#[test]
fn test_render_does_not_open_state_for_writing() {
    let invoker = Arc::new(ScriptedInvoker::new(|invocation| {
        invocation.write_state(Some(vec![1]))?;
        Ok(InvocationResponse::Fragment(ContentFragment::text("")))
    }));
    let producer = producer(invoker);

    let err = producer.get_markup(&call(), get_markup(WEATHER)).unwrap_err();
    assert_eq!(err.fault_code(), wsrp::FaultCode::OperationFailed);
}

#[rstest]
#[case::plain(false, false, false)]
#[case::secure_transport(true, false, true)]
#[case::secure_client(false, true, true)]
fn test_security_context_reports_secure_hops(
    #[case] transport: bool,
    #[case] client: bool,
    #[case] expected: bool,
) {
    let invoker = answering(InvocationResponse::Fragment(ContentFragment::text("ok")));
    let producer = producer(invoker.clone());

    let mut request = get_markup(WEATHER);
    request.header.markup_params.as_mut().unwrap().secure_client_communication = client;
    producer
        .get_markup(&wsrp::CallContext::new(SERVER, transport), request)
        .unwrap();
    assert_eq!(invoker.last().context.security.secure, expected);
}

#[test]
fn test_secure_url_reaches_component() {
    let invoker = answering(InvocationResponse::Fragment(ContentFragment::text("ok")));
    let producer = producer(invoker.clone());

    let url = producer
        .decode_url("wsrp_rewrite?wsrp-urlType=render&wsrp-secureURL=true/wsrp_rewrite")
        .unwrap();
    let mut request = get_markup(WEATHER);
    request.header.markup_params.as_mut().unwrap().apply_url(&url);
    producer
        .get_markup(&wsrp::CallContext::new(SERVER, false), request)
        .unwrap();
    assert!(invoker.last().context.security.secure);
}
