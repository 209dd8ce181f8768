#![allow(clippy::unwrap_used)]

use wsrp::producer::services::{ContentFragment, InvocationResponse};
use wsrp::{FaultCode, Mode, ProducerConfig, ValidationMode};

use crate::helpers::fixtures::*;

const UNPREFIXED: &str = "wsrp_rewrite?wsrp-urlType=render&lang=en/wsrp_rewrite";
const CUSTOM_MODE: &str = "wsrp_rewrite?wsrp-urlType=render&wsrp-mode=urn:mode:print/wsrp_rewrite";

#[test]
fn test_reload_switches_url_validation() {
    let producer = producer(answering(InvocationResponse::Fragment(ContentFragment::text(""))));

    let err = producer.decode_url(UNPREFIXED).unwrap_err();
    assert_eq!(err.fault_code(), FaultCode::InconsistentParameters);

    let generation = producer.config().reload(ProducerConfig::relaxed()).unwrap();
    assert_eq!(generation, 2);

    let url = producer.decode_url(UNPREFIXED).unwrap();
    assert_eq!(url.extras().get("lang"), Some("en"));
    assert_eq!(producer.url_codec().encode(&url), UNPREFIXED);
}

#[test]
fn test_reload_registers_custom_modes() {
    let producer = producer(answering(InvocationResponse::Fragment(ContentFragment::text(""))));
    assert!(producer.decode_url(CUSTOM_MODE).is_err());

    producer
        .config()
        .reload(ProducerConfig::default().with_custom_mode("urn:mode:print"))
        .unwrap();
    let url = producer.decode_url(CUSTOM_MODE).unwrap();
    assert_eq!(url.mode(), Some(&Mode::from_wire("urn:mode:print")));
}

#[test]
fn test_invalid_reload_keeps_previous_config() {
    let producer = producer(answering(InvocationResponse::Fragment(ContentFragment::text(""))));
    let before = producer.config().snapshot().generation();

    assert!(producer.config().reload(ProducerConfig::default().with_custom_mode("wsrp:view")).is_err());
    assert_eq!(producer.config().snapshot().generation(), before);
}

#[test]
fn test_relaxed_config_allows_mime_wildcards() {
    let invoker = answering(InvocationResponse::Fragment(ContentFragment::text("")));
    let strict = producer(invoker.clone());
    let relaxed = producer_with(invoker, ProducerConfig::relaxed());

    let mut request = get_markup(WEATHER);
    request.header.markup_params.as_mut().unwrap().mime_types = vec!["text/*".to_string()];

    let err = strict.get_markup(&call(), request.clone()).unwrap_err();
    assert_eq!(err.fault_code(), FaultCode::UnsupportedMimeType);

    let markup = relaxed.get_markup(&call(), request).unwrap().markup_context;
    assert_eq!(markup.mime_type, "text/html");
    assert_eq!(relaxed.config().snapshot().validation(), ValidationMode::Relaxed);
}
