#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use wsrp::producer::services::{InvocationPayload, InvocationResponse, StateUpdate};
use wsrp::producer::{Event, EventParams, HandleEvents, ProducerError, StateChange};

use crate::helpers::fixtures::*;
use crate::helpers::services::ScriptedInvoker;

fn handle_events(params: Option<EventParams>) -> HandleEvents {
    HandleEvents {
        header: header(WEATHER),
        event_params: params,
    }
}

fn params(events: Vec<Event>, change: StateChange) -> Option<EventParams> {
    Some(EventParams {
        portlet_state_change: change,
        events,
    })
}

#[test]
fn test_events_are_delivered_and_new_events_returned() {
    let invoker = Arc::new(ScriptedInvoker::new(|invocation| {
        invocation.write_state(Some(b"seen".to_vec()))?;
        Ok(InvocationResponse::Update(StateUpdate {
            events: vec![Event::new("{urn:weather}forecastChanged")],
            ..StateUpdate::default()
        }))
    }));
    let producer = producer(invoker.clone());

    let incoming = vec![Event {
        name: "{urn:geo}cityChanged".to_string(),
        payload: Some("<city>Oslo</city>".to_string()),
    }];
    let response = producer
        .handle_events(&call(), handle_events(params(incoming.clone(), StateChange::ReadWrite)))
        .unwrap();

    let update = response.update_response;
    assert_eq!(update.events, vec![Event::new("{urn:weather}forecastChanged")]);
    assert_eq!(update.component_context.unwrap().state, Some(b"seen".to_vec()));
    assert_eq!(invoker.last().payload, InvocationPayload::Event { events: incoming });
}

#[test]
fn test_events_are_required() {
    let producer = producer(answering(InvocationResponse::Update(StateUpdate::default())));

    let err = producer.handle_events(&call(), handle_events(None)).unwrap_err();
    assert!(matches!(err, ProducerError::MissingRequiredField("events")));

    let err = producer
        .handle_events(&call(), handle_events(params(Vec::new(), StateChange::ReadOnly)))
        .unwrap_err();
    assert!(matches!(err, ProducerError::MissingRequiredField("events")));
}

#[test]
fn test_event_rejects_redirect() {
    let producer = producer(answering(InvocationResponse::Redirect("/x".to_string())));
    let err = producer
        .handle_events(&call(), handle_events(params(vec![Event::new("e")], StateChange::ReadOnly)))
        .unwrap_err();
    assert!(matches!(err, ProducerError::OperationFailed { .. }));
}
