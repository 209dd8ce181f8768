use super::error::ProducerError;
use super::processor::RequestProcessor;
use super::services::{InvocationPayload, InvocationResponse};
use super::translate::{Outcome, unexpected, update_response};
use super::types::{EventParams, HandleEvents, HandleEventsResponse, RequestHeader, StateChange};

/// `handleEvents`: deliver events; the component answers with a state update.
#[derive(Debug, Clone)]
pub struct EventProcessor {
    request: HandleEvents,
}

impl EventProcessor {
    pub fn new(request: HandleEvents) -> Self {
        Self { request }
    }

    fn params(&self) -> Option<&EventParams> {
        self.request.event_params.as_ref()
    }
}

impl RequestProcessor for EventProcessor {
    type Response = HandleEventsResponse;

    fn kind(&self) -> &'static str {
        "event"
    }

    fn header(&self) -> &RequestHeader {
        &self.request.header
    }

    fn check_fields(&self) -> Result<(), ProducerError> {
        match self.params() {
            Some(params) if !params.events.is_empty() => Ok(()),
            _ => Err(ProducerError::MissingRequiredField("events")),
        }
    }

    fn state_change(&self) -> StateChange {
        self.params()
            .map(|params| params.portlet_state_change)
            .unwrap_or_default()
    }

    fn payload(&self) -> InvocationPayload {
        InvocationPayload::Event {
            events: self
                .params()
                .map(|params| params.events.clone())
                .unwrap_or_default(),
        }
    }

    fn translate(
        &self,
        response: InvocationResponse,
        mut outcome: Outcome<'_>,
    ) -> Result<HandleEventsResponse, ProducerError> {
        match response {
            InvocationResponse::Update(update) => Ok(HandleEventsResponse {
                update_response: update_response(update, &mut outcome),
            }),
            other => Err(unexpected(self.kind(), &other)),
        }
    }
}
