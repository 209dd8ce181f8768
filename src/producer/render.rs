use super::error::ProducerError;
use super::processor::RequestProcessor;
use super::services::{InvocationPayload, InvocationResponse};
use super::translate::{Outcome, markup_context, unexpected};
use super::types::{GetMarkup, MarkupResponse, RequestHeader};

/// `getMarkup`: render the component's current view.
#[derive(Debug, Clone)]
pub struct RenderProcessor {
    request: GetMarkup,
}

impl RenderProcessor {
    pub fn new(request: GetMarkup) -> Self {
        Self { request }
    }
}

impl RequestProcessor for RenderProcessor {
    type Response = MarkupResponse;

    fn kind(&self) -> &'static str {
        "render"
    }

    fn header(&self) -> &RequestHeader {
        &self.request.header
    }

    fn payload(&self) -> InvocationPayload {
        InvocationPayload::Render
    }

    fn translate(
        &self,
        response: InvocationResponse,
        outcome: Outcome<'_>,
    ) -> Result<MarkupResponse, ProducerError> {
        match response {
            InvocationResponse::Fragment(fragment) => Ok(MarkupResponse {
                markup_context: markup_context(fragment, &outcome),
            }),
            other => Err(unexpected(self.kind(), &other)),
        }
    }
}
