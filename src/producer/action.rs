use super::error::ProducerError;
use super::processor::RequestProcessor;
use super::services::{InvocationPayload, InvocationResponse};
use super::translate::{Outcome, unexpected, update_response};
use super::types::{
    BlockingInteractionResponse, InteractionParams, PerformBlockingInteraction, RequestHeader,
    StateChange,
};

/// `performBlockingInteraction`: run an action, answer with an update or a
/// redirect.
#[derive(Debug, Clone)]
pub struct ActionProcessor {
    request: PerformBlockingInteraction,
}

impl ActionProcessor {
    pub fn new(request: PerformBlockingInteraction) -> Self {
        Self { request }
    }

    fn params(&self) -> Option<&InteractionParams> {
        self.request.interaction_params.as_ref()
    }
}

impl RequestProcessor for ActionProcessor {
    type Response = BlockingInteractionResponse;

    fn kind(&self) -> &'static str {
        "action"
    }

    fn header(&self) -> &RequestHeader {
        &self.request.header
    }

    fn check_fields(&self) -> Result<(), ProducerError> {
        self.params()
            .map(|_| ())
            .ok_or(ProducerError::MissingRequiredField("interactionParams"))
    }

    fn state_change(&self) -> StateChange {
        self.params()
            .map(|params| params.portlet_state_change)
            .unwrap_or_default()
    }

    fn payload(&self) -> InvocationPayload {
        let params = self.params().cloned().unwrap_or_default();
        InvocationPayload::Action {
            interaction_state: params.interaction_state,
            form_parameters: params.form_parameters,
            uploads: params.uploads,
        }
    }

    fn translate(
        &self,
        response: InvocationResponse,
        mut outcome: Outcome<'_>,
    ) -> Result<BlockingInteractionResponse, ProducerError> {
        match response {
            InvocationResponse::Update(update) => Ok(BlockingInteractionResponse::Update(
                update_response(update, &mut outcome),
            )),
            InvocationResponse::Redirect(location) => {
                tracing::debug!("Action redirects to '{}'", location);
                Ok(BlockingInteractionResponse::Redirect(location))
            }
            other => Err(unexpected(self.kind(), &other)),
        }
    }
}
