use super::error::ProducerError;
use super::processor::RequestProcessor;
use super::services::{InvocationPayload, InvocationResponse};
use super::translate::{Outcome, resource_context, unexpected};
use super::types::{GetResource, RequestHeader, ResourceParams, ResourceResponse, StateChange};

/// `getResource`: serve a resource the component's markup links to.
#[derive(Debug, Clone)]
pub struct ResourceProcessor {
    request: GetResource,
}

impl ResourceProcessor {
    pub fn new(request: GetResource) -> Self {
        Self { request }
    }

    fn params(&self) -> Option<&ResourceParams> {
        self.request.resource_params.as_ref()
    }
}

impl RequestProcessor for ResourceProcessor {
    type Response = ResourceResponse;

    fn kind(&self) -> &'static str {
        "resource"
    }

    fn header(&self) -> &RequestHeader {
        &self.request.header
    }

    fn check_fields(&self) -> Result<(), ProducerError> {
        self.params()
            .map(|_| ())
            .ok_or(ProducerError::MissingRequiredField("resourceParams"))
    }

    fn state_change(&self) -> StateChange {
        self.params()
            .map(|params| params.portlet_state_change)
            .unwrap_or_default()
    }

    fn payload(&self) -> InvocationPayload {
        let params = self.params().cloned().unwrap_or_default();
        InvocationPayload::Resource {
            resource_id: params.resource_id,
            resource_state: params.resource_state,
            cacheability: params.resource_cacheability,
            form_parameters: params.form_parameters,
        }
    }

    fn translate(
        &self,
        response: InvocationResponse,
        mut outcome: Outcome<'_>,
    ) -> Result<ResourceResponse, ProducerError> {
        match response {
            InvocationResponse::Fragment(fragment) => Ok(ResourceResponse {
                resource_context: resource_context(fragment, &outcome),
                component_context: outcome.context.instance.take_modified(),
            }),
            other => Err(unexpected(self.kind(), &other)),
        }
    }
}
