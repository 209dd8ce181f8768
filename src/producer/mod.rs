//! Producer-side request processing.
//!
//! ## Layout
//!
//! ```text
//! Producer      → facade: one snapshot of config per call
//!   ↓
//! processor     → shared state machine (RequestProcessor trait)
//!   ↓
//! render/action/resource/event → per-kind fields, payload, translation
//!   ↓
//! translate     → component response → protocol response
//! ```
//!
//! Collaborators (registration, description, component runtime) are
//! reached through the traits in [`services`]. Every call builds its own
//! [`ExecutionContext`]; nothing is shared between concurrent calls apart
//! from the configuration snapshot.

mod action;
mod context;
mod error;
mod event;
mod processor;
mod render;
mod resource;
pub mod services;
mod translate;
mod types;

use std::sync::Arc;

pub use action::ActionProcessor;
pub use context::{
    CallContext, ExecutionContext, InstanceContext, InstanceError, SecurityContext, UserInfo,
    WindowContext,
};
pub use error::{FaultCode, ProducerError};
pub use event::EventProcessor;
pub use processor::RequestProcessor;
pub use render::RenderProcessor;
pub use resource::ResourceProcessor;
pub use services::{ComponentInvoker, DescriptionService, RegistrationService};
pub use translate::{Outcome, USER_SCOPE_FOR_ALL, USER_SCOPE_PER_USER, cache_control};
pub use types::*;

use crate::config::SharedConfig;
use crate::url::{PortalUrl, UrlCodec};

/// Entry point for inbound protocol operations.
#[derive(Clone)]
pub struct Producer {
    registrations: Arc<dyn RegistrationService>,
    descriptions: Arc<dyn DescriptionService>,
    invoker: Arc<dyn ComponentInvoker>,
    config: SharedConfig,
}

impl Producer {
    pub fn new(
        registrations: Arc<dyn RegistrationService>,
        descriptions: Arc<dyn DescriptionService>,
        invoker: Arc<dyn ComponentInvoker>,
        config: SharedConfig,
    ) -> Self {
        Self {
            registrations,
            descriptions,
            invoker,
            config,
        }
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Codec bound to the current configuration
    pub fn url_codec(&self) -> UrlCodec {
        UrlCodec::new(self.config.snapshot())
    }

    pub fn decode_url(&self, text: &str) -> Result<PortalUrl, ProducerError> {
        Ok(self.url_codec().decode(text)?)
    }

    pub fn get_markup(
        &self,
        call: &CallContext,
        request: GetMarkup,
    ) -> Result<MarkupResponse, ProducerError> {
        self.process(call, &RenderProcessor::new(request))
    }

    pub fn perform_blocking_interaction(
        &self,
        call: &CallContext,
        request: PerformBlockingInteraction,
    ) -> Result<BlockingInteractionResponse, ProducerError> {
        self.process(call, &ActionProcessor::new(request))
    }

    pub fn get_resource(
        &self,
        call: &CallContext,
        request: GetResource,
    ) -> Result<ResourceResponse, ProducerError> {
        self.process(call, &ResourceProcessor::new(request))
    }

    pub fn handle_events(
        &self,
        call: &CallContext,
        request: HandleEvents,
    ) -> Result<HandleEventsResponse, ProducerError> {
        self.process(call, &EventProcessor::new(request))
    }

    /// Run any request processor through the shared pipeline.
    pub fn process<P: RequestProcessor>(
        &self,
        call: &CallContext,
        processor: &P,
    ) -> Result<P::Response, ProducerError> {
        let snapshot = self.config.snapshot();
        let result = processor::run(self, &snapshot, call, processor);
        if let Err(err) = &result {
            tracing::debug!("{} request failed with {}: {}", processor.kind(), err.fault_code(), err);
        }
        result
    }
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("config_generation", &self.config.snapshot().generation())
            .finish_non_exhaustive()
    }
}
