//! Collaborators the pipeline calls out to.
//!
//! Registration validation, component description and the component runtime
//! live outside this crate; they are reached only through these traits.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use super::context::{ExecutionContext, InstanceError};
use super::types::{Event, NamedString, RegistrationContext, UploadContext};
use crate::base::{Cacheability, ComponentHandle, Mode, WindowState};
use crate::negotiation::CapabilityDescriptor;
use crate::rewrite::Content;

// ============================================================================
// REGISTRATION
// ============================================================================

/// A validated consumer registration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registration {
    /// `None` for callers that did not register
    pub handle: Option<String>,
    pub consumer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    ModifyRequired(String),
}

pub trait RegistrationService: Send + Sync {
    fn validate(&self, context: Option<&RegistrationContext>) -> Result<Registration, RegistrationError>;
}

// ============================================================================
// DESCRIPTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescription {
    pub handle: ComponentHandle,
    /// Localized display title
    pub title: Option<String>,
    pub capabilities: CapabilityDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptionError {
    #[error("unknown component handle '{0}'")]
    InvalidHandle(String),
    #[error("{0}")]
    UnsupportedLocale(String),
    #[error("{0}")]
    Failed(String),
}

pub trait DescriptionService: Send + Sync {
    /// Describe `handle` for `registration`, localized to `locales` (most
    /// preferred first).
    fn describe(
        &self,
        registration: &Registration,
        handle: &ComponentHandle,
        locales: &[String],
    ) -> Result<ComponentDescription, DescriptionError>;
}

// ============================================================================
// INVOCATION
// ============================================================================

/// Kind-specific inputs for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationPayload {
    Render,
    Action {
        interaction_state: Option<String>,
        form_parameters: Vec<NamedString>,
        uploads: Vec<UploadContext>,
    },
    Resource {
        resource_id: Option<String>,
        resource_state: Option<String>,
        cacheability: Option<Cacheability>,
        form_parameters: Vec<NamedString>,
    },
    Event {
        events: Vec<Event>,
    },
}

impl InvocationPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Render => "render",
            Self::Action { .. } => "action",
            Self::Resource { .. } => "resource",
            Self::Event { .. } => "event",
        }
    }
}

/// The request handed to the component runtime.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub target: ComponentHandle,
    pub mode: Mode,
    pub window_state: WindowState,
    pub navigational_state: Option<String>,
    pub public_navigational_state: Vec<NamedString>,
    pub payload: InvocationPayload,
    pub context: ExecutionContext,
}

impl Invocation {
    /// Persist new component state under the invocation's state-change policy.
    pub fn write_state(&mut self, state: Option<Vec<u8>>) -> Result<(), InstanceError> {
        self.context.instance.write_state(state).map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheScope {
    #[default]
    Private,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheHint {
    /// 0 disables caching; negative never expires
    pub expiration_secs: i32,
    pub scope: CacheScope,
    pub validation_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFragment {
    pub content: Content,
    /// Falls back to the negotiated MIME type
    pub mime_type: Option<String>,
    pub title: Option<String>,
    pub cache: Option<CacheHint>,
}

impl ContentFragment {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Content::Text(content.into()),
            mime_type: None,
            title: None,
            cache: None,
        }
    }

    pub fn binary(content: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            content: Content::Binary(content),
            mime_type: Some(mime_type.into()),
            title: None,
            cache: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_cache(mut self, cache: CacheHint) -> Self {
        self.cache = Some(cache);
        self
    }
}

/// State changes requested by an action or event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateUpdate {
    pub mode: Option<Mode>,
    pub window_state: Option<WindowState>,
    pub navigational_state: Option<String>,
    pub public_navigational_state: Vec<NamedString>,
    pub events: Vec<Event>,
}

/// A failure the component reported instead of producing output.
#[derive(Debug, Clone)]
pub enum ComponentFailure {
    ModeNotAllowed(Mode),
    WindowStateNotAllowed(WindowState),
    Other {
        message: String,
        cause: Option<Arc<dyn StdError + Send + Sync>>,
    },
}

#[derive(Debug, Clone)]
pub enum InvocationResponse {
    Fragment(ContentFragment),
    Update(StateUpdate),
    Redirect(String),
    Error(ComponentFailure),
}

impl InvocationResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fragment(_) => "fragment",
            Self::Update(_) => "update",
            Self::Redirect(_) => "redirect",
            Self::Error(_) => "error",
        }
    }
}

/// The component runtime could not run the invocation at all.
#[derive(Debug, Error)]
pub enum InvokerError {
    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error("{message}")]
    Runtime {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

pub trait ComponentInvoker: Send + Sync {
    fn invoke(&self, invocation: &mut Invocation) -> Result<InvocationResponse, InvokerError>;
}
