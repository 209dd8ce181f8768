//! Typed protocol requests and responses.
//!
//! These are the shapes the (external) SOAP layer hands to the pipeline and
//! receives back. Optional fields are `Option`s so the pipeline, not the
//! marshaller, decides which absences are faults.

use crate::base::{Cacheability, Mode, WindowState};
use crate::rewrite::Content;
use crate::url::PortalUrl;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedString {
    pub name: String,
    pub value: String,
}

impl NamedString {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ============================================================================
// REQUEST PARTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationContext {
    pub registration_handle: String,
    pub registration_state: Option<Vec<u8>>,
}

impl RegistrationContext {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            registration_handle: handle.into(),
            registration_state: None,
        }
    }
}

/// Reference to the target component, plus its opaque persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentContext {
    pub handle: String,
    pub state: Option<Vec<u8>>,
}

impl ComponentContext {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            state: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeContext {
    /// `wsrp:none`, `wsrp:password`, `wsrp:certificate` or a custom value
    pub user_authentication: String,
    pub portlet_instance_key: Option<String>,
    pub namespace_prefix: Option<String>,
    /// Never legitimately set: this Producer issues no sessions
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub extra: Vec<NamedString>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserContext {
    pub user_context_key: Option<String>,
    pub user_categories: Vec<String>,
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationalContext {
    pub opaque_value: Option<String>,
    pub public_values: Vec<NamedString>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupParams {
    pub secure_client_communication: bool,
    /// Most preferred first
    pub locales: Vec<String>,
    /// Most preferred first
    pub mime_types: Vec<String>,
    pub mode: Mode,
    pub window_state: WindowState,
    pub navigational_context: Option<NavigationalContext>,
    pub markup_character_sets: Vec<String>,
}

impl MarkupParams {
    /// Take mode, window state, navigational state and the secure flag from
    /// a decoded URL. Absent URL values leave the current ones in place.
    pub fn apply_url(&mut self, url: &PortalUrl) {
        if let Some(mode) = url.mode() {
            self.mode = mode.clone();
        }
        if let Some(window_state) = url.window_state() {
            self.window_state = window_state.clone();
        }
        if let Some(state) = url.navigational_state() {
            self.navigational_context
                .get_or_insert_with(NavigationalContext::default)
                .opaque_value = Some(state.to_string());
        }
        self.secure_client_communication |= url.is_secure();
    }
}

/// How the target component's persistent state may be touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateChange {
    #[default]
    ReadOnly,
    ReadWrite,
    CloneBeforeWrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadContext {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionParams {
    pub portlet_state_change: StateChange,
    pub interaction_state: Option<String>,
    pub form_parameters: Vec<NamedString>,
    pub uploads: Vec<UploadContext>,
}

impl InteractionParams {
    /// Interaction parameters carrying an action URL's interaction state.
    pub fn from_url(url: &PortalUrl, portlet_state_change: StateChange) -> Self {
        Self {
            portlet_state_change,
            interaction_state: url.interaction_state().map(str::to_string),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceParams {
    pub portlet_state_change: StateChange,
    pub resource_id: Option<String>,
    pub resource_state: Option<String>,
    pub resource_cacheability: Option<Cacheability>,
    pub form_parameters: Vec<NamedString>,
}

impl ResourceParams {
    /// Resource parameters from a resource URL; `None` for other URL kinds.
    pub fn from_url(url: &PortalUrl) -> Option<Self> {
        let target = url.resource_target()?;
        Some(Self {
            resource_id: target.resource_id.clone(),
            resource_state: target.resource_state.clone(),
            resource_cacheability: target.cacheability,
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    /// Serialized payload, opaque to the pipeline
    pub payload: Option<String>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventParams {
    pub portlet_state_change: StateChange,
    pub events: Vec<Event>,
}

// ============================================================================
// REQUESTS
// ============================================================================

/// Parts shared by every invocation kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestHeader {
    pub registration_context: Option<RegistrationContext>,
    pub component_context: Option<ComponentContext>,
    pub runtime_context: Option<RuntimeContext>,
    pub user_context: Option<UserContext>,
    pub markup_params: Option<MarkupParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetMarkup {
    pub header: RequestHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PerformBlockingInteraction {
    pub header: RequestHeader,
    pub interaction_params: Option<InteractionParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetResource {
    pub header: RequestHeader,
    pub resource_params: Option<ResourceParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandleEvents {
    pub header: RequestHeader,
    pub event_params: Option<EventParams>,
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControl {
    /// Seconds; -1 never expires
    pub expires: i32,
    /// `wsrp:perUser` or `wsrp:forAll`
    pub user_scope: String,
    pub validate_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupContext {
    pub mime_type: String,
    pub content: Content,
    pub locale: Option<String>,
    pub character_set: String,
    pub requires_rewriting: bool,
    pub cache_control: Option<CacheControl>,
    pub preferred_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupResponse {
    pub markup_context: MarkupContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceContext {
    pub mime_type: String,
    pub content: Content,
    pub character_set: String,
    pub requires_rewriting: bool,
    pub cache_control: Option<CacheControl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceResponse {
    pub resource_context: ResourceContext,
    /// Present only when the component's persistent state changed
    pub component_context: Option<ComponentContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateResponse {
    pub navigational_context: Option<NavigationalContext>,
    pub new_mode: Option<Mode>,
    pub new_window_state: Option<WindowState>,
    /// Present only when the component's persistent state changed
    pub component_context: Option<ComponentContext>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockingInteractionResponse {
    Update(UpdateResponse),
    Redirect(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandleEventsResponse {
    pub update_response: UpdateResponse,
}
