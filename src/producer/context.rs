//! Per-invocation execution context handed to the component.

use thiserror::Error;
use uuid::Uuid;

use super::types::{ComponentContext, StateChange, UserProfile};
use crate::base::ComponentHandle;
use crate::negotiation::NegotiatedMarkup;
use crate::rewrite::namespace_for;

/// What the transport knows about the inbound call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallContext {
    /// Scheme + authority of this server, e.g. `https://portal.example:8443`
    pub server_address: String,
    /// The call arrived over a secure transport
    pub secure: bool,
}

impl CallContext {
    pub fn new(server_address: impl Into<String>, secure: bool) -> Self {
        Self {
            server_address: server_address.into(),
            secure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecurityContext {
    pub auth_type: String,
    /// The caller's user context key, when one was supplied
    pub remote_user: Option<String>,
    pub secure: bool,
}

impl SecurityContext {
    pub fn is_authenticated(&self) -> bool {
        self.remote_user.is_some()
    }
}

/// The end user, as described by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub key: String,
    pub categories: Vec<String>,
    pub profile: Option<UserProfile>,
}

/// Identity of the portal window hosting the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowContext {
    id: String,
    namespace: String,
}

impl WindowContext {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let namespace = namespace_for(&id);
        Self { id, namespace }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Prefix the component uses for in-markup names
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("component '{0}' is read-only for this invocation")]
    ReadOnly(ComponentHandle),
}

/// The target component instance and its state-change policy.
///
/// Writes go through [`InstanceContext::write_state`]; a clone-before-write
/// instance mints its clone handle on the first write and reuses it after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceContext {
    handle: ComponentHandle,
    state: Option<Vec<u8>>,
    access: StateChange,
    modified: Option<ComponentContext>,
}

impl InstanceContext {
    pub fn new(handle: ComponentHandle, state: Option<Vec<u8>>, access: StateChange) -> Self {
        Self {
            handle,
            state,
            access,
            modified: None,
        }
    }

    pub fn handle(&self) -> &ComponentHandle {
        &self.handle
    }

    /// Current state, including any write made during this invocation
    pub fn state(&self) -> Option<&[u8]> {
        match &self.modified {
            Some(modified) => modified.state.as_deref(),
            None => self.state.as_deref(),
        }
    }

    pub fn access(&self) -> StateChange {
        self.access
    }

    pub fn write_state(&mut self, state: Option<Vec<u8>>) -> Result<&ComponentContext, InstanceError> {
        let handle = match (&self.modified, self.access) {
            (_, StateChange::ReadOnly) => return Err(InstanceError::ReadOnly(self.handle.clone())),
            (Some(previous), _) => previous.handle.clone(),
            (None, StateChange::ReadWrite) => self.handle.as_str().to_string(),
            (None, StateChange::CloneBeforeWrite) => {
                let clone = self.handle.cloned_with(Uuid::new_v4());
                tracing::debug!("Cloned component '{}' as '{}'", self.handle, clone);
                clone.as_str().to_string()
            }
        };
        Ok(&*self.modified.insert(ComponentContext { handle, state }))
    }

    pub fn was_modified(&self) -> bool {
        self.modified.is_some()
    }

    /// The component context to report back, if state changed
    pub fn modified_context(&self) -> Option<&ComponentContext> {
        self.modified.as_ref()
    }

    pub fn take_modified(&mut self) -> Option<ComponentContext> {
        self.modified.take()
    }
}

/// Everything the component sees for one invocation.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub security: SecurityContext,
    pub user: Option<UserInfo>,
    pub window: WindowContext,
    pub instance: InstanceContext,
    pub markup: NegotiatedMarkup,
}
