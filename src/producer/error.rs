//! Producer fault taxonomy.
//!
//! Every failure the pipeline can surface is a [`ProducerError`]; each maps
//! to exactly one [`FaultCode`] the SOAP layer puts on the wire.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use super::services::{DescriptionError, InvokerError, RegistrationError};
use crate::negotiation::NegotiationError;
use crate::url::UrlError;

type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Protocol fault codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultCode {
    InvalidRegistration,
    ModifyRegistrationRequired,
    MissingParameters,
    InconsistentParameters,
    UnsupportedMimeType,
    UnsupportedMode,
    UnsupportedWindowState,
    UnsupportedLocale,
    InvalidHandle,
    OperationFailed,
}

impl FaultCode {
    /// Wire name, e.g. `wsrp:InvalidHandle`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRegistration => "wsrp:InvalidRegistration",
            Self::ModifyRegistrationRequired => "wsrp:ModifyRegistrationRequired",
            Self::MissingParameters => "wsrp:MissingParameters",
            Self::InconsistentParameters => "wsrp:InconsistentParameters",
            Self::UnsupportedMimeType => "wsrp:UnsupportedMimeType",
            Self::UnsupportedMode => "wsrp:UnsupportedMode",
            Self::UnsupportedWindowState => "wsrp:UnsupportedWindowState",
            Self::UnsupportedLocale => "wsrp:UnsupportedLocale",
            Self::InvalidHandle => "wsrp:InvalidHandle",
            Self::OperationFailed => "wsrp:OperationFailed",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed invocation.
#[derive(Debug, Error)]
pub enum ProducerError {
    #[error(transparent)]
    MalformedInput(#[from] UrlError),

    #[error("invalid registration: {0}")]
    InvalidRegistration(String),

    #[error("registration must be modified: {0}")]
    ModifyRegistrationRequired(String),

    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),

    #[error("unsupported MIME type: {0}")]
    UnsupportedMimeType(String),

    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    #[error("unsupported window state: {0}")]
    UnsupportedWindowState(String),

    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("invalid component handle '{0}'")]
    InvalidHandle(String),

    #[error("session id '{0}' was supplied but this producer does not issue sessions")]
    SessionProtocolViolation(String),

    #[error("operation failed: {message}")]
    OperationFailed {
        message: String,
        #[source]
        cause: Option<BoxedCause>,
    },
}

impl ProducerError {
    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed {
            message: message.into(),
            cause: None,
        }
    }

    pub fn operation_failed_with(
        message: impl Into<String>,
        cause: impl Into<BoxedCause>,
    ) -> Self {
        Self::OperationFailed {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn fault_code(&self) -> FaultCode {
        match self {
            Self::MalformedInput(_) => FaultCode::InconsistentParameters,
            Self::InvalidRegistration(_) => FaultCode::InvalidRegistration,
            Self::ModifyRegistrationRequired(_) => FaultCode::ModifyRegistrationRequired,
            Self::MissingRequiredField(_) => FaultCode::MissingParameters,
            Self::UnsupportedMimeType(_) => FaultCode::UnsupportedMimeType,
            Self::UnsupportedMode(_) => FaultCode::UnsupportedMode,
            Self::UnsupportedWindowState(_) => FaultCode::UnsupportedWindowState,
            Self::UnsupportedLocale(_) => FaultCode::UnsupportedLocale,
            Self::InvalidHandle(_) => FaultCode::InvalidHandle,
            Self::SessionProtocolViolation(_) | Self::OperationFailed { .. } => {
                FaultCode::OperationFailed
            }
        }
    }
}

impl From<NegotiationError> for ProducerError {
    fn from(err: NegotiationError) -> Self {
        let message = err.to_string();
        match err {
            NegotiationError::UnsupportedMimeType { .. } => Self::UnsupportedMimeType(message),
            NegotiationError::UnsupportedMode { .. } => Self::UnsupportedMode(message),
            NegotiationError::UnsupportedWindowState { .. } => Self::UnsupportedWindowState(message),
        }
    }
}

impl From<RegistrationError> for ProducerError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Invalid(message) => Self::InvalidRegistration(message),
            RegistrationError::ModifyRequired(message) => Self::ModifyRegistrationRequired(message),
        }
    }
}

impl From<DescriptionError> for ProducerError {
    fn from(err: DescriptionError) -> Self {
        match err {
            DescriptionError::InvalidHandle(handle) => Self::InvalidHandle(handle),
            DescriptionError::UnsupportedLocale(message) => Self::UnsupportedLocale(message),
            DescriptionError::Failed(message) => Self::operation_failed(message),
        }
    }
}

impl From<InvokerError> for ProducerError {
    fn from(err: InvokerError) -> Self {
        Self::operation_failed_with("component invocation failed", err)
    }
}
