use thiserror::Error;

use cargotrack_core::DomainError;
use cargotrack_infra::{RegistryError, StateError};

/// Failure of one invocation. The `Display` form is the message returned to
/// the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Invalid function name.")]
    UnknownFunction(String),

    /// Wrong arity or undecodable JSON.
    #[error("{0}")]
    MalformedInput(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Caller-visible failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Rejected before any write; fix the input.
    Input,
    NotFound,
    /// Storage or encoding failure, or a commit conflict; resubmit.
    Internal,
}

impl InvocationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            InvocationError::UnknownFunction(_)
            | InvocationError::MalformedInput(_)
            | InvocationError::Validation(_) => ErrorClass::Input,
            InvocationError::NotFound(_) => ErrorClass::NotFound,
            InvocationError::Internal(_) => ErrorClass::Internal,
        }
    }
}

impl From<DomainError> for InvocationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvariantViolation(msg) => {
                Self::Validation(msg)
            }
            DomainError::InvalidId(msg) => Self::Validation(format!("invalid id: {msg}")),
            DomainError::NotFound => Self::NotFound("Not found".to_string()),
        }
    }
}

impl From<RegistryError> for InvocationError {
    fn from(err: RegistryError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<StateError> for InvocationError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Conflict { .. } => Self::Internal(format!("transaction aborted: {err}")),
            other => Self::Internal(other.to_string()),
        }
    }
}
