//! Error types for the instance adapter.

use thiserror::Error;

use crate::backend::InventoryError;
use crate::provider_id::ProviderIdError;

/// Errors returned by [`super::Instances`] operations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum InstancesError {
    /// The provider identifier does not follow the three-segment grammar.
    #[error("malformed provider id: {0}")]
    MalformedProviderId(#[from] ProviderIdError),
    /// No instance matches the requested name or identifier.
    #[error("instance not found: {lookup}")]
    InstanceNotFound {
        /// Name or identifier that was looked up.
        lookup: String,
    },
    /// The provider failed for a reason other than "not found".
    #[error("provider unavailable: {message}")]
    RemoteUnavailable {
        /// HTTP status when the provider answered, if any.
        status: Option<u16>,
        /// Message describing the failure.
        message: String,
    },
    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
    /// The caller's deadline elapsed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
    /// The capability is not offered by this provider integration.
    #[error("{capability} is not implemented by this provider")]
    NotImplemented {
        /// Name of the unsupported capability.
        capability: &'static str,
    },
}

impl From<InventoryError> for InstancesError {
    fn from(value: InventoryError) -> Self {
        match value {
            InventoryError::NotFound { instance_id } => Self::InstanceNotFound {
                lookup: instance_id,
            },
            InventoryError::Unavailable { status, message } => {
                Self::RemoteUnavailable { status, message }
            }
            InventoryError::Cancelled => Self::Cancelled,
            InventoryError::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}
