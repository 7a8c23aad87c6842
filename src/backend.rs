//! Inventory abstraction used to look up provider instances.
//!
//! The adapter in [`crate::instances`] depends only on [`InstanceInventory`],
//! so provider clients and test doubles are interchangeable.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::context::RequestContext;

/// Power state reported by the provider for an instance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PowerStatus {
    /// The instance is powered on.
    Running,
    /// The instance is powered off.
    Stopped,
    /// Any other provider-specific state, kept verbatim.
    Other(String),
}

impl PowerStatus {
    /// Provider literal for a powered-on instance.
    pub const RUNNING: &'static str = "running";
    /// Provider literal for a powered-off instance.
    pub const STOPPED: &'static str = "stopped";

    /// Returns `true` when the provider reports the instance as running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns the provider literal for this state.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Running => Self::RUNNING,
            Self::Stopped => Self::STOPPED,
            Self::Other(value) => value.as_str(),
        }
    }
}

impl From<&str> for PowerStatus {
    fn from(value: &str) -> Self {
        match value {
            Self::RUNNING => Self::Running,
            Self::STOPPED => Self::Stopped,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PowerStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// Provider-agnostic view of a single instance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstanceRecord {
    /// Human readable label, matched against node names.
    pub name: String,
    /// Primary public IPv4 address.
    pub external_ip: String,
    /// Numeric region (zone) identifier.
    pub zone_id: u32,
    /// Numeric plan identifier describing the machine type.
    pub plan_id: u32,
    /// Provider-native instance identifier.
    pub id: String,
    /// Power state reported by the provider.
    pub power_status: PowerStatus,
}

/// Failures raised by inventory lookups.
///
/// Clients classify provider responses into these variants in one place so
/// every adapter operation observes the same rules.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum InventoryError {
    /// The provider authoritatively reports that the instance does not exist.
    #[error("instance {instance_id} not found")]
    NotFound {
        /// Identifier that was looked up.
        instance_id: String,
    },
    /// Transport failure or non-success response other than "not found".
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// HTTP status when the provider answered, if any.
        status: Option<u16>,
        /// Message describing the failure.
        message: String,
    },
    /// The caller cancelled the request.
    #[error("request cancelled by caller")]
    Cancelled,
    /// The caller's deadline elapsed before the provider answered.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

/// Future returned by inventory operations.
pub type InventoryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, InventoryError>> + Send + 'a>>;

/// Read-only access to the provider's instance inventory.
pub trait InstanceInventory {
    /// Returns every visible instance, ordered by name.
    fn list_instances<'a>(
        &'a self,
        ctx: &'a RequestContext,
    ) -> InventoryFuture<'a, Vec<InstanceRecord>>;

    /// Fetches a single instance by its provider-native identifier.
    fn get_instance<'a>(
        &'a self,
        ctx: &'a RequestContext,
        instance_id: &'a str,
    ) -> InventoryFuture<'a, InstanceRecord>;
}
