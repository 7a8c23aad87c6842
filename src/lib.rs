//! Instance resolution for Vultr-hosted cluster nodes.
//!
//! The crate answers the node identity questions a cluster orchestrator asks
//! its cloud provider: addresses, provider identifiers, machine types,
//! existence, and power state. Lookups go through the [`InstanceInventory`]
//! seam, implemented for the Vultr v1 API by [`VultrClient`].

pub mod backend;
pub mod cloud;
pub mod config;
pub mod context;
pub mod instances;
pub mod provider_id;
pub mod test_support;
pub mod vultr;

pub use backend::{InstanceInventory, InstanceRecord, InventoryError, PowerStatus};
pub use cloud::{
    CONTROLLER_NAME, Capability, Cloud, CloudError, CloudRegistry, PROVIDER_NAME, register_vultr,
};
pub use config::{ConfigError, VultrConfig};
pub use context::RequestContext;
pub use instances::{Instances, InstancesError, NodeAddress, NodeAddressType, NodeName};
pub use provider_id::{ProviderId, ProviderIdError};
pub use vultr::{VultrClient, VultrClientError};
