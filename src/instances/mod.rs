//! Instance resolution adapter.
//!
//! Answers the identity, address, type, and liveness questions the
//! orchestration framework asks about its nodes. Every call is an
//! independent query against the inventory; nothing is cached between calls.

mod error;
mod types;

use crate::backend::{InstanceInventory, InstanceRecord, InventoryError};
use crate::context::RequestContext;
use crate::provider_id::{self, ProviderId};

pub use error::InstancesError;
pub use types::{NodeAddress, NodeAddressType, NodeName};

/// Adapter that resolves nodes against an [`InstanceInventory`].
#[derive(Clone, Debug)]
pub struct Instances<C> {
    inventory: C,
}

impl<C> Instances<C>
where
    C: InstanceInventory + Send + Sync,
{
    /// Wraps an inventory client.
    #[must_use]
    pub const fn new(inventory: C) -> Self {
        Self { inventory }
    }

    /// Borrows the underlying inventory client.
    #[must_use]
    pub const fn inventory(&self) -> &C {
        &self.inventory
    }

    /// Returns the addresses of the node named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`InstancesError::InstanceNotFound`] when no instance carries
    /// the name, or the classified remote failure.
    pub async fn node_addresses(
        &self,
        ctx: &RequestContext,
        name: &NodeName,
    ) -> Result<Vec<NodeAddress>, InstancesError> {
        let record = self.find_by_name(ctx, name).await?;
        Ok(addresses_of(&record))
    }

    /// Returns the addresses of the instance behind `provider_id`.
    ///
    /// # Errors
    ///
    /// Returns [`InstancesError::MalformedProviderId`] for unparsable
    /// identifiers, [`InstancesError::InstanceNotFound`] when the provider
    /// does not know the instance, or the classified remote failure.
    pub async fn node_addresses_by_provider_id(
        &self,
        ctx: &RequestContext,
        provider_id: &str,
    ) -> Result<Vec<NodeAddress>, InstancesError> {
        let record = self.find_by_provider_id(ctx, provider_id).await?;
        Ok(addresses_of(&record))
    }

    /// Returns the canonical provider identifier (`/<zone>/<id>`) of the node
    /// named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`InstancesError::InstanceNotFound`] when no instance carries
    /// the name, or the classified remote failure.
    pub async fn instance_id(
        &self,
        ctx: &RequestContext,
        name: &NodeName,
    ) -> Result<String, InstancesError> {
        let record = self.find_by_name(ctx, name).await?;
        Ok(provider_id::encode(&record.zone_id.to_string(), &record.id))
    }

    /// Returns the plan identifier of the node named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`InstancesError::InstanceNotFound`] when no instance carries
    /// the name, or the classified remote failure.
    pub async fn instance_type(
        &self,
        ctx: &RequestContext,
        name: &NodeName,
    ) -> Result<String, InstancesError> {
        let record = self.find_by_name(ctx, name).await?;
        Ok(record.plan_id.to_string())
    }

    /// Returns the plan identifier of the instance behind `provider_id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::node_addresses_by_provider_id`].
    pub async fn instance_type_by_provider_id(
        &self,
        ctx: &RequestContext,
        provider_id: &str,
    ) -> Result<String, InstancesError> {
        let record = self.find_by_provider_id(ctx, provider_id).await?;
        Ok(record.plan_id.to_string())
    }

    /// Reports whether the instance behind `provider_id` still exists.
    ///
    /// A provider "not found" answer yields `Ok(false)` so the caller can
    /// remove the node. Stopped instances still exist.
    ///
    /// # Errors
    ///
    /// Returns [`InstancesError::MalformedProviderId`] for unparsable
    /// identifiers and every remote failure other than "not found".
    pub async fn instance_exists_by_provider_id(
        &self,
        ctx: &RequestContext,
        provider_id: &str,
    ) -> Result<bool, InstancesError> {
        let id = ProviderId::decode(provider_id)?;
        match self.inventory.get_instance(ctx, id.instance_id()).await {
            Ok(_) => Ok(true),
            Err(InventoryError::NotFound { .. }) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }

    /// Reports whether the instance behind `provider_id` is powered on.
    ///
    /// `true` means the provider reports the `running` power state; any other
    /// state yields `false`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::node_addresses_by_provider_id`].
    pub async fn instance_running_by_provider_id(
        &self,
        ctx: &RequestContext,
        provider_id: &str,
    ) -> Result<bool, InstancesError> {
        let record = self.find_by_provider_id(ctx, provider_id).await?;
        Ok(record.power_status.is_running())
    }

    /// Returns the name of the node the caller runs on, which for this
    /// provider is its hostname.
    #[must_use]
    pub fn current_node_name(&self, hostname: &str) -> NodeName {
        NodeName::from(hostname)
    }

    /// SSH key propagation is not offered by this provider.
    ///
    /// # Errors
    ///
    /// Always returns [`InstancesError::NotImplemented`].
    pub const fn add_ssh_key_to_all_instances(
        &self,
        _user: &str,
        _key_data: &[u8],
    ) -> Result<(), InstancesError> {
        Err(InstancesError::NotImplemented {
            capability: "add_ssh_key_to_all_instances",
        })
    }

    async fn find_by_name(
        &self,
        ctx: &RequestContext,
        name: &NodeName,
    ) -> Result<InstanceRecord, InstancesError> {
        self.inventory
            .list_instances(ctx)
            .await?
            .into_iter()
            .find(|record| record.name == name.as_str())
            .ok_or_else(|| InstancesError::InstanceNotFound {
                lookup: name.to_string(),
            })
    }

    async fn find_by_provider_id(
        &self,
        ctx: &RequestContext,
        provider_id: &str,
    ) -> Result<InstanceRecord, InstancesError> {
        let id = ProviderId::decode(provider_id)?;
        Ok(self.inventory.get_instance(ctx, id.instance_id()).await?)
    }
}

fn addresses_of(record: &InstanceRecord) -> Vec<NodeAddress> {
    vec![NodeAddress::external(record.external_ip.clone())]
}
