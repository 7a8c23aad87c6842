//! Test support utilities shared across unit and integration tests.

use std::collections::BTreeMap;
use std::future::ready;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::{
    InstanceInventory, InstanceRecord, InventoryError, InventoryFuture, PowerStatus,
};
use crate::context::RequestContext;

/// Builds an [`InstanceRecord`] from literal values.
#[must_use]
pub fn instance_record(
    name: &str,
    external_ip: &str,
    zone_id: u32,
    plan_id: u32,
    id: &str,
    power_status: &str,
) -> InstanceRecord {
    InstanceRecord {
        name: name.to_owned(),
        external_ip: external_ip.to_owned(),
        zone_id,
        plan_id,
        id: id.to_owned(),
        power_status: PowerStatus::from(power_status),
    }
}

/// Call observed by [`FakeInventory`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InventoryCall {
    /// A full inventory listing.
    List,
    /// A lookup of the given instance id.
    Get(String),
}

#[derive(Debug, Default)]
struct FakeState {
    records: Vec<InstanceRecord>,
    listing_failure: Option<InventoryError>,
    lookup_failures: BTreeMap<String, InventoryError>,
    calls: Vec<InventoryCall>,
}

/// In-memory inventory with scripted failures.
///
/// Unknown ids answer [`InventoryError::NotFound`], matching how the provider
/// reports missing servers. Every call honours the request context.
#[derive(Clone, Debug, Default)]
pub struct FakeInventory {
    state: Arc<Mutex<FakeState>>,
}

impl FakeInventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory seeded with `records`.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = InstanceRecord>) -> Self {
        let inventory = Self::new();
        inventory.state().records.extend(records);
        inventory
    }

    /// Adds a record to the inventory.
    pub fn push_record(&self, record: InstanceRecord) {
        self.state().records.push(record);
    }

    /// Makes every listing fail with `error`.
    pub fn fail_listing(&self, error: InventoryError) {
        self.state().listing_failure = Some(error);
    }

    /// Makes lookups of `instance_id` fail with `error`.
    pub fn fail_lookup(&self, instance_id: impl Into<String>, error: InventoryError) {
        self.state().lookup_failures.insert(instance_id.into(), error);
    }

    /// Returns the calls observed so far.
    #[must_use]
    pub fn calls(&self) -> Vec<InventoryCall> {
        self.state().calls.clone()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listing(&self) -> Result<Vec<InstanceRecord>, InventoryError> {
        let mut state = self.state();
        state.calls.push(InventoryCall::List);
        if let Some(error) = state.listing_failure.clone() {
            return Err(error);
        }
        let mut records = state.records.clone();
        records.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name).then_with(|| lhs.id.cmp(&rhs.id)));
        Ok(records)
    }

    fn lookup(&self, instance_id: &str) -> Result<InstanceRecord, InventoryError> {
        let mut state = self.state();
        state.calls.push(InventoryCall::Get(instance_id.to_owned()));
        if let Some(error) = state.lookup_failures.get(instance_id) {
            return Err(error.clone());
        }
        state
            .records
            .iter()
            .find(|record| record.id == instance_id)
            .cloned()
            .ok_or_else(|| InventoryError::NotFound {
                instance_id: instance_id.to_owned(),
            })
    }
}

impl InstanceInventory for FakeInventory {
    fn list_instances<'a>(
        &'a self,
        ctx: &'a RequestContext,
    ) -> InventoryFuture<'a, Vec<InstanceRecord>> {
        Box::pin(async move {
            let outcome = self.listing();
            ctx.run(ready(outcome)).await
        })
    }

    fn get_instance<'a>(
        &'a self,
        ctx: &'a RequestContext,
        instance_id: &'a str,
    ) -> InventoryFuture<'a, InstanceRecord> {
        Box::pin(async move {
            let outcome = self.lookup(instance_id);
            ctx.run(ready(outcome)).await
        })
    }
}
