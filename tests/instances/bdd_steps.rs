//! BDD step definitions for the instance adapter.

use std::fmt::Display;
use std::future::Future;

use rstest_bdd_macros::{given, then, when};
use tokio::runtime::Runtime;
use vultr_ccm::test_support::{FakeInventory, instance_record};
use vultr_ccm::{Instances, InstancesError, NodeAddress, NodeName, RequestContext};

use super::test_helpers::{InstancesContext, Outcome};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
    #[error("failed to start runtime: {0}")]
    Runtime(String),
}

fn run_query<T, F, Fut>(
    mut instances_context: InstancesContext,
    query: F,
) -> Result<InstancesContext, StepError>
where
    T: Display,
    F: FnOnce(Instances<FakeInventory>, RequestContext) -> Fut,
    Fut: Future<Output = Result<T, InstancesError>>,
{
    let runtime = Runtime::new().map_err(|err| StepError::Runtime(err.to_string()))?;
    let inventory = instances_context.inventory();
    let ctx = instances_context.request_context();
    let result = runtime.block_on(query(Instances::new(inventory.clone()), ctx));

    instances_context.calls = inventory.calls();
    instances_context.outcome = Some(match result {
        Ok(value) => Outcome::Value(value.to_string()),
        Err(err) => Outcome::Failure(err.to_string()),
    });
    Ok(instances_context)
}

fn render_addresses(addresses: &[NodeAddress]) -> String {
    addresses
        .iter()
        .map(|address| format!("{} {}", address.kind, address.address))
        .collect::<Vec<_>>()
        .join(", ")
}

#[given(
    "an inventory with node \"{name}\" at \"{ip}\" in zone \"{zone}\" with plan \"{plan}\" and id \"{id}\" that is \"{status}\""
)]
fn inventory_with_node(
    mut instances_context: InstancesContext,
    name: String,
    ip: String,
    zone: u32,
    plan: u32,
    id: String,
    status: String,
) -> InstancesContext {
    instances_context
        .records
        .push(instance_record(&name, &ip, zone, plan, &id, &status));
    instances_context
}

#[given("the provider is unavailable for instance \"{id}\"")]
fn provider_unavailable(mut instances_context: InstancesContext, id: String) -> InstancesContext {
    instances_context.unavailable_ids.push(id);
    instances_context
}

#[given("the request is cancelled")]
fn request_cancelled(mut instances_context: InstancesContext) -> InstancesContext {
    instances_context.cancelled = true;
    instances_context
}

#[when("I request the addresses of node \"{name}\"")]
fn request_addresses(
    instances_context: InstancesContext,
    name: String,
) -> Result<InstancesContext, StepError> {
    run_query(instances_context, |instances, ctx| async move {
        instances
            .node_addresses(&ctx, &NodeName::from(name))
            .await
            .map(|addresses| render_addresses(&addresses))
    })
}

#[when("I request the instance id of node \"{name}\"")]
fn request_instance_id(
    instances_context: InstancesContext,
    name: String,
) -> Result<InstancesContext, StepError> {
    run_query(instances_context, |instances, ctx| async move {
        instances.instance_id(&ctx, &NodeName::from(name)).await
    })
}

#[when("I request the instance type of \"{provider_id}\"")]
fn request_instance_type(
    instances_context: InstancesContext,
    provider_id: String,
) -> Result<InstancesContext, StepError> {
    run_query(instances_context, |instances, ctx| async move {
        instances
            .instance_type_by_provider_id(&ctx, &provider_id)
            .await
    })
}

#[when("I ask whether \"{provider_id}\" exists")]
fn ask_exists(
    instances_context: InstancesContext,
    provider_id: String,
) -> Result<InstancesContext, StepError> {
    run_query(instances_context, |instances, ctx| async move {
        instances
            .instance_exists_by_provider_id(&ctx, &provider_id)
            .await
    })
}

#[when("I ask whether \"{provider_id}\" is running")]
fn ask_running(
    instances_context: InstancesContext,
    provider_id: String,
) -> Result<InstancesContext, StepError> {
    run_query(instances_context, |instances, ctx| async move {
        instances
            .instance_running_by_provider_id(&ctx, &provider_id)
            .await
    })
}

#[then("the result is \"{expected}\"")]
fn result_is(instances_context: &InstancesContext, expected: String) -> Result<(), StepError> {
    match &instances_context.outcome {
        Some(Outcome::Value(actual)) if *actual == expected => Ok(()),
        Some(Outcome::Value(actual)) => Err(StepError::Assertion(format!(
            "expected '{expected}', got '{actual}'"
        ))),
        Some(Outcome::Failure(message)) => Err(StepError::Assertion(format!(
            "expected '{expected}', got failure: {message}"
        ))),
        None => Err(StepError::Assertion(String::from("missing outcome"))),
    }
}

#[then("the request fails with \"{snippet}\"")]
fn request_fails_with(
    instances_context: &InstancesContext,
    snippet: String,
) -> Result<(), StepError> {
    let Some(Outcome::Failure(message)) = &instances_context.outcome else {
        return Err(StepError::Assertion(format!(
            "expected failure, got {:?}",
            instances_context.outcome
        )));
    };
    if message.contains(&snippet) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected error containing '{snippet}', got: {message}"
        )))
    }
}

#[then("the inventory was not queried")]
fn inventory_not_queried(instances_context: &InstancesContext) -> Result<(), StepError> {
    if instances_context.calls.is_empty() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected no inventory calls, got {:?}",
            instances_context.calls
        )))
    }
}
