//! BDD scenarios for the instance adapter.

use rstest_bdd_macros::scenario;

use super::test_helpers::{InstancesContext, instances_context};

#[scenario(
    path = "tests/features/instances.feature",
    name = "Resolve the external address of a node by name"
)]
fn scenario_addresses_by_name(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "Report a missing node by name"
)]
fn scenario_missing_node(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "Resolve the provider id of a node"
)]
fn scenario_instance_id(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "Resolve the plan of an instance by provider id"
)]
fn scenario_instance_type_by_provider_id(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "A missing instance no longer exists"
)]
fn scenario_missing_instance_does_not_exist(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "A stopped instance still exists but is not running"
)]
fn scenario_stopped_instance(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "A running instance reports running"
)]
fn scenario_running_instance(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "Reject a malformed provider id"
)]
fn scenario_malformed_provider_id(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "Surface provider outages from existence checks"
)]
fn scenario_provider_outage(instances_context: InstancesContext) {
    drop(instances_context);
}

#[scenario(
    path = "tests/features/instances.feature",
    name = "Cancelled requests are not reported as outages"
)]
fn scenario_cancelled_request(instances_context: InstancesContext) {
    drop(instances_context);
}
