//! Binary entry point for the `vultr-ccm` CLI.

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vultr_ccm::{
    CONTROLLER_NAME, CloudError, CloudRegistry, ConfigError, Instances, InstancesError,
    NodeAddress, NodeName, PROVIDER_NAME, RequestContext, VultrClient, VultrConfig,
    register_vultr,
};

mod cli;

use cli::{Cli, Command, NodeTarget};

const DEFAULT_LOG_FILTER: &str = "vultr_ccm=info";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("provider error: {0}")]
    Cloud(#[from] CloudError),
    #[error(transparent)]
    Instances(#[from] InstancesError),
    #[error("either a node name or --provider-id is required")]
    MissingTarget,
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = VultrConfig::load_without_cli_args()?;
    let mut registry = CloudRegistry::new();
    register_vultr(&mut registry, config)?;
    let cloud = registry.get_cloud_provider(PROVIDER_NAME, &mut io::empty())?;
    debug!(controller = CONTROLLER_NAME, command = ?cli.command, "dispatching");

    let ctx = request_context(cli.timeout_secs);
    let rendered = execute(cloud.instances(), &ctx, cli.command).await?;
    writeln!(io::stdout(), "{rendered}")?;
    Ok(())
}

fn request_context(timeout_secs: Option<u64>) -> RequestContext {
    let ctx = timeout_secs.map_or_else(RequestContext::new, |secs| {
        RequestContext::new().with_timeout(Duration::from_secs(secs))
    });
    let canceller = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling request");
            canceller.cancel();
        }
    });
    ctx
}

async fn execute(
    instances: &Instances<VultrClient>,
    ctx: &RequestContext,
    command: Command,
) -> Result<String, CliError> {
    let rendered = match command {
        Command::Addresses(target) => render_addresses(&addresses(instances, ctx, target).await?),
        Command::InstanceId { node } => instances.instance_id(ctx, &NodeName::from(node)).await?,
        Command::InstanceType(target) => instance_type(instances, ctx, target).await?,
        Command::Exists { provider_id } => instances
            .instance_exists_by_provider_id(ctx, &provider_id)
            .await?
            .to_string(),
        Command::Running { provider_id } => instances
            .instance_running_by_provider_id(ctx, &provider_id)
            .await?
            .to_string(),
        Command::CurrentNodeName { hostname } => {
            instances.current_node_name(&hostname).to_string()
        }
    };
    Ok(rendered)
}

async fn addresses(
    instances: &Instances<VultrClient>,
    ctx: &RequestContext,
    target: NodeTarget,
) -> Result<Vec<NodeAddress>, CliError> {
    if let Some(provider_id) = target.provider_id {
        return Ok(instances
            .node_addresses_by_provider_id(ctx, &provider_id)
            .await?);
    }
    let node = target.node.ok_or(CliError::MissingTarget)?;
    Ok(instances.node_addresses(ctx, &NodeName::from(node)).await?)
}

async fn instance_type(
    instances: &Instances<VultrClient>,
    ctx: &RequestContext,
    target: NodeTarget,
) -> Result<String, CliError> {
    if let Some(provider_id) = target.provider_id {
        return Ok(instances
            .instance_type_by_provider_id(ctx, &provider_id)
            .await?);
    }
    let node = target.node.ok_or(CliError::MissingTarget)?;
    Ok(instances.instance_type(ctx, &NodeName::from(node)).await?)
}

fn render_addresses(addresses: &[NodeAddress]) -> String {
    addresses
        .iter()
        .map(|address| format!("{}\t{}", address.kind, address.address))
        .collect::<Vec<_>>()
        .join("\n")
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
