//! Command-line interface definitions for the `vultr-ccm` binary.
//!
//! The parser structures live here so both the binary and the build script
//! can reuse them when generating the manual page.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI for the `vultr-ccm` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vultr-ccm",
    about = "Resolve the Vultr instances backing cluster nodes",
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    /// Abort the command when the provider has not answered in time.
    #[arg(long, global = true, value_name = "SECONDS")]
    pub(crate) timeout_secs: Option<u64>,
    /// Query to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Queries answered by the instance adapter.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the addresses of a node, one `<type>\t<address>` per line.
    #[command(name = "addresses")]
    Addresses(NodeTarget),
    /// Print the provider identifier of a node.
    #[command(name = "instance-id")]
    InstanceId {
        /// Node name as registered in the cluster.
        node: String,
    },
    /// Print the plan identifier of a node.
    #[command(name = "instance-type")]
    InstanceType(NodeTarget),
    /// Print `true` when the instance still exists, `false` otherwise.
    #[command(name = "exists")]
    Exists {
        /// Provider identifier such as `vultr:///6/576965`.
        provider_id: String,
    },
    /// Print `true` when the instance is powered on.
    #[command(name = "running")]
    Running {
        /// Provider identifier such as `vultr:///6/576965`.
        provider_id: String,
    },
    /// Print the node name the local host registers under.
    #[command(name = "current-node-name")]
    CurrentNodeName {
        /// Hostname of the local machine.
        hostname: String,
    },
}

/// Selects a node either by name or by provider identifier.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct NodeTarget {
    /// Node name as registered in the cluster.
    pub(crate) node: Option<String>,
    /// Provider identifier to look up directly instead of scanning by name.
    #[arg(long, value_name = "ID")]
    pub(crate) provider_id: Option<String>,
}
