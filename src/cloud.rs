//! Provider registration for the orchestration framework.
//!
//! The framework looks providers up by name and hands the factory a
//! configuration stream. The credential is captured explicitly when the
//! factory is registered; the stream may only override connection settings.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use crate::config::VultrConfig;
use crate::instances::Instances;
use crate::vultr::{VultrClient, VultrClientError};

/// Name under which the provider is registered.
pub const PROVIDER_NAME: &str = "vultr";

/// Name of the controller, used as a logging target by the binary.
pub const CONTROLLER_NAME: &str = "vultr-cloud-controller-manager";

/// Optional features a cloud provider may offer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capability {
    /// Node identity, address, and liveness resolution.
    Instances,
    /// Load balancer provisioning.
    LoadBalancer,
    /// Zone and region topology.
    Zones,
    /// Cluster enumeration.
    Clusters,
    /// Network route management.
    Routes,
}

/// Errors raised while registering or constructing providers.
#[derive(Debug, Error)]
pub enum CloudError {
    /// A factory is already registered under this name.
    #[error("cloud provider '{0}' is already registered")]
    AlreadyRegistered(String),
    /// No factory is registered under this name.
    #[error("unknown cloud provider '{0}'")]
    UnknownProvider(String),
    /// The configuration stream could not be read or parsed.
    #[error("invalid cloud configuration: {0}")]
    Config(String),
    /// The provider client could not be built.
    #[error(transparent)]
    Client(#[from] VultrClientError),
}

/// The Vultr cloud provider, exposing only the instance adapter.
#[derive(Clone, Debug)]
pub struct Cloud {
    instances: Instances<VultrClient>,
}

impl Cloud {
    /// Builds the provider from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Client`] when the client cannot be built.
    pub fn new(config: &VultrConfig) -> Result<Self, CloudError> {
        let client = VultrClient::new(config)?;
        Ok(Self {
            instances: Instances::new(client),
        })
    }

    /// Name the provider is registered under.
    #[must_use]
    pub const fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    /// Nodes must carry a cluster id for this provider.
    #[must_use]
    pub const fn has_cluster_id(&self) -> bool {
        true
    }

    /// Reports whether `capability` is offered.
    #[must_use]
    pub const fn supports(&self, capability: Capability) -> bool {
        matches!(capability, Capability::Instances)
    }

    /// Instance adapter backed by the Vultr API.
    #[must_use]
    pub const fn instances(&self) -> &Instances<VultrClient> {
        &self.instances
    }
}

/// Connection settings the configuration stream may override.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StreamOverrides {
    api_base: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl StreamOverrides {
    fn read(stream: &mut dyn Read) -> Result<Self, CloudError> {
        let mut raw = String::new();
        stream
            .read_to_string(&mut raw)
            .map_err(|err| CloudError::Config(err.to_string()))?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&raw).map_err(|err| CloudError::Config(err.to_string()))
    }

    fn apply(self, mut config: VultrConfig) -> VultrConfig {
        if let Some(api_base) = self.api_base {
            config.api_base = api_base;
        }
        if let Some(timeout) = self.request_timeout_secs {
            config.request_timeout_secs = timeout;
        }
        config
    }
}

/// Factory turning a configuration stream into a provider.
pub type CloudFactory = Box<dyn Fn(&mut dyn Read) -> Result<Cloud, CloudError> + Send + Sync>;

/// Registry of provider factories keyed by name.
#[derive(Default)]
pub struct CloudRegistry {
    factories: BTreeMap<String, CloudFactory>,
}

impl CloudRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::AlreadyRegistered`] when the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: CloudFactory,
    ) -> Result<(), CloudError> {
        let key = name.into();
        if self.factories.contains_key(&key) {
            return Err(CloudError::AlreadyRegistered(key));
        }
        self.factories.insert(key, factory);
        Ok(())
    }

    /// Builds the provider registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::UnknownProvider`] for unregistered names and
    /// whatever the factory returns otherwise.
    pub fn get_cloud_provider(
        &self,
        name: &str,
        config: &mut dyn Read,
    ) -> Result<Cloud, CloudError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| CloudError::UnknownProvider(name.to_owned()))?;
        factory(config)
    }

    /// Registered provider names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for CloudRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

/// Registers the Vultr provider, capturing `config` for every construction.
///
/// # Errors
///
/// Returns [`CloudError::AlreadyRegistered`] when a provider named
/// [`PROVIDER_NAME`] exists.
pub fn register_vultr(registry: &mut CloudRegistry, config: VultrConfig) -> Result<(), CloudError> {
    registry.register(
        PROVIDER_NAME,
        Box::new(move |stream: &mut dyn Read| {
            let effective = StreamOverrides::read(stream)?.apply(config.clone());
            Cloud::new(&effective)
        }),
    )
}
