//! Answer shapes returned by the instance adapter.

use std::fmt;
use std::ops::Deref;

/// Name of a cluster node, as known to the orchestration framework.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NodeName(String);

impl NodeName {
    /// Wraps a node name.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the name as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for NodeName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NodeName {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for NodeName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of address attached to a node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeAddressType {
    /// Address reachable from outside the provider network.
    ExternalIp,
    /// Resolvable host name.
    Hostname,
}

impl NodeAddressType {
    /// Name used by the orchestration framework for this address kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExternalIp => "ExternalIP",
            Self::Hostname => "Hostname",
        }
    }
}

impl fmt::Display for NodeAddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed network address of a node.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NodeAddress {
    /// Kind of address.
    pub kind: NodeAddressType,
    /// Address literal as reported by the provider.
    pub address: String,
}

impl NodeAddress {
    /// Builds an external IP entry.
    #[must_use]
    pub fn external(address: impl Into<String>) -> Self {
        Self {
            kind: NodeAddressType::ExternalIp,
            address: address.into(),
        }
    }
}
