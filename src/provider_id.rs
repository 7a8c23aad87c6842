//! Codec for the composite provider identifier attached to cluster nodes.
//!
//! The orchestration framework stores every node's identifier as
//! `<optional>/<zone>/<instance_id>`, usually prefixed with the provider
//! scheme (`vultr:///1/576965`). The optional segment carries no meaning for
//! this provider and is left empty when encoding.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the three identifier segments.
pub const PROVIDER_ID_SEPARATOR: char = '/';

const SCHEME_DELIMITER: &str = "://";
const SEGMENT_COUNT: usize = 3;

/// Errors raised when a provider identifier does not follow the
/// `<optional>/<zone>/<instance_id>` grammar.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProviderIdError {
    /// The token does not split into exactly three segments.
    #[error("provider id '{token}' has {found} segments, expected {SEGMENT_COUNT}")]
    SegmentCount {
        /// Token supplied by the caller.
        token: String,
        /// Number of segments found after splitting.
        found: usize,
    },
    /// The instance id segment is empty.
    #[error("provider id '{token}' has an empty instance id")]
    EmptyInstanceId {
        /// Token supplied by the caller.
        token: String,
    },
    /// The token carries a `://` delimiter with nothing before it.
    #[error("provider id '{token}' has an empty provider scheme")]
    EmptyScheme {
        /// Token supplied by the caller.
        token: String,
    },
}

/// Decoded form of a provider identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProviderId {
    provider: Option<String>,
    marker: String,
    zone: String,
    instance_id: String,
}

impl ProviderId {
    /// Builds an identifier with an empty optional segment and no scheme.
    #[must_use]
    pub fn new(zone: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            provider: None,
            marker: String::new(),
            zone: zone.into(),
            instance_id: instance_id.into(),
        }
    }

    /// Parses a token, accepting an optional `<provider>://` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderIdError`] when the token (after the optional scheme)
    /// does not contain exactly three `/`-separated segments, when the
    /// instance id segment is empty, or when the scheme is empty.
    pub fn decode(token: &str) -> Result<Self, ProviderIdError> {
        let (provider, rest) = match token.split_once(SCHEME_DELIMITER) {
            Some(("", _)) => {
                return Err(ProviderIdError::EmptyScheme {
                    token: token.to_owned(),
                });
            }
            Some((scheme, remainder)) => (Some(scheme.to_owned()), remainder),
            None => (None, token),
        };

        let segments: Vec<&str> = rest.split(PROVIDER_ID_SEPARATOR).collect();
        let [marker, zone, instance_id] = segments.as_slice() else {
            return Err(ProviderIdError::SegmentCount {
                token: token.to_owned(),
                found: segments.len(),
            });
        };

        if instance_id.is_empty() {
            return Err(ProviderIdError::EmptyInstanceId {
                token: token.to_owned(),
            });
        }

        Ok(Self {
            provider,
            marker: (*marker).to_owned(),
            zone: (*zone).to_owned(),
            instance_id: (*instance_id).to_owned(),
        })
    }

    /// Renders the canonical three-segment form without any scheme.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}{PROVIDER_ID_SEPARATOR}{}{PROVIDER_ID_SEPARATOR}{}",
            self.marker, self.zone, self.instance_id
        )
    }

    /// Provider scheme the token was qualified with, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Zone segment (the provider's numeric region id).
    #[must_use]
    pub const fn zone(&self) -> &str {
        self.zone.as_str()
    }

    /// Provider-native instance identifier.
    #[must_use]
    pub const fn instance_id(&self) -> &str {
        self.instance_id.as_str()
    }
}

/// Encodes a zone and instance id into `/<zone>/<instance_id>`.
#[must_use]
pub fn encode(zone: &str, instance_id: &str) -> String {
    ProviderId::new(zone, instance_id).encode()
}

impl FromStr for ProviderId {
    type Err = ProviderIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::decode(value)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
