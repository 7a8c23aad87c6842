//! Wire shapes returned by the Vultr v1 server endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::backend::{InstanceRecord, PowerStatus};

/// Server object as returned by `server/list`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(crate) struct VultrServer {
    #[serde(rename = "SUBID")]
    pub(crate) id: String,
    #[serde(rename = "label", default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) main_ip: String,
    #[serde(rename = "DCID", deserialize_with = "numeric")]
    pub(crate) region_id: u32,
    #[serde(rename = "VPSPLANID", deserialize_with = "numeric")]
    pub(crate) plan_id: u32,
    pub(crate) power_status: PowerStatus,
}

impl From<VultrServer> for InstanceRecord {
    fn from(server: VultrServer) -> Self {
        Self {
            name: server.name,
            external_ip: server.main_ip,
            zone_id: server.region_id,
            plan_id: server.plan_id,
            id: server.id,
            power_status: server.power_status,
        }
    }
}

/// Body of the unfiltered `server/list` call.
///
/// The API answers with an object keyed by `SUBID`, but falls back to an
/// empty JSON array when the account has no servers.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ServerListing {
    Keyed(BTreeMap<String, VultrServer>),
    Sequence(Vec<VultrServer>),
}

impl ServerListing {
    /// Converts the listing into records ordered by name, then id.
    pub(crate) fn into_records(self) -> Vec<InstanceRecord> {
        let servers: Vec<VultrServer> = match self {
            Self::Keyed(map) => map.into_values().collect(),
            Self::Sequence(list) => list,
        };
        let mut records: Vec<InstanceRecord> =
            servers.into_iter().map(InstanceRecord::from).collect();
        records.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name).then_with(|| lhs.id.cmp(&rhs.id)));
        records
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericField {
    Number(u32),
    Text(String),
}

/// Accepts either a JSON number or a numeric string (`"DCID": "1"`).
fn numeric<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumericField::deserialize(deserializer)? {
        NumericField::Number(value) => Ok(value),
        NumericField::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
