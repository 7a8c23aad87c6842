//! Vultr implementation of the instance inventory.
//!
//! Talks to the v1 `server/list` endpoint, which serves both the full
//! listing and single-server lookups (`?SUBID=<id>`). The API offers no
//! server-side filter by label, so name lookups scan the full listing.

mod classify;
mod error;
mod types;

use std::fmt;

use reqwest::StatusCode;
use tracing::debug;

use crate::backend::{InstanceInventory, InstanceRecord, InventoryError, InventoryFuture};
use crate::config::VultrConfig;
use crate::context::RequestContext;
use types::{ServerListing, VultrServer};

pub use error::VultrClientError;

const API_KEY_HEADER: &str = "API-Key";
const SERVER_LIST_PATH: &str = "server/list";
const INSTANCE_FILTER: &str = "SUBID";

/// Inventory client backed by the Vultr HTTP API.
#[derive(Clone)]
pub struct VultrClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl VultrClient {
    /// Builds a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VultrClientError::Config`] when the configuration fails
    /// validation and [`VultrClientError::HttpClient`] when the HTTP client
    /// cannot be initialised.
    pub fn new(config: &VultrConfig) -> Result<Self, VultrClientError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn server_list_url(&self) -> String {
        format!("{}/{SERVER_LIST_PATH}", self.api_base)
    }

    async fn fetch_listing(&self) -> Result<Vec<InstanceRecord>, InventoryError> {
        let url = self.server_list_url();
        debug!(%url, "listing instances");
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|err| classify::transport(&err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| classify::transport(&err))?;
        debug!(%status, "instance listing answered");

        if !status.is_success() {
            return Err(classify::unavailable(status, &body));
        }

        let listing: ServerListing =
            serde_json::from_str(&body).map_err(|err| malformed_body(status, &err))?;
        Ok(listing.into_records())
    }

    async fn fetch_instance(&self, instance_id: &str) -> Result<InstanceRecord, InventoryError> {
        let url = self.server_list_url();
        debug!(%url, instance_id, "fetching instance");
        let response = self
            .http
            .get(&url)
            .query(&[(INSTANCE_FILTER, instance_id)])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|err| classify::transport(&err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| classify::transport(&err))?;
        debug!(%status, instance_id, "instance lookup answered");

        if !status.is_success() {
            return Err(classify::classify_lookup_failure(status, &body, instance_id));
        }

        let server: VultrServer =
            serde_json::from_str(&body).map_err(|err| malformed_body(status, &err))?;
        Ok(server.into())
    }
}

fn malformed_body(status: StatusCode, err: &serde_json::Error) -> InventoryError {
    InventoryError::Unavailable {
        status: Some(status.as_u16()),
        message: format!("unexpected response body: {err}"),
    }
}

impl fmt::Debug for VultrClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VultrClient")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl InstanceInventory for VultrClient {
    fn list_instances<'a>(
        &'a self,
        ctx: &'a RequestContext,
    ) -> InventoryFuture<'a, Vec<InstanceRecord>> {
        Box::pin(async move { ctx.run(self.fetch_listing()).await })
    }

    fn get_instance<'a>(
        &'a self,
        ctx: &'a RequestContext,
        instance_id: &'a str,
    ) -> InventoryFuture<'a, InstanceRecord> {
        Box::pin(async move { ctx.run(self.fetch_instance(instance_id)).await })
    }
}
