//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Shared constants live under `tests/common/` and are pulled in via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

#![allow(
    dead_code,
    reason = "each integration test binary uses a different subset"
)]

/// API key configured for the CLI and client under test.
pub const TEST_API_KEY: &str = "test-api-key";

/// Public address of `node-1` in [`SERVER_LISTING`].
pub const NODE_ONE_IP: &str = "203.0.113.5";

/// Canonical provider id of `node-1` in [`SERVER_LISTING`].
pub const NODE_ONE_PROVIDER_ID: &str = "/6/576964";

/// `server/list` body with two servers keyed by subscription id.
pub const SERVER_LISTING: &str = r#"{
    "576964": {"SUBID": "576964", "label": "node-1", "main_ip": "203.0.113.5",
               "DCID": "6", "VPSPLANID": "201", "power_status": "running"},
    "576966": {"SUBID": "576966", "label": "node-3", "main_ip": "203.0.113.7",
               "DCID": "1", "VPSPLANID": "202", "power_status": "stopped"}
}"#;

/// `server/list?SUBID=576966` body for the stopped `node-3`.
pub const NODE_THREE_SERVER: &str = r#"{"SUBID": "576966", "label": "node-3",
    "main_ip": "203.0.113.7", "DCID": "1", "VPSPLANID": "202", "power_status": "stopped"}"#;
