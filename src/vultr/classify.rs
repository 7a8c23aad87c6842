//! Classification of Vultr error responses.
//!
//! The v1 API has no structured error codes. Lookups of unknown servers are
//! answered with HTTP 412 and the plain-text body `Invalid server.`, so this
//! module is the only place that depends on that wording.

use reqwest::StatusCode;

use crate::backend::InventoryError;

/// Body returned by the API when a `SUBID` does not exist.
pub(crate) const INVALID_SERVER_MESSAGE: &str = "Invalid server.";

/// Maps a non-success lookup response to an [`InventoryError`].
pub(crate) fn classify_lookup_failure(
    status: StatusCode,
    body: &str,
    instance_id: &str,
) -> InventoryError {
    let missing = status == StatusCode::NOT_FOUND
        || (status == StatusCode::PRECONDITION_FAILED && body.trim() == INVALID_SERVER_MESSAGE);
    if missing {
        return InventoryError::NotFound {
            instance_id: instance_id.to_owned(),
        };
    }
    unavailable(status, body)
}

/// Maps a non-success listing response; listings never mean "not found".
pub(crate) fn unavailable(status: StatusCode, body: &str) -> InventoryError {
    let detail = body.trim();
    let message = if detail.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {detail}")
    };
    InventoryError::Unavailable {
        status: Some(status.as_u16()),
        message,
    }
}

/// Maps a transport-level failure.
pub(crate) fn transport(err: &reqwest::Error) -> InventoryError {
    InventoryError::Unavailable {
        status: err.status().map(|status| status.as_u16()),
        message: err.to_string(),
    }
}
