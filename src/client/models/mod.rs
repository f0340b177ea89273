//! Microsoft Graph resource models
//!
//! Raw shapes as returned by Graph. Only the fields the agent projects are
//! modelled; everything else in the payload is ignored.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

mod app;
mod connector;
mod enrollment;

pub use app::MobileApp;
pub use connector::NdesConnector;
pub use enrollment::{ApplePushNotificationCertificate, DepOnboardingSetting, VppToken};

/// Decode a raw JSON item into a model.
///
/// A missing required field is a malformed response, not a crash.
pub fn decode<T: DeserializeOwned>(value: Value, what: &str) -> ApiResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to decode {}: {}", what, e)))
}
