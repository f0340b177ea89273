//! Shared request execution for the token endpoint and the Graph API

use std::time::Duration;

use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder};
use serde_json::Value;

use crate::config::ProxyDirective;
use crate::error::{ApiError, ApiResult, ConfigError};

/// Build the one HTTP client used for the whole run.
///
/// `timeout` bounds every call, token request included.
pub fn build_http_client(
    timeout: Duration,
    proxy: &ProxyDirective,
) -> Result<HttpClient, ConfigError> {
    let builder = HttpClient::builder()
        .timeout(timeout)
        .user_agent(concat!("ms-intune-agent/", env!("CARGO_PKG_VERSION")));

    proxy
        .apply(builder)?
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Send a request and decode a JSON body.
///
/// The body is read as text before the status check so that non-2xx
/// responses keep the server's diagnostic payload.
pub async fn send_json(request: RequestBuilder, timeout: Duration) -> ApiResult<Value> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::from_transport(e, timeout))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::from_transport(e, timeout))?;
    debug!("Response {} ({} bytes)", status, body.len());

    if !status.is_success() {
        return Err(ApiError::Status { status, body });
    }

    serde_json::from_str(&body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}
