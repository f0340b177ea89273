//! Mock Graph API client for testing
//!
//! Serves canned responses keyed by request target, without any HTTP.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::GraphApi;
use crate::error::{ApiError, ApiResult};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockGraphApi::new()
///     .with_json("/v1.0/deviceAppManagement/vppTokens", json!({ "value": [] }));
///
/// let body = mock.fetch("/v1.0/deviceAppManagement/vppTokens").await?;
/// ```
#[derive(Default)]
pub struct MockGraphApi {
    /// Response per target; unknown targets answer 404
    responses: Mutex<HashMap<String, ApiResult<Value>>>,
    /// Targets in request order
    requests: Mutex<Vec<String>>,
}

impl MockGraphApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `target` with a 2xx JSON body
    pub fn with_json(self, target: &str, body: Value) -> Self {
        self.with_result(target, Ok(body))
    }

    /// Answer `target` with a non-2xx status
    pub fn with_status(self, target: &str, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.with_result(
            target,
            Err(ApiError::Status {
                status,
                body: body.to_string(),
            }),
        )
    }

    /// Answer `target` with an arbitrary failure
    pub fn with_error(self, target: &str, error: ApiError) -> Self {
        self.with_result(target, Err(error))
    }

    fn with_result(self, target: &str, result: ApiResult<Value>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(target.to_string(), result);
        self
    }

    /// Targets requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphApi for MockGraphApi {
    async fn fetch(&self, target: &str) -> ApiResult<Value> {
        self.requests.lock().unwrap().push(target.to_string());

        self.responses
            .lock()
            .unwrap()
            .get(target)
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Status {
                    status: StatusCode::NOT_FOUND,
                    body: format!("no mock response for {}", target),
                })
            })
    }
}
