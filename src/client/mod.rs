//! Microsoft Graph API client

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiResult;

pub mod auth;
pub mod graph;
pub mod http;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use auth::{GRAPH_SCOPE, TokenProvider};
pub use graph::GraphClient;
pub use http::build_http_client;

/// Read access to Graph resources.
///
/// Implementations attach authentication and the per-call timeout, and
/// classify failures into [`ApiError`](crate::error::ApiError). Collectors
/// only depend on this trait, so tests can swap in a mock.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// GET a resource and return its JSON body.
    ///
    /// `target` is either a path below the API host (`/v1.0/...`) or an
    /// absolute URL such as a pagination next link.
    async fn fetch(&self, target: &str) -> ApiResult<Value>;
}
