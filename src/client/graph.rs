//! Microsoft Graph API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

use super::GraphApi;
use super::auth::AccessToken;
use super::http::send_json;
use crate::error::ApiResult;

/// Graph client bound to one bearer token
pub struct GraphClient {
    http: HttpClient,
    base_url: String,
    token: AccessToken,
    timeout: Duration,
}

impl GraphClient {
    /// Create a client. `base_url` is the API host without a trailing slash.
    pub fn new(http: HttpClient, base_url: &str, token: AccessToken, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        }
    }

    /// Resolve a target to a URL. Next links arrive absolute and are used as-is.
    fn url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}{}", self.base_url, target)
        }
    }
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn fetch(&self, target: &str) -> ApiResult<Value> {
        let url = self.url(target);
        debug!("GET {}", url);

        let request = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.token.as_str()));

        send_json(request, self.timeout).await
    }
}
