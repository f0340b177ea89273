//! Authenticated execution context
//!
//! Builds the HTTP client and acquires the one bearer token the run uses.

use log::debug;

use crate::client::{GRAPH_SCOPE, GraphClient, TokenProvider, build_http_client};
use crate::config::AgentConfig;
use crate::error::Result;

/// Everything the collectors need once authentication succeeded.
pub struct AgentContext {
    /// Graph client carrying the bearer token
    pub graph: GraphClient,
}

impl AgentContext {
    /// Build the HTTP client and authenticate.
    ///
    /// # Errors
    /// Returns a config error if the proxy or client setup is invalid, and
    /// an auth error if the token request fails.
    pub async fn new(config: &AgentConfig) -> Result<Self> {
        let http = build_http_client(config.timeout, &config.proxy)?;
        debug!(
            "HTTP client ready (timeout {}s, proxy {:?})",
            config.timeout.as_secs_f64(),
            config.proxy
        );

        let token = TokenProvider::new(&http, &config.endpoints.login_url, config.timeout)
            .acquire(&config.credentials, GRAPH_SCOPE)
            .await?;

        let graph = GraphClient::new(http, &config.endpoints.graph_url, token, config.timeout);
        Ok(Self { graph })
    }
}
