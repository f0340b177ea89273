//! Runtime configuration for one agent run

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

mod proxy;
mod secret;
mod service;

pub use proxy::ProxyDirective;
pub use secret::{FileSecretStore, SecretResolver};
pub use service::{Service, ServiceSelection};

/// Microsoft identity platform host
pub const DEFAULT_LOGIN_URL: &str = "https://login.microsoftonline.com";

/// Microsoft Graph host
pub const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

const MIN_TIMEOUT_SECS: f64 = 3.0;
const MAX_TIMEOUT_SECS: f64 = 600.0;

/// Tenant credentials for the client-credentials grant.
///
/// `Debug` never prints the secret.
#[derive(Clone)]
pub struct Credentials {
    pub tenant_id: String,
    pub app_id: String,
    pub app_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Hosts the agent talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login_url: String,
    pub graph_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            graph_url: DEFAULT_GRAPH_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Build endpoints from optional overrides. Trailing slashes are dropped.
    pub fn with_overrides(login_url: Option<&str>, graph_url: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            login_url: login_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.login_url),
            graph_url: graph_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.graph_url),
        }
    }
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub credentials: Credentials,
    pub services: ServiceSelection,
    pub timeout: Duration,
    pub proxy: ProxyDirective,
    pub endpoints: Endpoints,
}

/// Validate a timeout given in (possibly fractional) seconds.
pub fn validate_timeout(secs: f64) -> Result<Duration, ConfigError> {
    if (MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(ConfigError::InvalidTimeout(secs))
    }
}
