//! Command-line surface of the agent

use clap::Parser;

use crate::config::{
    AgentConfig, Credentials, DEFAULT_TIMEOUT_SECS, Endpoints, ProxyDirective, SecretResolver,
    ServiceSelection, validate_timeout,
};
use crate::error::{ConfigError, Result};

pub mod context;
pub mod run;

pub use context::AgentContext;

/// Microsoft Intune special agent - collects Intune state from Microsoft Graph
#[derive(Parser, Debug)]
#[command(name = "ms-intune-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Microsoft Entra tenant ID
    #[arg(long, env = "MS_INTUNE_TENANT_ID", hide_env = true)]
    pub tenant_id: String,

    /// Application (client) ID of the app registration
    #[arg(long, env = "MS_INTUNE_APP_ID", hide_env = true)]
    pub app_id: String,

    /// Client secret of the app registration
    #[arg(long, env = "MS_INTUNE_APP_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Read the client secret from a secret store (<id>:<path>)
    #[arg(long, value_name = "ID:PATH")]
    pub secret_ref: Option<String>,

    /// Comma-separated services to monitor (app_licenses, apple_ade_tokens,
    /// apple_mdm_push_cert, cert_connectors, vpp_tokens)
    #[arg(long, value_name = "LIST")]
    pub services: Option<String>,

    /// Timeout for each API request in seconds (3-600)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: f64,

    /// Proxy: FROM_ENVIRONMENT, NO_PROXY or a proxy URL
    #[arg(long, default_value = "FROM_ENVIRONMENT")]
    pub proxy: String,

    /// Enable debug logging
    #[arg(long, env = "MS_INTUNE_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Override the Microsoft identity platform host
    #[arg(long, env = "MS_INTUNE_LOGIN_URL", hide = true)]
    pub login_url: Option<String>,

    /// Override the Microsoft Graph host
    #[arg(long, env = "MS_INTUNE_GRAPH_URL", hide = true)]
    pub graph_url: Option<String>,
}

impl Cli {
    /// Resolve the parsed arguments into a run configuration.
    ///
    /// An explicit `--secret` wins over `--secret-ref`.
    pub fn into_config(self, secrets: &dyn SecretResolver) -> Result<AgentConfig> {
        let app_secret = match (self.secret, self.secret_ref) {
            (Some(secret), _) => secret,
            (None, Some(reference)) => secrets.resolve_secret(&reference)?,
            (None, None) => return Err(ConfigError::MissingSecret.into()),
        };

        let services: ServiceSelection = match self.services.as_deref() {
            Some(list) => list.parse()?,
            None => ServiceSelection::default(),
        };

        Ok(AgentConfig {
            credentials: Credentials {
                tenant_id: self.tenant_id,
                app_id: self.app_id,
                app_secret,
            },
            services,
            timeout: validate_timeout(self.timeout)?,
            proxy: self.proxy.parse::<ProxyDirective>()?,
            endpoints: Endpoints::with_overrides(
                self.login_url.as_deref(),
                self.graph_url.as_deref(),
            ),
        })
    }
}
