//! Proxy directive for outbound HTTP

use std::fmt;
use std::str::FromStr;

use reqwest::ClientBuilder;

use crate::error::ConfigError;

/// How the HTTP layer reaches the network.
///
/// `Debug` never prints proxy credentials.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum ProxyDirective {
    /// Use `HTTPS_PROXY`/`NO_PROXY` and friends from the environment
    #[default]
    Environment,
    /// Connect directly, ignoring proxy environment variables
    NoProxy,
    /// Route every request through this proxy URL
    Url(String),
}

impl ProxyDirective {
    /// Apply the directive to a reqwest client builder.
    pub fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, ConfigError> {
        match self {
            ProxyDirective::Environment => Ok(builder),
            ProxyDirective::NoProxy => Ok(builder.no_proxy()),
            ProxyDirective::Url(url) => {
                let proxy = reqwest::Proxy::all(url).map_err(|e| ConfigError::InvalidProxy {
                    url: redact_url(url),
                    reason: e.to_string(),
                })?;
                Ok(builder.proxy(proxy))
            }
        }
    }
}

impl FromStr for ProxyDirective {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "FROM_ENVIRONMENT" => Ok(ProxyDirective::Environment),
            "NO_PROXY" => Ok(ProxyDirective::NoProxy),
            url if url.contains("://") => Ok(ProxyDirective::Url(url.to_string())),
            other => Err(ConfigError::InvalidProxy {
                url: redact_url(other),
                reason: "expected FROM_ENVIRONMENT, NO_PROXY or a URL with scheme".to_string(),
            }),
        }
    }
}

impl fmt::Debug for ProxyDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyDirective::Environment => f.write_str("Environment"),
            ProxyDirective::NoProxy => f.write_str("NoProxy"),
            ProxyDirective::Url(url) => f.debug_tuple("Url").field(&redact_url(url)).finish(),
        }
    }
}

/// Replace the userinfo part of a URL, if any, with `<redacted>`.
pub fn redact_url(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    let Some(at) = authority.rfind('@') else {
        return url.to_string();
    };
    let host = &authority[at + 1..];

    match scheme {
        Some(scheme) => format!("{}://<redacted>@{}{}", scheme, host, tail),
        None => format!("<redacted>@{}{}", host, tail),
    }
}
