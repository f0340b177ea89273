//! OAuth2 client-credentials token acquisition
//!
//! One token is requested per run and used read-only by every collector.
//! There is no refresh and no retry: a single failure ends the run.

use std::fmt;
use std::time::Duration;

use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

use super::http::send_json;
use super::models::decode;
use crate::config::Credentials;
use crate::error::{ApiError, Error, Result};

/// Scope requesting all application permissions granted for Graph
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Form body sent to the token endpoint
#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
    scope: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Bearer token for the Graph API. `Debug` never prints the value.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Exchanges tenant credentials for a bearer token.
pub struct TokenProvider<'a> {
    http: &'a HttpClient,
    login_url: &'a str,
    timeout: Duration,
}

impl<'a> TokenProvider<'a> {
    pub fn new(http: &'a HttpClient, login_url: &'a str, timeout: Duration) -> Self {
        Self {
            http,
            login_url,
            timeout,
        }
    }

    fn token_url(&self, tenant_id: &str) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.login_url, tenant_id)
    }

    /// Request a token with the client-credentials grant.
    pub async fn acquire(&self, credentials: &Credentials, scope: &str) -> Result<AccessToken> {
        let url = self.token_url(&credentials.tenant_id);
        debug!("Requesting token for app {} from {}", credentials.app_id, url);

        let form = TokenRequest {
            client_id: &credentials.app_id,
            client_secret: &credentials.app_secret,
            grant_type: "client_credentials",
            scope,
        };

        let body = send_json(self.http.post(&url).form(&form), self.timeout)
            .await
            .map_err(token_failure)?;
        let response: TokenResponse = decode(body, "token response").map_err(token_failure)?;

        debug!("Token acquired");
        Ok(AccessToken::new(response.access_token))
    }
}

/// Wrap a token call failure with guidance for the operator.
pub fn token_failure(err: ApiError) -> Error {
    let hint = match err.status() {
        Some(StatusCode::BAD_REQUEST) => Some("Check the tenant ID and client ID."),
        Some(StatusCode::UNAUTHORIZED) => Some("Check the client secret."),
        Some(StatusCode::TOO_MANY_REQUESTS) => {
            Some("Request throttled by Microsoft Entra ID. Try again later.")
        }
        _ => None,
    };

    let message = match hint {
        Some(hint) => format!("{} ({})", hint, err),
        None => err.to_string(),
    };
    Error::Auth {
        message,
        source: err,
    }
}
