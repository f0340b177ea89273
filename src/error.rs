//! Error types and exit codes for the Intune agent

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::Service;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for a single HTTP call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Exit code for output or other I/O failures
pub const EXIT_IO: i32 = 1;

/// Exit code for invalid configuration (selection, proxy, secret store)
pub const EXIT_CONFIG: i32 = 3;

/// Top-level error type for the agent.
///
/// Every variant is fatal. `main` prints it once to stderr and exits with
/// [`Error::exit_code`].
#[derive(Debug, Error)]
pub enum Error {
    /// Token acquisition failed; nothing was collected.
    #[error("Token request failed. {message}")]
    Auth {
        message: String,
        #[source]
        source: ApiError,
    },

    /// A collector failed; sections written before it remain on stdout.
    #[error("Collecting {service} failed. {message}")]
    Collect {
        service: Service,
        message: String,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Auth { source, .. } => exit_code(Stage::Token, source.kind()),
            Error::Collect {
                service, source, ..
            } => exit_code(Stage::Service(*service), source.kind()),
            Error::Config(_) => EXIT_CONFIG,
            Error::Io(_) | Error::Json(_) => EXIT_IO,
        }
    }
}

/// Failure of one HTTP call, as classified by the fetcher.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classify a transport error. `timeout` is the configured per-call limit.
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout)
        } else if err.is_connect() {
            ApiError::Network(format!("Failed to connect: {}", err))
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// HTTP status of the response, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Status { .. } => FailureKind::Api,
            ApiError::Timeout(_) => FailureKind::Timeout,
            ApiError::Network(_) => FailureKind::Network,
            ApiError::InvalidResponse(_) => FailureKind::Malformed,
        }
    }
}

/// Closed set of failure classes used for exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-2xx response
    Api,
    Timeout,
    /// DNS, connect, TLS or body read failure
    Network,
    /// 2xx response whose body lacks required fields or is not JSON
    Malformed,
}

/// The owner of a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Token,
    Service(Service),
}

/// Exit code table. The tens digit names the owner, the units digit the
/// failure class.
pub fn exit_code(stage: Stage, kind: FailureKind) -> i32 {
    let owner = match stage {
        Stage::Token => 10,
        Stage::Service(Service::AppLicenses) => 20,
        Stage::Service(Service::AppleAdeTokens) => 30,
        Stage::Service(Service::AppleMdmPushCert) => 40,
        Stage::Service(Service::VppTokens) => 50,
        Stage::Service(Service::CertConnectors) => 60,
    };
    let class = match kind {
        FailureKind::Api => 0,
        FailureKind::Timeout => 1,
        FailureKind::Network => 2,
        FailureKind::Malformed => 3,
    };
    owner + class
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Unknown service '{0}'. Valid services: app_licenses, apple_ade_tokens, \
         apple_mdm_push_cert, cert_connectors, vpp_tokens"
    )]
    UnknownService(String),

    #[error("Invalid timeout {0}s. The timeout must be between 3s and 600s.")]
    InvalidTimeout(f64),

    #[error("Invalid proxy '{url}': {reason}")]
    InvalidProxy { url: String, reason: String },

    #[error("No client secret configured. Pass --secret or --secret-ref.")]
    MissingSecret,

    #[error("Invalid secret reference '{0}'. Expected <id>:<path>.")]
    InvalidSecretRef(String),

    #[error("Failed to read secret store {path}: {reason}")]
    SecretStore { path: String, reason: String },

    #[error("Secret '{id}' not found in {path}")]
    SecretNotFound { id: String, path: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
