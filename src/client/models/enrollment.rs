//! Apple enrollment models: ADE tokens, MDM push certificate, VPP tokens

use serde::Deserialize;

/// Automated Device Enrollment token (`depOnboardingSettings`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepOnboardingSetting {
    pub id: String,

    #[serde(default)]
    pub apple_identifier: Option<String>,

    pub token_expiration_date_time: String,

    #[serde(default)]
    pub token_name: Option<String>,

    #[serde(default)]
    pub token_type: Option<String>,
}

/// The tenant's Apple MDM push certificate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePushNotificationCertificate {
    #[serde(default)]
    pub apple_identifier: Option<String>,

    pub expiration_date_time: String,
}

/// Volume Purchase Program token
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VppToken {
    pub id: String,

    #[serde(default)]
    pub apple_id: Option<String>,

    pub expiration_date_time: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub state: Option<String>,
}
