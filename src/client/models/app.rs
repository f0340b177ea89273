//! Mobile app models

use serde::Deserialize;

/// An app from `deviceAppManagement/mobileApps`.
///
/// Only licensed app types (VPP, store for business, ...) carry license
/// counts; for every other type both counts are absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileApp {
    /// Graph type discriminator, e.g. `#microsoft.graph.iosVppApp`
    #[serde(rename = "@odata.type")]
    pub odata_type: String,

    pub display_name: String,

    #[serde(default)]
    pub publisher: Option<String>,

    #[serde(default)]
    pub total_license_count: Option<i64>,

    #[serde(default)]
    pub used_license_count: Option<i64>,

    #[serde(default)]
    pub is_assigned: Option<bool>,
}
