//! Certificate connector models

use serde::Deserialize;

/// Certificate connector (`ndesConnectors`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NdesConnector {
    pub id: String,

    /// Absent until the connector has checked in once
    #[serde(default)]
    pub last_connection_date_time: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub connector_version: Option<String>,
}
