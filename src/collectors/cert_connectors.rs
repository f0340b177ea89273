//! Certificate connectors (NDES)

use serde::Serialize;

use crate::client::GraphApi;
use crate::client::models::{NdesConnector, decode};
use crate::client::pagination::fetch_values;
use crate::error::ApiResult;

pub const PATH: &str = "/beta/deviceManagement/ndesConnectors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertConnector {
    pub connector_connection_last: Option<String>,
    pub connector_id: String,
    pub connector_name: Option<String>,
    pub connector_state: Option<String>,
    pub connector_version: Option<String>,
}

impl From<NdesConnector> for CertConnector {
    fn from(connector: NdesConnector) -> Self {
        Self {
            connector_connection_last: connector.last_connection_date_time,
            connector_id: connector.id,
            connector_name: connector.display_name,
            connector_state: connector.state,
            connector_version: connector.connector_version,
        }
    }
}

/// Fetch all certificate connectors, ordered by id.
pub async fn collect<A: GraphApi + ?Sized>(api: &A) -> ApiResult<Vec<CertConnector>> {
    let mut connectors = fetch_values(api, PATH)
        .await?
        .into_iter()
        .map(|item| {
            decode::<NdesConnector>(item, "certificate connector").map(CertConnector::from)
        })
        .collect::<ApiResult<Vec<_>>>()?;

    connectors.sort_by(|a, b| a.connector_id.cmp(&b.connector_id));
    Ok(connectors)
}
