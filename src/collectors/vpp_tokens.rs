//! Apple Volume Purchase Program tokens

use serde::Serialize;

use crate::client::GraphApi;
use crate::client::models::{VppToken, decode};
use crate::client::pagination::fetch_values;
use crate::error::ApiResult;

pub const PATH: &str = "/v1.0/deviceAppManagement/vppTokens";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VppTokenRecord {
    pub token_appleid: Option<String>,
    pub token_expiration: String,
    pub token_id: String,
    pub token_name: Option<String>,
    pub token_state: Option<String>,
}

impl From<VppToken> for VppTokenRecord {
    fn from(token: VppToken) -> Self {
        Self {
            token_appleid: token.apple_id,
            token_expiration: token.expiration_date_time,
            token_id: token.id,
            token_name: token.display_name,
            token_state: token.state,
        }
    }
}

/// Fetch all VPP tokens, ordered by id.
pub async fn collect<A: GraphApi + ?Sized>(api: &A) -> ApiResult<Vec<VppTokenRecord>> {
    let mut tokens = fetch_values(api, PATH)
        .await?
        .into_iter()
        .map(|item| decode::<VppToken>(item, "VPP token").map(VppTokenRecord::from))
        .collect::<ApiResult<Vec<_>>>()?;

    tokens.sort_by(|a, b| a.token_id.cmp(&b.token_id));
    Ok(tokens)
}
