//! Apple Automated Device Enrollment tokens

use serde::Serialize;

use crate::client::GraphApi;
use crate::client::models::{DepOnboardingSetting, decode};
use crate::client::pagination::fetch_values;
use crate::error::ApiResult;

pub const PATH: &str = "/beta/deviceManagement/depOnboardingSettings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdeToken {
    pub token_appleid: Option<String>,
    pub token_expiration: String,
    pub token_id: String,
    pub token_name: Option<String>,
    pub token_type: Option<String>,
}

impl From<DepOnboardingSetting> for AdeToken {
    fn from(setting: DepOnboardingSetting) -> Self {
        Self {
            token_appleid: setting.apple_identifier,
            token_expiration: setting.token_expiration_date_time,
            token_id: setting.id,
            token_name: setting.token_name,
            token_type: setting.token_type,
        }
    }
}

/// Fetch all ADE tokens, ordered by id.
pub async fn collect<A: GraphApi + ?Sized>(api: &A) -> ApiResult<Vec<AdeToken>> {
    let mut tokens = fetch_values(api, PATH)
        .await?
        .into_iter()
        .map(|item| decode::<DepOnboardingSetting>(item, "ADE token").map(AdeToken::from))
        .collect::<ApiResult<Vec<_>>>()?;

    tokens.sort_by(|a, b| a.token_id.cmp(&b.token_id));
    Ok(tokens)
}
