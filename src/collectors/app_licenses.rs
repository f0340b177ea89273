//! App license inventory
//!
//! Lists published apps page by page and keeps only those that carry a
//! license count (VPP and store-for-business apps).

use log::debug;
use serde::Serialize;

use crate::client::GraphApi;
use crate::client::models::{MobileApp, decode};
use crate::client::pagination::fetch_all;
use crate::error::{ApiError, ApiResult};

/// Published apps only; the filter is applied by Graph
pub const PATH: &str =
    "/v1.0/deviceAppManagement/mobileApps?$filter=publishingState eq 'published'";

const ODATA_TYPE_PREFIX: &str = "#microsoft.graph.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppLicense {
    pub app_type: String,
    pub app_name: String,
    pub app_publisher: Option<String>,
    pub app_license_total: i64,
    pub app_license_consumed: i64,
    pub app_assigned: Option<bool>,
}

pub async fn collect<A: GraphApi + ?Sized>(api: &A) -> ApiResult<Vec<AppLicense>> {
    let items = fetch_all(api, PATH).await?;
    let fetched = items.len();

    let mut licenses = Vec::new();
    for item in items {
        let app: MobileApp = decode(item, "mobile app")?;
        if let Some(license) = AppLicense::from_app(app)? {
            licenses.push(license);
        }
    }

    debug!("{} of {} published apps are licensed", licenses.len(), fetched);
    Ok(licenses)
}

impl AppLicense {
    /// Project an app. Apps without a total license count are not licensed
    /// apps and yield `None`.
    fn from_app(app: MobileApp) -> ApiResult<Option<Self>> {
        let Some(total) = app.total_license_count else {
            return Ok(None);
        };
        let consumed = app.used_license_count.ok_or_else(|| {
            ApiError::InvalidResponse(format!(
                "App '{}' has totalLicenseCount but no usedLicenseCount",
                app.display_name
            ))
        })?;

        Ok(Some(Self {
            app_type: app_type_label(&app.odata_type),
            app_name: app.display_name,
            app_publisher: app.publisher,
            app_license_total: total,
            app_license_consumed: consumed,
            app_assigned: app.is_assigned,
        }))
    }
}

/// Human label for a Graph app type. Unknown types keep their bare name.
pub fn app_type_label(odata_type: &str) -> String {
    let bare = odata_type
        .strip_prefix(ODATA_TYPE_PREFIX)
        .unwrap_or(odata_type);

    match bare {
        "androidForWorkApp" => "Android for work",
        "androidManagedStoreApp" => "Android managed store",
        "iosVppApp" => "iOS VPP",
        "macOsVppApp" => "macOS VPP",
        "microsoftStoreForBusinessApp" => "MS Store for business",
        "windowsUniversalAppX" => "Windows universal AppX",
        other => other,
    }
    .to_string()
}
