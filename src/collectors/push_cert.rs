//! Apple MDM push certificate

use reqwest::StatusCode;
use serde::Serialize;

use crate::client::GraphApi;
use crate::client::models::{ApplePushNotificationCertificate, decode};
use crate::error::{ApiError, ApiResult};

pub const PATH: &str = "/v1.0/deviceManagement/applePushNotificationCertificate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushCertificate {
    pub cert_appleid: Option<String>,
    pub cert_expiration: String,
}

/// Fetch the tenant's push certificate.
///
/// Graph answers 404 when no certificate was ever uploaded; that is
/// `Ok(None)`, not a failure.
pub async fn collect<A: GraphApi + ?Sized>(api: &A) -> ApiResult<Option<PushCertificate>> {
    let body = match api.fetch(PATH).await {
        Ok(body) => body,
        Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let cert: ApplePushNotificationCertificate = decode(body, "push certificate")?;
    Ok(Some(PushCertificate {
        cert_appleid: cert.apple_identifier,
        cert_expiration: cert.expiration_date_time,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockGraphApi;
    use serde_json::json;

    #[tokio::test]
    async fn test_collect_certificate() {
        let api = MockGraphApi::new().with_json(
            PATH,
            json!({
                "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#deviceManagement/applePushNotificationCertificate/$entity",
                "id": "cert-1",
                "appleIdentifier": "mail@domain.de",
                "topicIdentifier": "com.apple.mgmt.External.1",
                "expirationDateTime": "2026-05-01T00:00:00Z"
            }),
        );

        let cert = collect(&api).await.unwrap();
        assert_eq!(
            cert,
            Some(PushCertificate {
                cert_appleid: Some("mail@domain.de".to_string()),
                cert_expiration: "2026-05-01T00:00:00Z".to_string(),
            })
        );
    }

    #[test]
    fn test_record_keys() {
        let record = PushCertificate {
            cert_appleid: None,
            cert_expiration: "2026-05-01T00:00:00Z".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"cert_appleid":null,"cert_expiration":"2026-05-01T00:00:00Z"}"#
        );
    }

    #[tokio::test]
    async fn test_not_found_is_absent() {
        let api = MockGraphApi::new().with_status(PATH, 404, r#"{"error":{"code":"ResourceNotFound"}}"#);
        assert_eq!(collect(&api).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_other_status_is_failure() {
        let api = MockGraphApi::new().with_status(PATH, 500, "boom");
        let err = collect(&api).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_missing_expiration_is_malformed() {
        let api = MockGraphApi::new().with_json(PATH, json!({ "appleIdentifier": "a@b.c" }));
        let err = collect(&api).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
