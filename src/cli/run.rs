//! Run orchestration: authenticate once, then collect selected services in
//! order and write each non-empty result as a section.

use std::io::Write;

use log::{debug, info};

use super::AgentContext;
use crate::client::GraphApi;
use crate::collectors;
use crate::config::{AgentConfig, ServiceSelection};
use crate::error::Result;
use crate::output::SectionWriter;

/// Execute one agent run.
///
/// With an empty selection nothing is requested, not even a token.
pub async fn run<W: Write>(config: &AgentConfig, writer: &mut SectionWriter<W>) -> Result<()> {
    if config.services.is_empty() {
        info!("No services selected, nothing to collect");
        return Ok(());
    }

    let context = AgentContext::new(config).await?;
    collect_sections(&context.graph, &config.services, writer).await
}

/// Collect each selected service and write its section.
///
/// The first failure ends the run. Sections written before it stay written.
pub async fn collect_sections<A: GraphApi + ?Sized, W: Write>(
    api: &A,
    services: &ServiceSelection,
    writer: &mut SectionWriter<W>,
) -> Result<()> {
    for service in services.iter() {
        debug!("Collecting {}", service);
        match collectors::collect(service, api).await? {
            Some(section) => {
                debug!("Writing section {}", section.name());
                writer.write(&section)?;
            }
            None => debug!("{}: nothing to report", service),
        }
    }

    debug!("Wrote {} sections", writer.written());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockGraphApi;
    use crate::collectors::{ade_tokens, app_licenses, cert_connectors, push_cert, vpp_tokens};
    use crate::config::{Credentials, Endpoints, ProxyDirective};
    use serde_json::json;
    use std::time::Duration;

    fn scenario_api() -> MockGraphApi {
        MockGraphApi::new()
            .with_json(
                cert_connectors::PATH,
                json!({ "value": [{
                    "id": "b",
                    "displayName": "C2",
                    "state": "active",
                    "connectorVersion": "1.2",
                    "lastConnectionDateTime": "2025-01-01T00:00:00Z"
                }]}),
            )
            .with_json(
                vpp_tokens::PATH,
                json!({ "value": [{
                    "id": "a",
                    "appleId": "apple1",
                    "displayName": "T1",
                    "state": "valid",
                    "expirationDateTime": "2026-01-01T00:00:00Z"
                }]}),
            )
    }

    async fn output_for(api: &MockGraphApi, selection: &str) -> Result<String> {
        let mut writer = SectionWriter::new(Vec::new());
        let services: ServiceSelection = selection.parse()?;
        collect_sections(api, &services, &mut writer).await?;
        Ok(String::from_utf8(writer.into_inner()).unwrap())
    }

    #[tokio::test]
    async fn test_connectors_and_vpp_tokens_in_order() {
        let api = scenario_api();
        let out = output_for(&api, "vpp_tokens,cert_connectors").await.unwrap();

        let expected = concat!(
            "<<<ms_intune_cert_connectors:sep(0)>>>\n",
            r#"[{"connector_connection_last":"2025-01-01T00:00:00Z","connector_id":"b","connector_name":"C2","connector_state":"active","connector_version":"1.2"}]"#,
            "\n",
            "<<<ms_intune_apple_vpp_tokens:sep(0)>>>\n",
            r#"[{"token_appleid":"apple1","token_expiration":"2026-01-01T00:00:00Z","token_id":"a","token_name":"T1","token_state":"valid"}]"#,
            "\n",
        );
        assert_eq!(out, expected);
        assert_eq!(
            api.requests(),
            vec![cert_connectors::PATH, vpp_tokens::PATH]
        );
    }

    #[tokio::test]
    async fn test_output_is_stable_across_runs() {
        let first = output_for(&scenario_api(), "cert_connectors,vpp_tokens")
            .await
            .unwrap();
        let second = output_for(&scenario_api(), "cert_connectors,vpp_tokens")
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_sections() {
        let api = MockGraphApi::new()
            .with_json(
                ade_tokens::PATH,
                json!({ "value": [{
                    "id": "dep-1",
                    "tokenExpirationDateTime": "2026-03-01T10:00:00Z"
                }]}),
            )
            .with_status(push_cert::PATH, 403, "Forbidden")
            .with_json(vpp_tokens::PATH, json!({ "value": [] }));

        let mut writer = SectionWriter::new(Vec::new());
        let services: ServiceSelection = "apple_ade_tokens,apple_mdm_push_cert,vpp_tokens"
            .parse()
            .unwrap();
        let err = collect_sections(&api, &services, &mut writer)
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 40);
        assert!(err.to_string().contains("DeviceManagementServiceConfig.Read.All"));
        assert_eq!(writer.written(), 1);
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.starts_with("<<<ms_intune_apple_ade_tokens:sep(0)>>>\n"));
        // The VPP collector never ran
        assert!(!api.requests().iter().any(|r| r == vpp_tokens::PATH));
    }

    #[tokio::test]
    async fn test_empty_results_write_nothing() {
        let api = MockGraphApi::new()
            .with_json(app_licenses::PATH, json!({ "value": [] }))
            .with_status(push_cert::PATH, 404, "")
            .with_json(cert_connectors::PATH, json!({ "value": [] }));

        let out = output_for(&api, "app_licenses,apple_mdm_push_cert,cert_connectors")
            .await
            .unwrap();
        assert_eq!(out, "");
        assert_eq!(api.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_selection_skips_authentication() {
        // Unroutable endpoints: any request would fail the run.
        let config = AgentConfig {
            credentials: Credentials {
                tenant_id: "tenant".to_string(),
                app_id: "app".to_string(),
                app_secret: "secret".to_string(),
            },
            services: ServiceSelection::default(),
            timeout: Duration::from_secs(3),
            proxy: ProxyDirective::NoProxy,
            endpoints: Endpoints::with_overrides(
                Some("http://127.0.0.1:1"),
                Some("http://127.0.0.1:1"),
            ),
        };

        let mut writer = SectionWriter::new(Vec::new());
        run(&config, &mut writer).await.unwrap();
        assert_eq!(writer.written(), 0);
    }

    #[tokio::test]
    async fn test_run_against_http_doubles() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let token = server
            .mock("POST", "/tenant/oauth2/v2.0/token")
            .with_status(200)
            .with_body(r#"{"token_type":"Bearer","access_token":"tok"}"#)
            .expect(1)
            .create_async()
            .await;
        let vpp = server
            .mock("GET", vpp_tokens::PATH)
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"{"value":[{"id":"a","expirationDateTime":"2026-01-01T00:00:00Z"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let config = AgentConfig {
            credentials: Credentials {
                tenant_id: "tenant".to_string(),
                app_id: "app".to_string(),
                app_secret: "secret".to_string(),
            },
            services: "vpp_tokens".parse().unwrap(),
            timeout: Duration::from_secs(5),
            proxy: ProxyDirective::NoProxy,
            endpoints: Endpoints::with_overrides(Some(&base), Some(&base)),
        };

        let mut writer = SectionWriter::new(Vec::new());
        run(&config, &mut writer).await.unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.starts_with("<<<ms_intune_apple_vpp_tokens:sep(0)>>>\n"));
        assert!(out.contains(r#""token_id":"a""#));
        token.assert_async().await;
        vpp.assert_async().await;
    }
}
