//! Per-service collectors
//!
//! Each collector owns one Graph endpoint and one projection from raw items
//! to the flat records the monitoring side expects. This module dispatches
//! by [`Service`] and turns call failures into operator guidance.

use log::debug;
use reqwest::StatusCode;

use crate::client::GraphApi;
use crate::config::Service;
use crate::error::{ApiError, Error, Result};
use crate::output::Section;

pub mod ade_tokens;
pub mod app_licenses;
pub mod cert_connectors;
pub mod push_cert;
pub mod vpp_tokens;

/// Run one collector and build its section.
///
/// Returns `None` when there is nothing to report: an empty list, or no
/// push certificate configured. Such services write no section at all.
pub async fn collect<A: GraphApi + ?Sized>(service: Service, api: &A) -> Result<Option<Section>> {
    let failed = |err: ApiError| collector_failure(service, err);

    let section = match service {
        Service::AppLicenses => {
            list_section(service, &app_licenses::collect(api).await.map_err(failed)?)?
        }
        Service::AppleAdeTokens => {
            list_section(service, &ade_tokens::collect(api).await.map_err(failed)?)?
        }
        Service::AppleMdmPushCert => match push_cert::collect(api).await.map_err(failed)? {
            Some(cert) => Some(Section::new(service.section_name(), &cert)?),
            None => {
                debug!("No Apple MDM push certificate configured");
                None
            }
        },
        Service::VppTokens => {
            list_section(service, &vpp_tokens::collect(api).await.map_err(failed)?)?
        }
        Service::CertConnectors => {
            list_section(service, &cert_connectors::collect(api).await.map_err(failed)?)?
        }
    };

    Ok(section)
}

fn list_section<T: serde::Serialize>(service: Service, records: &[T]) -> Result<Option<Section>> {
    debug!("{}: {} records", service, records.len());
    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(Section::new(service.section_name(), records)?))
}

/// Wrap a collector call failure with guidance for the operator.
pub fn collector_failure(service: Service, err: ApiError) -> Error {
    let message = match err.status() {
        Some(StatusCode::FORBIDDEN) => format!(
            "Access denied. The app registration needs at least the {} API application \
             permission with admin consent. ({})",
            service.required_permission(),
            err
        ),
        Some(StatusCode::TOO_MANY_REQUESTS) => format!(
            "Request throttled by Microsoft Graph. Try again later. ({})",
            err
        ),
        _ => err.to_string(),
    };

    Error::Collect {
        service,
        message,
        source: err,
    }
}
