//! Monitored Intune services and the caller's selection of them

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// One monitored resource kind.
///
/// Declaration order is the collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Service {
    AppLicenses,
    AppleAdeTokens,
    AppleMdmPushCert,
    CertConnectors,
    VppTokens,
}

impl Service {
    /// All services in collection order
    pub const ALL: [Service; 5] = [
        Service::AppLicenses,
        Service::AppleAdeTokens,
        Service::AppleMdmPushCert,
        Service::CertConnectors,
        Service::VppTokens,
    ];

    /// Tag accepted in the service selection
    pub fn tag(self) -> &'static str {
        match self {
            Service::AppLicenses => "app_licenses",
            Service::AppleAdeTokens => "apple_ade_tokens",
            Service::AppleMdmPushCert => "apple_mdm_push_cert",
            Service::VppTokens => "vpp_tokens",
            Service::CertConnectors => "cert_connectors",
        }
    }

    /// Agent section name read by the monitoring side
    pub fn section_name(self) -> &'static str {
        match self {
            Service::AppLicenses => "ms_intune_app_licenses",
            Service::AppleAdeTokens => "ms_intune_apple_ade_tokens",
            Service::AppleMdmPushCert => "ms_intune_apple_mdm_push_cert",
            Service::VppTokens => "ms_intune_apple_vpp_tokens",
            Service::CertConnectors => "ms_intune_cert_connectors",
        }
    }

    /// Minimum Graph application permission needed to read this service
    pub fn required_permission(self) -> &'static str {
        match self {
            Service::AppLicenses => "DeviceManagementApps.Read.All",
            Service::AppleAdeTokens | Service::AppleMdmPushCert | Service::VppTokens => {
                "DeviceManagementServiceConfig.Read.All"
            }
            Service::CertConnectors => "DeviceManagementConfiguration.Read.All",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Service {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.tag() == s)
            .ok_or_else(|| ConfigError::UnknownService(s.to_string()))
    }
}

/// Set of services chosen by the caller.
///
/// Iteration always follows [`Service::ALL`] order, regardless of the order
/// the tags were given in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSelection {
    services: Vec<Service>,
}

impl ServiceSelection {
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Selected services in collection order
    pub fn iter(&self) -> impl Iterator<Item = Service> + '_ {
        self.services.iter().copied()
    }
}

impl FromStr for ServiceSelection {
    type Err = ConfigError;

    /// Parse a comma-separated tag list. Blank entries are skipped, so an
    /// empty string is an empty selection.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut services = Vec::new();
        for tag in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let service: Service = tag.parse()?;
            if !services.contains(&service) {
                services.push(service);
            }
        }
        services.sort();
        Ok(Self { services })
    }
}
