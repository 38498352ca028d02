//! Resource data model.
//!
//! A [`Resource`] is anything attached to the topology besides the VNets
//! themselves: gateways, firewalls, platform services, DNS zones, route
//! tables. Kind-specific attributes live on the [`ResourceKind`] variants;
//! [`ResourceType`] is the fieldless classification used by the type
//! normalizer, the deduplication key and the wiring engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL database service tier.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlTier {
    #[default]
    #[serde(rename = "GP")]
    GeneralPurpose,
    #[serde(rename = "BC")]
    BusinessCritical,
}

/// Storage account redundancy option.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageRedundancy {
    #[default]
    #[serde(rename = "LRS")]
    Lrs,
    #[serde(rename = "ZRS")]
    Zrs,
    #[serde(rename = "GZRS")]
    Gzrs,
}

/// A single route table entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub address_prefix: String,
    pub next_hop_type: String,
    pub next_hop_ip: Option<String>,
}

impl Route {
    /// Default route sending all traffic to a virtual appliance.
    pub fn default_via_appliance(next_hop_ip: &str) -> Route {
        Route {
            name: "default".to_string(),
            address_prefix: "0.0.0.0/0".to_string(),
            next_hop_type: "VirtualAppliance".to_string(),
            next_hop_ip: Some(next_hop_ip.to_string()),
        }
    }
}

/// Canonical resource classification.
///
/// The `Display` names are fixed points of the type normalizer: feeding a
/// canonical name back through classification yields the same type.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    ApplicationGateway,
    AzureFirewall,
    VpnGateway,
    ExpressRouteGateway,
    Bastion,
    AppService,
    SqlDb,
    Storage,
    KeyVault,
    PrivateEndpoint,
    PrivateDnsZone,
    NetworkSecurityGroup,
    RouteTable,
    PublicIp,
    TrafficManager,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceType::ApplicationGateway => "ApplicationGateway",
            ResourceType::AzureFirewall => "AzureFirewall",
            ResourceType::VpnGateway => "VpnGateway",
            ResourceType::ExpressRouteGateway => "ExpressRouteGateway",
            ResourceType::Bastion => "Bastion",
            ResourceType::AppService => "AppService",
            ResourceType::SqlDb => "SqlDb",
            ResourceType::Storage => "Storage",
            ResourceType::KeyVault => "KeyVault",
            ResourceType::PrivateEndpoint => "PrivateEndpoint",
            ResourceType::PrivateDnsZone => "PrivateDnsZone",
            ResourceType::NetworkSecurityGroup => "NetworkSecurityGroup",
            ResourceType::RouteTable => "RouteTable",
            ResourceType::PublicIp => "PublicIp",
            ResourceType::TrafficManager => "TrafficManager",
        };
        write!(f, "{name}")
    }
}

/// Kind-specific resource attributes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ResourceKind {
    ApplicationGateway {
        subnet_id: Option<String>,
    },
    AzureFirewall {
        subnet_id: Option<String>,
    },
    VpnGateway {
        subnet_id: Option<String>,
    },
    ExpressRouteGateway {
        subnet_id: Option<String>,
    },
    Bastion {
        subnet_id: Option<String>,
    },
    AppService {
        sku: Option<String>,
        instances: Option<u32>,
    },
    SqlDb {
        tier: SqlTier,
        zone_redundant: bool,
    },
    Storage {
        redundancy: StorageRedundancy,
    },
    KeyVault,
    PrivateEndpoint {
        subnet_id: Option<String>,
        target_type: String,
        target_id: String,
    },
    PrivateDnsZone {
        zone_name: String,
        vnet_links: Vec<String>,
    },
    NetworkSecurityGroup,
    RouteTable {
        routes: Vec<Route>,
    },
    PublicIp {
        sku: String,
        allocation: String,
    },
    TrafficManager,
}

impl ResourceKind {
    /// The fieldless classification of this kind.
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceKind::ApplicationGateway { .. } => ResourceType::ApplicationGateway,
            ResourceKind::AzureFirewall { .. } => ResourceType::AzureFirewall,
            ResourceKind::VpnGateway { .. } => ResourceType::VpnGateway,
            ResourceKind::ExpressRouteGateway { .. } => ResourceType::ExpressRouteGateway,
            ResourceKind::Bastion { .. } => ResourceType::Bastion,
            ResourceKind::AppService { .. } => ResourceType::AppService,
            ResourceKind::SqlDb { .. } => ResourceType::SqlDb,
            ResourceKind::Storage { .. } => ResourceType::Storage,
            ResourceKind::KeyVault => ResourceType::KeyVault,
            ResourceKind::PrivateEndpoint { .. } => ResourceType::PrivateEndpoint,
            ResourceKind::PrivateDnsZone { .. } => ResourceType::PrivateDnsZone,
            ResourceKind::NetworkSecurityGroup => ResourceType::NetworkSecurityGroup,
            ResourceKind::RouteTable { .. } => ResourceType::RouteTable,
            ResourceKind::PublicIp { .. } => ResourceType::PublicIp,
            ResourceKind::TrafficManager => ResourceType::TrafficManager,
        }
    }

    /// Mutable access to the subnet placement reference, for kinds that
    /// are homed in a subnet.
    pub fn subnet_id_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            ResourceKind::ApplicationGateway { subnet_id }
            | ResourceKind::AzureFirewall { subnet_id }
            | ResourceKind::VpnGateway { subnet_id }
            | ResourceKind::ExpressRouteGateway { subnet_id }
            | ResourceKind::Bastion { subnet_id }
            | ResourceKind::PrivateEndpoint { subnet_id, .. } => Some(subnet_id),
            _ => None,
        }
    }
}

/// A resource attached to the topology.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Globally unique, sanitized id.
    pub id: String,
    /// Optional display label.
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(id: &str, label: Option<&str>, kind: ResourceKind) -> Resource {
        Resource {
            id: id.to_string(),
            label: label.map(|l| l.to_string()),
            kind,
        }
    }

    /// Label for display, falling back to the id.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}
