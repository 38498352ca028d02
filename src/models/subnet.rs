//! Subnet data model.

use super::Ipv4;
use crate::config;
use serde::{Deserialize, Serialize};

/// Role a subnet plays inside its VNet.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubnetPurpose {
    Public,
    App,
    Data,
    Infra,
    Gateway,
    Bastion,
    Agw,
    Firewall,
}

impl SubnetPurpose {
    /// Best-effort mapping from a free-form purpose label.
    /// Unrecognized input falls back to `App`.
    pub fn parse(label: &str) -> SubnetPurpose {
        match label.trim().to_lowercase().as_str() {
            "public" => SubnetPurpose::Public,
            "app" | "application" | "web" => SubnetPurpose::App,
            "data" | "db" | "database" => SubnetPurpose::Data,
            "infra" | "infrastructure" | "mgmt" | "management" => SubnetPurpose::Infra,
            "gateway" | "gw" => SubnetPurpose::Gateway,
            "bastion" => SubnetPurpose::Bastion,
            "agw" | "appgw" | "waf" => SubnetPurpose::Agw,
            "firewall" | "fw" => SubnetPurpose::Firewall,
            _ => SubnetPurpose::App,
        }
    }

    /// Purpose implied by a reserved Azure subnet id, if any.
    pub fn from_reserved_id(id: &str) -> Option<SubnetPurpose> {
        match id {
            config::GATEWAY_SUBNET => Some(SubnetPurpose::Gateway),
            config::FIREWALL_SUBNET => Some(SubnetPurpose::Firewall),
            config::BASTION_SUBNET => Some(SubnetPurpose::Bastion),
            config::APPGW_SUBNET => Some(SubnetPurpose::Agw),
            _ => None,
        }
    }
}

/// A subnet within a VNet.
///
/// `nsg_id` and `route_table_id` are back-references into the resource
/// collection, not ownership.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    /// Subnet id, unique within its parent VNet.
    pub id: String,
    /// CIDR block of the subnet (None if not configured).
    pub cidr: Option<Ipv4>,
    /// Role of the subnet.
    pub purpose: SubnetPurpose,
    /// Attached Network Security Group resource id, if any.
    pub nsg_id: Option<String>,
    /// Attached Route Table resource id, if any.
    pub route_table_id: Option<String>,
}

impl Subnet {
    /// Create a subnet with a parsed CIDR and no attachments.
    pub fn new(id: &str, cidr: Ipv4, purpose: SubnetPurpose) -> Subnet {
        Subnet {
            id: id.to_string(),
            cidr: Some(cidr),
            purpose,
            nsg_id: None,
            route_table_id: None,
        }
    }
}
