//! Virtual network (VNet) data model.

use super::{Ipv4, Subnet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a VNet in the hub-and-spoke topology.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VnetKind {
    Hub,
    Spoke,
}

/// A virtual network with its subnets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vnet {
    /// Sanitized, globally unique VNet id.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Address space (None if the input never supplied one).
    pub cidr: Option<Ipv4>,
    /// Hub or spoke.
    pub kind: VnetKind,
    /// Ordered subnets. Ids are unique within the VNet.
    pub subnets: Vec<Subnet>,
}

impl Vnet {
    /// Look up a subnet by id.
    pub fn subnet(&self, id: &str) -> Option<&Subnet> {
        self.subnets.iter().find(|s| s.id == id)
    }

    /// True when the VNet already carries a subnet with the given id.
    pub fn has_subnet(&self, id: &str) -> bool {
        self.subnets.iter().any(|s| s.id == id)
    }
}

impl fmt::Display for Vnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cidr = self
            .cidr
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        write!(
            f,
            "{} [{}] ({:?}, {} subnets)",
            self.id,
            cidr,
            self.kind,
            self.subnets.len()
        )
    }
}
