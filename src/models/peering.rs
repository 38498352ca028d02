//! VNet peering data model.

use serde::{Deserialize, Serialize};

/// A directional peering record between two VNets.
///
/// A full hub-spoke relationship requires two records: hub->spoke with
/// gateway transit granted, spoke->hub consuming the remote gateway.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Peering {
    /// Source VNet id.
    pub from_vnet: String,
    /// Target VNet id.
    pub to_vnet: String,
    /// Allow traffic between the peered address spaces.
    pub allow_vnet_access: bool,
    /// Allow traffic forwarded by an appliance in the remote VNet.
    pub allow_forwarded_traffic: bool,
    /// Grant (hub side) or consume (spoke side) gateway transit.
    pub gateway_transit: bool,
}

impl Peering {
    /// Hub-to-spoke record granting gateway transit.
    pub fn hub_to_spoke(hub_id: &str, spoke_id: &str) -> Peering {
        Peering {
            from_vnet: hub_id.to_string(),
            to_vnet: spoke_id.to_string(),
            allow_vnet_access: true,
            allow_forwarded_traffic: true,
            gateway_transit: true,
        }
    }

    /// Spoke-to-hub record using the hub's gateway.
    pub fn spoke_to_hub(spoke_id: &str, hub_id: &str) -> Peering {
        Peering {
            from_vnet: spoke_id.to_string(),
            to_vnet: hub_id.to_string(),
            allow_vnet_access: true,
            allow_forwarded_traffic: true,
            gateway_transit: true,
        }
    }
}
