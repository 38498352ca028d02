//! Well-known identifiers, reserved subnet names and fixed CIDR defaults.
//!
//! These values mirror the Azure-reserved subnet names and the fixed
//! address plan the enforcement pass assumes. They are deliberately
//! constants so two runs over the same input produce identical output.

/// Reserved hub subnet name required by VPN/ExpressRoute gateways.
pub const GATEWAY_SUBNET: &str = "GatewaySubnet";
/// Fixed CIDR for the gateway subnet in every hub.
pub const GATEWAY_SUBNET_CIDR: &str = "10.0.0.32/27";

/// Reserved hub subnet name required by Azure Firewall.
pub const FIREWALL_SUBNET: &str = "AzureFirewallSubnet";
/// Fixed CIDR for the firewall subnet in every hub (Azure requires /26).
pub const FIREWALL_SUBNET_CIDR: &str = "10.0.1.0/26";

/// Reserved hub subnet name required by Azure Bastion.
pub const BASTION_SUBNET: &str = "AzureBastionSubnet";
/// Fixed CIDR for the bastion subnet in every hub.
pub const BASTION_SUBNET_CIDR: &str = "10.0.2.0/26";

/// Dedicated spoke subnet name for an Application Gateway.
pub const APPGW_SUBNET: &str = "AppGatewaySubnet";
/// Default CIDR used when a spoke is missing its Application Gateway
/// subnet. Flagged for review whenever it is applied.
pub const APPGW_SUBNET_CIDR: &str = "10.1.0.0/24";

/// Placeholder next-hop address for the spoke default route. Points at
/// the conventional first usable address of [`FIREWALL_SUBNET_CIDR`];
/// always surfaced as a review warning, never resolved.
pub const FIREWALL_PLACEHOLDER_IP: &str = "10.0.1.4";

/// Private DNS zone for SQL private endpoints.
pub const DNS_ZONE_SQL: &str = "privatelink.database.windows.net";
/// Private DNS zone for Storage (blob) private endpoints.
pub const DNS_ZONE_STORAGE: &str = "privatelink.blob.core.windows.net";
/// Private DNS zone for Key Vault private endpoints.
pub const DNS_ZONE_KEY_VAULT: &str = "privatelink.vaultcore.azure.net";

/// Id of the hub synthesized when aggregation produces no hub at all.
pub const DEFAULT_HUB_ID: &str = "hub";
/// Address space of the synthesized default hub.
pub const DEFAULT_HUB_CIDR: &str = "10.0.0.0/16";

/// Synthetic node id representing the on-premises network origin.
pub const ONPREM_ID: &str = "onprem";

/// Id suffix applied to every cloned VNet and resource in the DR region.
pub const DR_SUFFIX: &str = "_dr";
/// Fixed octet increment applied when shifting cloned address space.
pub const DR_OCTET_SHIFT: u8 = 100;

/// Id of the auto-created public IP fronting an Application Gateway.
pub const APPGW_PUBLIC_IP_ID: &str = "appgw_pip";
/// Id of the singleton Traffic Manager profile.
pub const TRAFFIC_MANAGER_ID: &str = "traffic_manager";
