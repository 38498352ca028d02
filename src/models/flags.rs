//! Requested feature flags.
//!
//! Produced upstream by the prompt-parsing collaborator; consumed by the
//! invariant enforcer and the template builder. All fields default so a
//! partially populated JSON object still deserializes.

use super::{SqlTier, StorageRedundancy};
use serde::{Deserialize, Serialize};

/// The feature set a requester asked for.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RequirementFlags {
    /// Primary region identifier (e.g. "japaneast").
    pub region: String,
    /// Site-to-site VPN to on-premises requested.
    pub vpn: bool,
    /// Web Application Firewall (Application Gateway) requested.
    pub waf: bool,
    /// Azure Firewall in the hub requested.
    pub firewall: bool,
    /// Bastion host requested.
    pub bastion: bool,
    /// ExpressRoute readiness requested.
    pub express_route_ready: bool,
    /// App Service plan SKU, when specified.
    pub app_service_sku: Option<String>,
    /// App Service instance count, when specified.
    pub app_instances: Option<u32>,
    /// Storage redundancy, when specified.
    pub storage_redundancy: Option<StorageRedundancy>,
    /// SQL service tier, when specified.
    pub sql_tier: Option<SqlTier>,
    /// Private endpoint requested for SQL.
    pub private_endpoint_sql: bool,
    /// Private endpoint requested for Storage.
    pub private_endpoint_storage: bool,
    /// Private endpoint requested for Key Vault.
    pub private_endpoint_key_vault: bool,
    /// Secondary region for disaster recovery, when requested.
    pub dr_region: Option<String>,
    /// Traffic Manager fronting both regions requested.
    pub traffic_manager: bool,
}

impl RequirementFlags {
    /// True when any private endpoint target is requested.
    pub fn any_private_endpoint(&self) -> bool {
        self.private_endpoint_sql || self.private_endpoint_storage || self.private_endpoint_key_vault
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_deserializes() {
        let flags: RequirementFlags =
            serde_json::from_str(r#"{"region":"japaneast","vpn":true,"waf":true}"#)
                .expect("partial flags JSON should deserialize");
        assert_eq!(flags.region, "japaneast");
        assert!(flags.vpn && flags.waf);
        assert!(!flags.firewall, "unset flags default to false");
        assert!(flags.dr_region.is_none());
    }

    #[test]
    fn test_any_private_endpoint() {
        let mut flags = RequirementFlags::default();
        assert!(!flags.any_private_endpoint());
        flags.private_endpoint_storage = true;
        assert!(flags.any_private_endpoint());
    }

    #[test]
    fn test_enum_spellings() {
        let flags: RequirementFlags =
            serde_json::from_str(r#"{"storage_redundancy":"GZRS","sql_tier":"BC"}"#).unwrap();
        assert_eq!(flags.storage_redundancy, Some(StorageRedundancy::Gzrs));
        assert_eq!(flags.sql_tier, Some(SqlTier::BusinessCritical));
    }
}
