//! Resource type normalization.
//!
//! Maps free-form resource type labels ("WAF v2", "Azure SQL Database",
//! "storage account") onto the closed set of canonical types. This is a
//! best-effort classifier, not a validator: patterns are evaluated in a
//! fixed priority order, first match wins, and anything unrecognized
//! falls through to `AppService`.

use crate::models::ResourceType;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Ordered pattern table. Order matters: "waf" must match before
    /// "firewall", and "express route" before "route".
    static ref TYPE_PATTERNS: Vec<(Regex, ResourceType)> = vec![
        (re(r"waf|app(lication)?[ _-]?gateway|appgw"), ResourceType::ApplicationGateway),
        (re(r"firewall"), ResourceType::AzureFirewall),
        (re(r"vpn"), ResourceType::VpnGateway),
        (re(r"express[ _-]?route"), ResourceType::ExpressRouteGateway),
        (re(r"bastion"), ResourceType::Bastion),
        (re(r"private[ _-]?endpoint"), ResourceType::PrivateEndpoint),
        (re(r"dns"), ResourceType::PrivateDnsZone),
        (re(r"sql|database"), ResourceType::SqlDb),
        (re(r"storage|blob"), ResourceType::Storage),
        (re(r"key[ _-]?vault|vault"), ResourceType::KeyVault),
        (re(r"nsg|security[ _-]?group"), ResourceType::NetworkSecurityGroup),
        (re(r"route|udr"), ResourceType::RouteTable),
        (re(r"public[ _-]?ip|pip"), ResourceType::PublicIp),
        (re(r"traffic"), ResourceType::TrafficManager),
    ];

    static ref FALLBACK: ResourceType = ResourceType::AppService;
}

fn re(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("Invalid type pattern?")
}

/// Resolve a private endpoint's declared target-type keyword to the
/// canonical type it points at. Unrecognized keywords resolve to nothing;
/// the endpoint is then skipped during wiring.
pub fn endpoint_target_type(target_type: &str) -> Option<ResourceType> {
    let lowered = target_type.to_lowercase();
    if lowered.contains("sql") {
        Some(ResourceType::SqlDb)
    } else if lowered.contains("storage") || lowered.contains("blob") {
        Some(ResourceType::Storage)
    } else if lowered.contains("key") || lowered.contains("vault") {
        Some(ResourceType::KeyVault)
    } else {
        None
    }
}

/// Classify a free-form resource type label.
pub fn normalize_type(label: &str) -> ResourceType {
    for (pattern, rtype) in TYPE_PATTERNS.iter() {
        if pattern.is_match(label) {
            return *rtype;
        }
    }
    log::debug!("unrecognized resource type '{label}', defaulting to AppService");
    *FALLBACK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_labels() {
        assert_eq!(normalize_type("WAF v2"), ResourceType::ApplicationGateway);
        assert_eq!(normalize_type("app gateway"), ResourceType::ApplicationGateway);
        assert_eq!(normalize_type("Azure Firewall Premium"), ResourceType::AzureFirewall);
        assert_eq!(normalize_type("VPN gateway"), ResourceType::VpnGateway);
        assert_eq!(normalize_type("ExpressRoute circuit"), ResourceType::ExpressRouteGateway);
        assert_eq!(normalize_type("Azure SQL Database"), ResourceType::SqlDb);
        assert_eq!(normalize_type("storage account"), ResourceType::Storage);
        assert_eq!(normalize_type("key vault"), ResourceType::KeyVault);
        assert_eq!(normalize_type("private endpoint"), ResourceType::PrivateEndpoint);
        assert_eq!(normalize_type("private DNS zone"), ResourceType::PrivateDnsZone);
        assert_eq!(normalize_type("NSG"), ResourceType::NetworkSecurityGroup);
        assert_eq!(normalize_type("UDR"), ResourceType::RouteTable);
        assert_eq!(normalize_type("public IP"), ResourceType::PublicIp);
        assert_eq!(normalize_type("Traffic Manager"), ResourceType::TrafficManager);
    }

    #[test]
    fn test_priority_order() {
        // "waf" wins over the "firewall" it contains semantically
        assert_eq!(
            normalize_type("web application firewall (WAF)"),
            ResourceType::ApplicationGateway
        );
        // express route wins over plain route
        assert_eq!(
            normalize_type("express route gateway"),
            ResourceType::ExpressRouteGateway
        );
        // private endpoint wins over the sql/storage keywords in the label
        assert_eq!(
            normalize_type("private endpoint for sql"),
            ResourceType::PrivateEndpoint
        );
    }

    #[test]
    fn test_default_absorbs_unrecognized_input() {
        assert_eq!(normalize_type("web app"), ResourceType::AppService);
        assert_eq!(normalize_type(""), ResourceType::AppService);
        assert_eq!(normalize_type("???"), ResourceType::AppService);
    }

    #[test]
    fn test_endpoint_target_resolution() {
        assert_eq!(endpoint_target_type("sql"), Some(ResourceType::SqlDb));
        assert_eq!(endpoint_target_type("Blob Storage"), Some(ResourceType::Storage));
        assert_eq!(endpoint_target_type("keyVault"), Some(ResourceType::KeyVault));
        assert_eq!(endpoint_target_type("cosmos"), None);
        assert_eq!(endpoint_target_type(""), None);
    }

    #[test]
    fn test_canonical_names_are_fixed_points() {
        let all = [
            ResourceType::ApplicationGateway,
            ResourceType::AzureFirewall,
            ResourceType::VpnGateway,
            ResourceType::ExpressRouteGateway,
            ResourceType::Bastion,
            ResourceType::AppService,
            ResourceType::SqlDb,
            ResourceType::Storage,
            ResourceType::KeyVault,
            ResourceType::PrivateEndpoint,
            ResourceType::PrivateDnsZone,
            ResourceType::NetworkSecurityGroup,
            ResourceType::RouteTable,
            ResourceType::PublicIp,
            ResourceType::TrafficManager,
        ];
        for rtype in all {
            assert_eq!(
                normalize_type(&rtype.to_string()),
                rtype,
                "canonical name '{rtype}' must classify to itself"
            );
        }
    }
}
