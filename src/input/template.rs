//! Local template fallback.
//!
//! When no externally synthesized model is available (LLM failure or
//! offline use), the pipeline runs against this locally constructed raw
//! model instead, with identical guarantees. The template carries the
//! headline resources the flags request; the enforcer only ever adds
//! their structural prerequisites.

use crate::config;
use crate::models::{
    RawModel, RawPeering, RawResource, RawSubnet, RawVnet, RequirementFlags, SqlTier,
    StorageRedundancy,
};

fn vnet(id: &str, label: &str, cidr: &str, kind: &str, subnets: Vec<RawSubnet>) -> RawVnet {
    RawVnet {
        id: Some(id.to_string()),
        label: Some(label.to_string()),
        cidr: Some(cidr.to_string()),
        kind: Some(kind.to_string()),
        subnets,
    }
}

fn subnet(id: &str, cidr: &str, purpose: &str) -> RawSubnet {
    RawSubnet {
        id: Some(id.to_string()),
        cidr: Some(cidr.to_string()),
        purpose: Some(purpose.to_string()),
        nsg_id: None,
        route_table_id: None,
    }
}

fn resource(id: &str, type_label: &str, label: &str) -> RawResource {
    RawResource {
        id: Some(id.to_string()),
        type_label: Some(type_label.to_string()),
        label: Some(label.to_string()),
        ..Default::default()
    }
}

/// Build the fallback raw model for the requested feature set.
pub fn template_model(flags: &RequirementFlags) -> RawModel {
    let hub = vnet("hub", "Hub", config::DEFAULT_HUB_CIDR, "hub", vec![]);
    let spoke = vnet(
        "spoke1",
        "Workload spoke",
        "10.1.0.0/16",
        "spoke",
        vec![
            subnet("app", "10.1.1.0/24", "app"),
            subnet("data", "10.1.2.0/24", "data"),
        ],
    );

    let mut resources = vec![
        RawResource {
            sku: flags.app_service_sku.clone(),
            instances: flags.app_instances,
            ..resource("app", "AppService", "Web app")
        },
        RawResource {
            tier: Some(tier_label(flags.sql_tier)),
            zone_redundant: Some(flags.sql_tier == Some(SqlTier::BusinessCritical)),
            ..resource("sqldb", "SqlDb", "SQL database")
        },
        RawResource {
            redundancy: Some(redundancy_label(flags.storage_redundancy)),
            ..resource("storage", "Storage", "Storage account")
        },
        resource("kv", "KeyVault", "Key vault"),
    ];

    if flags.waf {
        resources.push(RawResource {
            subnet_id: Some(config::APPGW_SUBNET.to_string()),
            ..resource("agw", "ApplicationGateway", "App Gateway (WAF)")
        });
    }
    if flags.firewall {
        resources.push(RawResource {
            subnet_id: Some(config::FIREWALL_SUBNET.to_string()),
            ..resource("fw", "AzureFirewall", "Azure Firewall")
        });
    }
    if flags.vpn {
        resources.push(RawResource {
            subnet_id: Some(config::GATEWAY_SUBNET.to_string()),
            ..resource("vpngw", "VpnGateway", "VPN gateway")
        });
    }
    if flags.express_route_ready {
        resources.push(RawResource {
            subnet_id: Some(config::GATEWAY_SUBNET.to_string()),
            ..resource("ergw", "ExpressRouteGateway", "ExpressRoute gateway")
        });
    }
    if flags.bastion {
        resources.push(RawResource {
            subnet_id: Some(config::BASTION_SUBNET.to_string()),
            ..resource("bastion", "Bastion", "Bastion host")
        });
    }

    let endpoints: [(bool, &str, &str, &str); 3] = [
        (flags.private_endpoint_sql, "pe_sql", "sql", "sqldb"),
        (flags.private_endpoint_storage, "pe_storage", "storage", "storage"),
        (flags.private_endpoint_key_vault, "pe_kv", "keyVault", "kv"),
    ];
    for (wanted, id, target_type, target_id) in endpoints {
        if wanted {
            resources.push(RawResource {
                subnet_id: Some("data".to_string()),
                target_type: Some(target_type.to_string()),
                target_id: Some(target_id.to_string()),
                ..resource(id, "PrivateEndpoint", &format!("Private endpoint ({target_type})"))
            });
        }
    }

    RawModel {
        region: Some(flags.region.clone()),
        vnets: vec![],
        hubs: vec![],
        hub: Some(hub),
        spokes: vec![spoke],
        peerings: vec![
            RawPeering {
                from_vnet: Some("hub".to_string()),
                to_vnet: Some("spoke1".to_string()),
                allow_vnet_access: true,
                allow_forwarded_traffic: true,
                gateway_transit: true,
            },
            RawPeering {
                from_vnet: Some("spoke1".to_string()),
                to_vnet: Some("hub".to_string()),
                allow_vnet_access: true,
                allow_forwarded_traffic: true,
                gateway_transit: true,
            },
        ],
        resources,
        edges: vec![],
    }
}

fn tier_label(tier: Option<SqlTier>) -> String {
    match tier {
        Some(SqlTier::BusinessCritical) => "BC".to_string(),
        _ => "GP".to_string(),
    }
}

fn redundancy_label(redundancy: Option<StorageRedundancy>) -> String {
    match redundancy {
        Some(StorageRedundancy::Gzrs) => "GZRS".to_string(),
        Some(StorageRedundancy::Zrs) => "ZRS".to_string(),
        _ => "LRS".to_string(),
    }
}
