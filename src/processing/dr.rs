//! Disaster-recovery cloning.
//!
//! Duplicates the primary hub and first spoke into a secondary region:
//! cloned VNets get suffixed ids and address space shifted by a fixed
//! octet increment; an allow-list of resource kinds is cloned alongside,
//! with private endpoint targets retargeted through the remap table
//! built during cloning. Subnet ids are kept verbatim inside clones so
//! the reserved names (GatewaySubnet, AppGatewaySubnet, ...) stay valid.

use crate::config;
use crate::models::{
    Edge, EdgeKind, Model, Peering, RequirementFlags, Resource, ResourceKind, ResourceType, Vnet,
};
use std::collections::HashMap;

/// Resource kinds eligible for cross-region duplication.
const CLONEABLE: [ResourceType; 9] = [
    ResourceType::ApplicationGateway,
    ResourceType::AzureFirewall,
    ResourceType::VpnGateway,
    ResourceType::Bastion,
    ResourceType::AppService,
    ResourceType::SqlDb,
    ResourceType::Storage,
    ResourceType::KeyVault,
    ResourceType::PrivateEndpoint,
];

/// Clone the primary topology into the requested DR region.
/// No-op when no DR region is requested or the clone already exists.
pub fn clone_for_dr(model: &mut Model, flags: &RequirementFlags) {
    let Some(dr_region) = flags.dr_region.as_deref() else {
        return;
    };

    let Some(hub) = model.hub().cloned() else {
        return;
    };
    let hub_clone_id = format!("{}{}", hub.id, config::DR_SUFFIX);
    if model.vnets.iter().any(|v| v.id == hub_clone_id) {
        log::debug!("DR clone '{hub_clone_id}' already present, skipping");
        return;
    }

    model.vnets.push(clone_vnet(&hub));
    let spoke = model.spokes().next().cloned();
    if let Some(spoke) = &spoke {
        let spoke_clone = clone_vnet(spoke);
        model.peerings.push(Peering::hub_to_spoke(&hub_clone_id, &spoke_clone.id));
        model.peerings.push(Peering::spoke_to_hub(&spoke_clone.id, &hub_clone_id));
        model.vnets.push(spoke_clone);
    }

    // Clone eligible resources, building the old-id -> clone-id table,
    // then retarget cloned private endpoints through it.
    let mut remap: HashMap<String, String> = HashMap::new();
    let mut clones: Vec<Resource> = Vec::new();
    for resource in &model.resources {
        if !CLONEABLE.contains(&resource.kind.resource_type()) {
            continue;
        }
        let clone_id = format!("{}{}", resource.id, config::DR_SUFFIX);
        remap.insert(resource.id.clone(), clone_id.clone());
        clones.push(Resource {
            id: clone_id,
            label: resource.label.as_ref().map(|l| format!("{l} (DR)")),
            kind: resource.kind.clone(),
        });
    }
    for clone in &mut clones {
        if let ResourceKind::PrivateEndpoint { target_id, .. } = &mut clone.kind {
            if let Some(cloned_target) = remap.get(target_id) {
                *target_id = cloned_target.clone();
            }
        }
    }
    let cloned_count = clones.len();
    model.resources.extend(clones);

    model.push_fix(&format!(
        "cloned hub '{}'{} and {cloned_count} resource(s) into DR region '{dr_region}'",
        hub.id,
        spoke
            .as_ref()
            .map(|s| format!(" and spoke '{}'", s.id))
            .unwrap_or_default()
    ));

    if flags.traffic_manager && !model.has_type(ResourceType::TrafficManager) {
        model.resources.push(Resource::new(
            config::TRAFFIC_MANAGER_ID,
            Some("Traffic Manager"),
            ResourceKind::TrafficManager,
        ));
        model.push_fix("added Traffic Manager profile for multi-region entry");
    }
}

/// Wire the Traffic Manager to the cloned entry point. Runs after the
/// main wiring pass, which only sees the primary entry point.
pub fn wire_dr_entry_points(model: &mut Model) {
    let Some(tm) = model.first_of_type(ResourceType::TrafficManager).map(|r| r.id.clone()) else {
        return;
    };
    let dr_entry = first_dr_of_type(model, ResourceType::ApplicationGateway)
        .or_else(|| first_dr_of_type(model, ResourceType::AppService));
    let Some(dr_entry) = dr_entry else {
        return;
    };
    let already = model
        .edges
        .iter()
        .any(|e| e.from == tm && e.to == dr_entry);
    if !already {
        model.edges.push(Edge::new(&tm, &dr_entry, EdgeKind::L7));
    }
}

fn first_dr_of_type(model: &Model, rtype: ResourceType) -> Option<String> {
    model
        .resources_of_type(rtype)
        .find(|r| r.id.ends_with(config::DR_SUFFIX))
        .map(|r| r.id.clone())
}

fn clone_vnet(vnet: &Vnet) -> Vnet {
    let mut clone = vnet.clone();
    clone.id = format!("{}{}", vnet.id, config::DR_SUFFIX);
    clone.label = format!("{} (DR)", vnet.label);
    clone.cidr = vnet.cidr.map(|c| c.shift_octet2(config::DR_OCTET_SHIFT));
    for subnet in &mut clone.subnets {
        subnet.cidr = subnet.cidr.map(|c| c.shift_octet2_and_3(config::DR_OCTET_SHIFT));
    }
    clone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4, Subnet, SubnetPurpose, VnetKind};

    fn model_with_stack() -> Model {
        Model {
            region: "japaneast".to_string(),
            vnets: vec![
                Vnet {
                    id: "hub".to_string(),
                    label: "Hub".to_string(),
                    cidr: Ipv4::new("10.0.0.0/16").ok(),
                    kind: VnetKind::Hub,
                    subnets: vec![Subnet::new(
                        "GatewaySubnet",
                        Ipv4::new("10.0.0.32/27").unwrap(),
                        SubnetPurpose::Gateway,
                    )],
                },
                Vnet {
                    id: "spoke1".to_string(),
                    label: "Spoke".to_string(),
                    cidr: Ipv4::new("10.1.0.0/16").ok(),
                    kind: VnetKind::Spoke,
                    subnets: vec![Subnet::new(
                        "app",
                        Ipv4::new("10.1.1.0/24").unwrap(),
                        SubnetPurpose::App,
                    )],
                },
            ],
            resources: vec![
                Resource::new(
                    "app",
                    Some("web app"),
                    ResourceKind::AppService {
                        sku: None,
                        instances: None,
                    },
                ),
                Resource::new(
                    "sqldb",
                    Some("orders"),
                    ResourceKind::SqlDb {
                        tier: Default::default(),
                        zone_redundant: false,
                    },
                ),
                Resource::new(
                    "pe_sql",
                    Some("sql endpoint"),
                    ResourceKind::PrivateEndpoint {
                        subnet_id: Some("data".to_string()),
                        target_type: "sql".to_string(),
                        target_id: "sqldb".to_string(),
                    },
                ),
                Resource::new(
                    "zone",
                    None,
                    ResourceKind::PrivateDnsZone {
                        zone_name: config::DNS_ZONE_SQL.to_string(),
                        vnet_links: vec![],
                    },
                ),
            ],
            ..Default::default()
        }
    }

    fn dr_flags() -> RequirementFlags {
        RequirementFlags {
            dr_region: Some("japanwest".to_string()),
            traffic_manager: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_clone_shifts_address_space() {
        let mut model = model_with_stack();
        clone_for_dr(&mut model, &dr_flags());

        let hub_dr = model.vnets.iter().find(|v| v.id == "hub_dr").expect("hub clone");
        assert_eq!(hub_dr.cidr, Ipv4::new("10.100.0.0/16").ok());
        assert_eq!(hub_dr.kind, VnetKind::Hub);
        let gw = hub_dr.subnet("GatewaySubnet").expect("reserved id kept");
        assert_eq!(gw.cidr, Ipv4::new("10.100.100.32/27").ok());

        let spoke_dr = model.vnets.iter().find(|v| v.id == "spoke1_dr").expect("spoke clone");
        assert_eq!(spoke_dr.cidr, Ipv4::new("10.101.0.0/16").ok());
    }

    #[test]
    fn test_clone_retargets_private_endpoints() {
        let mut model = model_with_stack();
        clone_for_dr(&mut model, &dr_flags());

        let pe_dr = model.resource("pe_sql_dr").expect("endpoint clone");
        match &pe_dr.kind {
            ResourceKind::PrivateEndpoint { target_id, .. } => {
                assert_eq!(target_id, "sqldb_dr", "clone must point at the cloned target");
            }
            other => panic!("expected private endpoint, got {other:?}"),
        }
        assert!(
            model.resource("zone_dr").is_none(),
            "DNS zones are not in the clone allow-list"
        );
    }

    #[test]
    fn test_clone_is_guarded_against_reruns() {
        let mut model = model_with_stack();
        clone_for_dr(&mut model, &dr_flags());
        let snapshot = model.clone();
        clone_for_dr(&mut model, &dr_flags());
        assert_eq!(model, snapshot, "second clone pass must be a no-op");
    }

    #[test]
    fn test_no_dr_region_is_noop() {
        let mut model = model_with_stack();
        let before = model.clone();
        clone_for_dr(&mut model, &RequirementFlags::default());
        assert_eq!(model, before);
    }

    #[test]
    fn test_traffic_manager_wired_to_both_entries() {
        let mut model = model_with_stack();
        clone_for_dr(&mut model, &dr_flags());
        assert!(model.has_type(ResourceType::TrafficManager));

        crate::processing::wiring::rewire(&mut model);
        wire_dr_entry_points(&mut model);

        let tm = config::TRAFFIC_MANAGER_ID;
        assert!(model.edges.iter().any(|e| e.from == tm && e.to == "app"));
        assert!(model.edges.iter().any(|e| e.from == tm && e.to == "app_dr"));
    }

    #[test]
    fn test_cloned_peerings_added() {
        let mut model = model_with_stack();
        clone_for_dr(&mut model, &dr_flags());
        assert!(model
            .peerings
            .iter()
            .any(|p| p.from_vnet == "hub_dr" && p.to_vnet == "spoke1_dr"));
        assert!(model
            .peerings
            .iter()
            .any(|p| p.from_vnet == "spoke1_dr" && p.to_vnet == "hub_dr"));
    }
}
