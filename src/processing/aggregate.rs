//! Topology aggregation.
//!
//! Reconciles the three legacy input layouts (flat vnet list, hub/spoke
//! lists, single-hub field) into the one canonical store, sanitizing
//! every id, remapping every cross-reference through the old-id to
//! new-id tables, normalizing free-form resource types, and dropping
//! first-seen duplicates. Runs exactly once per pipeline pass.

use crate::config;
use crate::models::{
    Ipv4, Model, Peering, RawModel, RawResource, RawSubnet, RawVnet, Resource, ResourceKind,
    ResourceType, SqlTier, StorageRedundancy, Subnet, SubnetPurpose, Vnet, VnetKind,
};
use crate::processing::classify::normalize_type;
use crate::processing::sanitize::SanitizeSession;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// Aggregate a raw model into the canonical shape.
///
/// Never fails: pathological input (no VNets at all) yields a synthesized
/// default hub so downstream stages always have one.
pub fn aggregate(raw: RawModel, session: &mut SanitizeSession) -> Model {
    let mut model = Model {
        region: raw.region.clone().unwrap_or_default(),
        ..Default::default()
    };

    // old-id -> new-id tables for reference rewriting
    let mut vnet_map: HashMap<String, String> = HashMap::new();
    let mut subnet_map: HashMap<String, String> = HashMap::new();
    let mut used_vnet_ids: HashSet<String> = HashSet::new();

    for (raw_vnet, kind) in collect_vnets(raw.vnets, raw.hubs, raw.hub, raw.spokes) {
        let vnet = build_vnet(
            raw_vnet,
            kind,
            session,
            &mut vnet_map,
            &mut subnet_map,
            &mut used_vnet_ids,
        );
        model.vnets.push(vnet);
    }

    // Peerings: rewrite both references; unresolved ones are sanitized
    // verbatim and kept, an invalid peering is not in itself fatal.
    for raw_peering in raw.peerings {
        let from_vnet = remap(raw_peering.from_vnet.as_deref(), &vnet_map, session);
        let to_vnet = remap(raw_peering.to_vnet.as_deref(), &vnet_map, session);
        model.peerings.push(Peering {
            from_vnet,
            to_vnet,
            allow_vnet_access: raw_peering.allow_vnet_access,
            allow_forwarded_traffic: raw_peering.allow_forwarded_traffic,
            gateway_transit: raw_peering.gateway_transit,
        });
    }

    // Resources: normalize types, sanitize ids, rewrite subnet and
    // vnet-link references, then drop first-seen (type, label) duplicates.
    let mut used_resource_ids: HashSet<String> = HashSet::new();
    let resources: Vec<Resource> = raw
        .resources
        .into_iter()
        .map(|raw_resource| {
            build_resource(
                raw_resource,
                session,
                &vnet_map,
                &subnet_map,
                &mut used_resource_ids,
            )
        })
        .collect();
    let before = resources.len();
    model.resources = resources
        .into_iter()
        .unique_by(|r| (r.kind.resource_type(), r.label.clone()))
        .collect();
    if model.resources.len() < before {
        log::info!(
            "dropped {} duplicate resource(s) (first-seen wins)",
            before - model.resources.len()
        );
    }

    // Upstream edges are hints at best; ground truth is rebuilt by the
    // wiring engine from resource presence.
    if !raw.edges.is_empty() {
        model.push_warn(&format!(
            "discarded {} unverified input edge(s); relationships are derived from resource presence",
            raw.edges.len()
        ));
    }

    if model.hub().is_none() {
        model.vnets.insert(
            0,
            Vnet {
                id: config::DEFAULT_HUB_ID.to_string(),
                label: "Hub".to_string(),
                cidr: Ipv4::new(config::DEFAULT_HUB_CIDR).ok(),
                kind: VnetKind::Hub,
                subnets: vec![],
            },
        );
        model.push_fix(&format!(
            "synthesized default hub '{}' ({})",
            config::DEFAULT_HUB_ID,
            config::DEFAULT_HUB_CIDR
        ));
    }

    log::info!(
        "aggregated {} vnet(s) ({} hub(s)), {} peering(s), {} resource(s)",
        model.vnets.len(),
        model.hubs().count(),
        model.peerings.len(),
        model.resources.len()
    );

    model
}

/// Flatten the three input layouts into one ordered sequence with kind
/// tags. Precedence: flat list, then hub/spoke lists, then legacy fields.
fn collect_vnets(
    flat: Vec<RawVnet>,
    hubs: Vec<RawVnet>,
    legacy_hub: Option<RawVnet>,
    spokes: Vec<RawVnet>,
) -> Vec<(RawVnet, VnetKind)> {
    if !flat.is_empty() {
        return flat
            .into_iter()
            .map(|v| {
                let kind = match v.kind.as_deref().map(str::trim) {
                    Some(k) if k.eq_ignore_ascii_case("hub") => VnetKind::Hub,
                    _ => VnetKind::Spoke,
                };
                (v, kind)
            })
            .collect();
    }

    let mut collected: Vec<(RawVnet, VnetKind)> = Vec::new();
    if !hubs.is_empty() {
        collected.extend(hubs.into_iter().map(|v| (v, VnetKind::Hub)));
    } else if let Some(hub) = legacy_hub {
        collected.push((hub, VnetKind::Hub));
    }
    collected.extend(spokes.into_iter().map(|v| (v, VnetKind::Spoke)));
    collected
}

fn build_vnet(
    raw: RawVnet,
    kind: VnetKind,
    session: &mut SanitizeSession,
    vnet_map: &mut HashMap<String, String>,
    subnet_map: &mut HashMap<String, String>,
    used_vnet_ids: &mut HashSet<String>,
) -> Vnet {
    let mut id = session.sanitize(raw.id.as_deref());
    while !used_vnet_ids.insert(id.clone()) {
        id = session.next_generated();
    }
    if let Some(old) = raw.id {
        vnet_map.entry(old).or_insert_with(|| id.clone());
    }

    let cidr = parse_cidr(raw.cidr.as_deref(), &id);
    let label = raw.label.unwrap_or_else(|| id.clone());

    let mut subnets: Vec<Subnet> = Vec::new();
    for raw_subnet in raw.subnets {
        let subnet = build_subnet(raw_subnet, session, subnet_map, &subnets);
        if let (Some(vnet_cidr), Some(subnet_cidr)) = (cidr, subnet.cidr) {
            if !vnet_cidr.contains(&subnet_cidr) {
                log::warn!(
                    "subnet '{}' ({subnet_cidr}) is not inside vnet '{id}' ({vnet_cidr})",
                    subnet.id
                );
            }
        }
        subnets.push(subnet);
    }

    Vnet {
        id,
        label,
        cidr,
        kind,
        subnets,
    }
}

fn build_subnet(
    raw: RawSubnet,
    session: &mut SanitizeSession,
    subnet_map: &mut HashMap<String, String>,
    siblings: &[Subnet],
) -> Subnet {
    let mut id = session.sanitize(raw.id.as_deref());
    while siblings.iter().any(|s| s.id == id) {
        id = session.next_generated();
    }
    if let Some(old) = raw.id {
        // first writer wins when two vnets reuse a subnet id
        subnet_map.entry(old).or_insert_with(|| id.clone());
    }

    let purpose = SubnetPurpose::from_reserved_id(&id)
        .unwrap_or_else(|| SubnetPurpose::parse(raw.purpose.as_deref().unwrap_or("")));

    Subnet {
        cidr: parse_cidr(raw.cidr.as_deref(), &id),
        id,
        purpose,
        nsg_id: raw.nsg_id,
        route_table_id: raw.route_table_id,
    }
}

fn build_resource(
    raw: RawResource,
    session: &mut SanitizeSession,
    vnet_map: &HashMap<String, String>,
    subnet_map: &HashMap<String, String>,
    used_ids: &mut HashSet<String>,
) -> Resource {
    let rtype = normalize_type(raw.type_label.as_deref().unwrap_or(""));
    let mut id = session.sanitize(raw.id.as_deref());
    while !used_ids.insert(id.clone()) {
        id = session.next_generated();
    }

    let subnet_id = raw
        .subnet_id
        .as_deref()
        .map(|old| remap(Some(old), subnet_map, session));

    let kind = match rtype {
        ResourceType::ApplicationGateway => ResourceKind::ApplicationGateway { subnet_id },
        ResourceType::AzureFirewall => ResourceKind::AzureFirewall { subnet_id },
        ResourceType::VpnGateway => ResourceKind::VpnGateway { subnet_id },
        ResourceType::ExpressRouteGateway => ResourceKind::ExpressRouteGateway { subnet_id },
        ResourceType::Bastion => ResourceKind::Bastion { subnet_id },
        ResourceType::AppService => ResourceKind::AppService {
            sku: raw.sku,
            instances: raw.instances,
        },
        ResourceType::SqlDb => ResourceKind::SqlDb {
            tier: parse_sql_tier(raw.tier.as_deref()),
            zone_redundant: raw.zone_redundant.unwrap_or(false),
        },
        ResourceType::Storage => ResourceKind::Storage {
            redundancy: parse_redundancy(raw.redundancy.as_deref()),
        },
        ResourceType::KeyVault => ResourceKind::KeyVault,
        ResourceType::PrivateEndpoint => ResourceKind::PrivateEndpoint {
            subnet_id,
            target_type: raw.target_type.unwrap_or_default(),
            target_id: raw.target_id.unwrap_or_default(),
        },
        ResourceType::PrivateDnsZone => ResourceKind::PrivateDnsZone {
            zone_name: raw
                .zone_name
                .or_else(|| raw.label.clone())
                .unwrap_or_else(|| id.clone()),
            vnet_links: raw
                .vnet_links
                .iter()
                .map(|link| remap(Some(link), vnet_map, session))
                .collect(),
        },
        ResourceType::NetworkSecurityGroup => ResourceKind::NetworkSecurityGroup,
        ResourceType::RouteTable => ResourceKind::RouteTable { routes: raw.routes },
        ResourceType::PublicIp => ResourceKind::PublicIp {
            sku: raw.sku.unwrap_or_else(|| "Standard".to_string()),
            allocation: raw.allocation.unwrap_or_else(|| "Static".to_string()),
        },
        ResourceType::TrafficManager => ResourceKind::TrafficManager,
    };

    Resource {
        id,
        label: raw.label,
        kind,
    }
}

/// Rewrite a reference through a remap table; unresolved references are
/// sanitized verbatim, not dropped.
fn remap(
    old: Option<&str>,
    map: &HashMap<String, String>,
    session: &mut SanitizeSession,
) -> String {
    match old.and_then(|o| map.get(o)) {
        Some(new) => new.clone(),
        None => session.sanitize(old),
    }
}

fn parse_cidr(cidr: Option<&str>, owner: &str) -> Option<Ipv4> {
    let cidr = cidr?;
    match Ipv4::new(cidr) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("ignoring malformed CIDR '{cidr}' on '{owner}': {e}");
            None
        }
    }
}

fn parse_sql_tier(tier: Option<&str>) -> SqlTier {
    match tier {
        Some(t) if t.to_lowercase().contains("bc") || t.to_lowercase().contains("business") => {
            SqlTier::BusinessCritical
        }
        _ => SqlTier::GeneralPurpose,
    }
}

fn parse_redundancy(redundancy: Option<&str>) -> StorageRedundancy {
    match redundancy.map(str::to_lowercase).as_deref() {
        Some(r) if r.contains("gzrs") => StorageRedundancy::Gzrs,
        Some(r) if r.contains("zrs") => StorageRedundancy::Zrs,
        _ => StorageRedundancy::Lrs,
    }
}
