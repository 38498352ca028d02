//! Invariant enforcement.
//!
//! Inspects the aggregated model against the requested feature set and
//! inserts the structurally required companion pieces that are missing:
//! reserved subnets, private DNS zones, spoke route tables, the public
//! IP fronting an Application Gateway. Additions are recorded as `fix:`
//! notes; residual manual-review obligations are `warn:` notes and are
//! re-emitted on every pass. Headline resources the requester asked for
//! (VpnGateway, AzureFirewall, Bastion, ApplicationGateway) are warned
//! about when absent but never fabricated here; the template layer owns
//! them.

use crate::config;
use crate::models::{
    Ipv4, Model, RequirementFlags, Resource, ResourceKind, ResourceType, Route, Subnet,
    SubnetPurpose,
};
use crate::processing::classify::endpoint_target_type;
use lazy_static::lazy_static;

lazy_static! {
    static ref GATEWAY_CIDR: Ipv4 =
        Ipv4::new(config::GATEWAY_SUBNET_CIDR).expect("Invalid fixed CIDR?");
    static ref FIREWALL_CIDR: Ipv4 =
        Ipv4::new(config::FIREWALL_SUBNET_CIDR).expect("Invalid fixed CIDR?");
    static ref BASTION_CIDR: Ipv4 =
        Ipv4::new(config::BASTION_SUBNET_CIDR).expect("Invalid fixed CIDR?");
    static ref APPGW_CIDR: Ipv4 =
        Ipv4::new(config::APPGW_SUBNET_CIDR).expect("Invalid fixed CIDR?");
}

/// Audit trail of one enforcement pass.
#[derive(Debug, Default, PartialEq)]
pub struct EnforceOutcome {
    pub fixes: Vec<String>,
    pub warnings: Vec<String>,
}

/// Enforce every requested-feature invariant, mutating the model in
/// place. Idempotent: a second pass over the resulting model yields zero
/// fixes and the same warning set.
pub fn enforce(model: &mut Model, flags: &RequirementFlags) -> EnforceOutcome {
    let mut out = EnforceOutcome::default();

    if flags.vpn {
        ensure_hub_subnet(model, config::GATEWAY_SUBNET, *GATEWAY_CIDR, &mut out);
        warn_missing_headline(model, ResourceType::VpnGateway, "vpn", &mut out);
    }

    if flags.firewall {
        ensure_hub_subnet(model, config::FIREWALL_SUBNET, *FIREWALL_CIDR, &mut out);
        warn_missing_headline(model, ResourceType::AzureFirewall, "firewall", &mut out);
        ensure_spoke_route_tables(model, &mut out);
    }

    if flags.bastion {
        ensure_hub_subnet(model, config::BASTION_SUBNET, *BASTION_CIDR, &mut out);
        warn_missing_headline(model, ResourceType::Bastion, "bastion", &mut out);
    }

    if flags.waf {
        ensure_spoke_appgw_subnets(model, &mut out);
        warn_missing_headline(model, ResourceType::ApplicationGateway, "waf", &mut out);
    }

    ensure_private_dns_zones(model, flags, &mut out);
    ensure_appgw_public_ip(model, &mut out);

    for fix in &out.fixes {
        model.push_fix(fix);
    }
    for warning in &out.warnings {
        model.push_warn(warning);
    }

    out
}

/// Narrow edge-adjacent re-check run after DR cloning and wiring: a
/// cloned Application Gateway still needs its public IP, and a cloned
/// spoke still needs its forced route. Emits fixes only; the warnings
/// were already raised by the full pass.
pub fn enforce_edge_adjacent(model: &mut Model, flags: &RequirementFlags) -> EnforceOutcome {
    let mut out = EnforceOutcome::default();
    ensure_appgw_public_ip(model, &mut out);
    if flags.firewall {
        ensure_spoke_route_tables(model, &mut out);
    }
    out.warnings.clear();
    for fix in &out.fixes {
        model.push_fix(fix);
    }
    out
}

/// Every hub gets the reserved subnet at its fixed well-known CIDR.
fn ensure_hub_subnet(model: &mut Model, subnet_id: &str, cidr: Ipv4, out: &mut EnforceOutcome) {
    let purpose = SubnetPurpose::from_reserved_id(subnet_id).unwrap_or(SubnetPurpose::Infra);
    let mut added: Vec<String> = Vec::new();
    for hub in model.hubs_mut() {
        if !hub.has_subnet(subnet_id) {
            hub.subnets.push(Subnet::new(subnet_id, cidr, purpose));
            added.push(hub.id.clone());
        }
    }
    for hub_id in added {
        out.fixes
            .push(format!("added {subnet_id} ({cidr}) to hub '{hub_id}'"));
    }
}

fn warn_missing_headline(
    model: &Model,
    rtype: ResourceType,
    feature: &str,
    out: &mut EnforceOutcome,
) {
    if !model.has_type(rtype) {
        out.warnings.push(format!(
            "{feature} requested but no {rtype} resource present; expected from the template layer"
        ));
    }
}

/// Every spoke gets a dedicated Application Gateway subnet. The default
/// CIDR is flagged for review as long as it is in use.
fn ensure_spoke_appgw_subnets(model: &mut Model, out: &mut EnforceOutcome) {
    let mut added: Vec<String> = Vec::new();
    let mut default_in_use = false;
    for spoke in model.spokes_mut() {
        if !spoke.has_subnet(config::APPGW_SUBNET) {
            spoke
                .subnets
                .push(Subnet::new(config::APPGW_SUBNET, *APPGW_CIDR, SubnetPurpose::Agw));
            added.push(spoke.id.clone());
        }
        if spoke
            .subnet(config::APPGW_SUBNET)
            .and_then(|s| s.cidr)
            .map(|c| c == *APPGW_CIDR)
            .unwrap_or(false)
        {
            default_in_use = true;
        }
    }
    for spoke_id in added {
        out.fixes.push(format!(
            "added {} ({}) to spoke '{spoke_id}'",
            config::APPGW_SUBNET,
            *APPGW_CIDR
        ));
    }
    if default_in_use {
        out.warnings.push(format!(
            "{} uses the default CIDR {}; review against the spoke address plan",
            config::APPGW_SUBNET,
            *APPGW_CIDR
        ));
    }
}

/// Every spoke gets a route table forcing 0.0.0.0/0 through the hub
/// firewall, attached to its app and data subnets. The next-hop address
/// is a fixed placeholder and is always flagged.
fn ensure_spoke_route_tables(model: &mut Model, out: &mut EnforceOutcome) {
    let spoke_ids: Vec<String> = model.spokes().map(|v| v.id.clone()).collect();
    if spoke_ids.is_empty() {
        return;
    }

    for spoke_id in &spoke_ids {
        let rt_id = format!("{spoke_id}_udr");
        let mut changed = false;

        if model.resource(&rt_id).is_none() {
            model.resources.push(Resource::new(
                &rt_id,
                Some(&format!("Route table ({spoke_id})")),
                ResourceKind::RouteTable {
                    routes: vec![Route::default_via_appliance(config::FIREWALL_PLACEHOLDER_IP)],
                },
            ));
            changed = true;
        }

        if let Some(spoke) = model.vnets.iter_mut().find(|v| &v.id == spoke_id) {
            for subnet in spoke.subnets.iter_mut().filter(|s| {
                matches!(s.purpose, SubnetPurpose::App | SubnetPurpose::Data)
            }) {
                if subnet.route_table_id.as_deref() != Some(rt_id.as_str()) {
                    subnet.route_table_id = Some(rt_id.clone());
                    changed = true;
                }
            }
        }

        if changed {
            out.fixes.push(format!(
                "added route table '{rt_id}' (0.0.0.0/0 via VirtualAppliance) to spoke '{spoke_id}'"
            ));
        }
    }

    out.warnings.push(format!(
        "spoke default route next-hop {} is a placeholder; verify the firewall address",
        config::FIREWALL_PLACEHOLDER_IP
    ));
}

/// Ensure the well-known private DNS zone for every requested endpoint
/// target that actually has a target resource. A target with no matching
/// resource gets no scaffolding at all.
fn ensure_private_dns_zones(model: &mut Model, flags: &RequirementFlags, out: &mut EnforceOutcome) {
    let requested: [(bool, ResourceType, &str, &str, &str); 3] = [
        (
            flags.private_endpoint_sql,
            ResourceType::SqlDb,
            config::DNS_ZONE_SQL,
            "dns_sql",
            "sql",
        ),
        (
            flags.private_endpoint_storage,
            ResourceType::Storage,
            config::DNS_ZONE_STORAGE,
            "dns_storage",
            "storage",
        ),
        (
            flags.private_endpoint_key_vault,
            ResourceType::KeyVault,
            config::DNS_ZONE_KEY_VAULT,
            "dns_keyvault",
            "key vault",
        ),
    ];

    let mut any_satisfiable = false;
    for (wanted, target_type, zone_name, zone_id, feature) in requested {
        if !wanted || !model.has_type(target_type) {
            continue;
        }
        any_satisfiable = true;

        let zone_exists = model.resources.iter().any(|r| {
            matches!(&r.kind, ResourceKind::PrivateDnsZone { zone_name: existing, .. }
                if existing == zone_name)
        });
        if !zone_exists {
            model.resources.push(Resource::new(
                zone_id,
                Some(zone_name),
                ResourceKind::PrivateDnsZone {
                    zone_name: zone_name.to_string(),
                    vnet_links: vec![],
                },
            ));
            out.fixes
                .push(format!("added Private DNS zone '{zone_name}'"));
        }

        let endpoint_exists = model
            .resources_of_type(ResourceType::PrivateEndpoint)
            .any(|r| match &r.kind {
                ResourceKind::PrivateEndpoint { target_type: t, .. } => {
                    endpoint_target_type(t) == Some(target_type)
                }
                _ => false,
            });
        if !endpoint_exists {
            out.warnings.push(format!(
                "private endpoint for {feature} requested but no PrivateEndpoint resource present; expected from the template layer"
            ));
        }
    }

    if any_satisfiable {
        out.warnings.push(
            "private DNS zone VNet links are not managed here; configure links for each VNet separately"
                .to_string(),
        );
    }
}

/// Any Application Gateway needs exactly one Standard static public IP.
fn ensure_appgw_public_ip(model: &mut Model, out: &mut EnforceOutcome) {
    if !model.has_type(ResourceType::ApplicationGateway) {
        return;
    }
    if model.resource(config::APPGW_PUBLIC_IP_ID).is_some() {
        return;
    }
    model.resources.push(Resource::new(
        config::APPGW_PUBLIC_IP_ID,
        Some("App Gateway public IP"),
        ResourceKind::PublicIp {
            sku: "Standard".to_string(),
            allocation: "Static".to_string(),
        },
    ));
    out.fixes.push(format!(
        "added Standard static public IP '{}' for the Application Gateway",
        config::APPGW_PUBLIC_IP_ID
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Vnet, VnetKind};

    fn hub(id: &str) -> Vnet {
        Vnet {
            id: id.to_string(),
            label: id.to_string(),
            cidr: Ipv4::new("10.0.0.0/16").ok(),
            kind: VnetKind::Hub,
            subnets: vec![],
        }
    }

    fn spoke(id: &str) -> Vnet {
        Vnet {
            id: id.to_string(),
            label: id.to_string(),
            cidr: Ipv4::new("10.1.0.0/16").ok(),
            kind: VnetKind::Spoke,
            subnets: vec![
                Subnet::new("app", Ipv4::new("10.1.1.0/24").unwrap(), SubnetPurpose::App),
                Subnet::new("data", Ipv4::new("10.1.2.0/24").unwrap(), SubnetPurpose::Data),
            ],
        }
    }

    fn base_model() -> Model {
        Model {
            vnets: vec![hub("hub"), spoke("spoke1")],
            ..Default::default()
        }
    }

    #[test]
    fn test_vpn_adds_gateway_subnet_to_every_hub() {
        let mut model = base_model();
        model.vnets.push(hub("hub2"));
        let flags = RequirementFlags {
            vpn: true,
            ..Default::default()
        };
        let out = enforce(&mut model, &flags);

        for h in model.hubs() {
            let subnet = h.subnet(config::GATEWAY_SUBNET).expect("GatewaySubnet");
            assert_eq!(subnet.cidr, Some(*GATEWAY_CIDR));
        }
        assert_eq!(out.fixes.len(), 2, "one fix per hub");
        assert!(
            out.warnings.iter().any(|w| w.contains("VpnGateway")),
            "missing headline gateway must warn, not create"
        );
        assert!(!model.has_type(ResourceType::VpnGateway));
    }

    #[test]
    fn test_enforce_is_idempotent() {
        let mut model = base_model();
        let flags = RequirementFlags {
            vpn: true,
            waf: true,
            firewall: true,
            bastion: true,
            ..Default::default()
        };
        let first = enforce(&mut model, &flags);
        assert!(!first.fixes.is_empty());

        let snapshot = model.clone();
        let second = enforce(&mut model, &flags);
        assert!(second.fixes.is_empty(), "second pass must add nothing");
        assert_eq!(
            second.warnings, first.warnings,
            "warning set is stable across passes"
        );
        assert_eq!(model.vnets, snapshot.vnets);
        assert_eq!(model.resources, snapshot.resources);
    }

    #[test]
    fn test_waf_spoke_subnet_and_default_warning() {
        let mut model = base_model();
        let flags = RequirementFlags {
            waf: true,
            ..Default::default()
        };
        let out = enforce(&mut model, &flags);
        let spoke = model.spokes().next().unwrap();
        assert!(spoke.has_subnet(config::APPGW_SUBNET));
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("default CIDR")), "unreviewed default must warn");
    }

    #[test]
    fn test_firewall_route_tables_attached() {
        let mut model = base_model();
        let flags = RequirementFlags {
            firewall: true,
            ..Default::default()
        };
        enforce(&mut model, &flags);

        let rt = model.resource("spoke1_udr").expect("route table created");
        match &rt.kind {
            ResourceKind::RouteTable { routes } => {
                assert_eq!(routes.len(), 1);
                assert_eq!(routes[0].address_prefix, "0.0.0.0/0");
                assert_eq!(
                    routes[0].next_hop_ip.as_deref(),
                    Some(config::FIREWALL_PLACEHOLDER_IP)
                );
            }
            other => panic!("expected route table, got {other:?}"),
        }
        let spoke = model.spokes().next().unwrap();
        for subnet in &spoke.subnets {
            assert_eq!(
                subnet.route_table_id.as_deref(),
                Some("spoke1_udr"),
                "app and data subnets must be attached"
            );
        }
    }

    #[test]
    fn test_pe_without_target_creates_nothing() {
        let mut model = base_model();
        let flags = RequirementFlags {
            private_endpoint_sql: true,
            ..Default::default()
        };
        let out = enforce(&mut model, &flags);
        assert!(
            !model.has_type(ResourceType::PrivateDnsZone),
            "no SqlDb resource, so no DNS zone"
        );
        assert!(out.warnings.is_empty(), "no scaffolding, no PE warning");
        assert!(out.fixes.is_empty());
    }

    #[test]
    fn test_pe_with_target_creates_zone_and_standing_warning() {
        let mut model = base_model();
        model.resources.push(Resource::new(
            "sqldb",
            Some("Orders DB"),
            ResourceKind::SqlDb {
                tier: Default::default(),
                zone_redundant: false,
            },
        ));
        let flags = RequirementFlags {
            private_endpoint_sql: true,
            ..Default::default()
        };
        let out = enforce(&mut model, &flags);

        assert!(model.resources.iter().any(|r| matches!(
            &r.kind,
            ResourceKind::PrivateDnsZone { zone_name, .. } if zone_name == config::DNS_ZONE_SQL
        )));
        assert!(out.warnings.iter().any(|w| w.contains("VNet links")));
        assert!(
            out.warnings.iter().any(|w| w.contains("PrivateEndpoint")),
            "missing endpoint resource warns"
        );
    }

    #[test]
    fn test_appgw_public_ip_singleton() {
        let mut model = base_model();
        model.resources.push(Resource::new(
            "agw",
            Some("edge"),
            ResourceKind::ApplicationGateway { subnet_id: None },
        ));
        let flags = RequirementFlags::default();
        enforce(&mut model, &flags);
        assert!(model.resource(config::APPGW_PUBLIC_IP_ID).is_some());

        // second run, including the narrow re-check, adds no duplicate
        enforce(&mut model, &flags);
        enforce_edge_adjacent(&mut model, &flags);
        let pips = model
            .resources_of_type(ResourceType::PublicIp)
            .count();
        assert_eq!(pips, 1, "exactly one public IP for the gateway");
    }
}
