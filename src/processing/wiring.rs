//! Auto-wiring engine.
//!
//! Derives the full set of directed L3/L7 relationships from the
//! resources present, in a fixed rule order, using the first resource of
//! a type as the representative. Whatever edge list the model carried
//! before this pass is replaced wholesale; upstream relationship data is
//! never trusted.

use crate::config;
use crate::models::{Edge, EdgeKind, Model, ResourceKind, ResourceType};
use crate::processing::classify::endpoint_target_type;
use std::collections::HashSet;

/// Rebuild the model's entire edge list.
pub fn rewire(model: &mut Model) {
    model.edges.clear();
    let mut writer = EdgeWriter::default();

    let agw = model.first_of_type(ResourceType::ApplicationGateway).map(|r| r.id.clone());
    let app = model.first_of_type(ResourceType::AppService).map(|r| r.id.clone());
    let sql = model.first_of_type(ResourceType::SqlDb).map(|r| r.id.clone());
    let storage = model.first_of_type(ResourceType::Storage).map(|r| r.id.clone());
    let key_vault = model.first_of_type(ResourceType::KeyVault).map(|r| r.id.clone());
    let firewall = model.first_of_type(ResourceType::AzureFirewall).map(|r| r.id.clone());
    let vpn = model.first_of_type(ResourceType::VpnGateway).map(|r| r.id.clone());
    let traffic_manager = model.first_of_type(ResourceType::TrafficManager).map(|r| r.id.clone());

    // The application entry point: gateway when present, app otherwise.
    let entry = agw.clone().or_else(|| app.clone());

    // 1. L7 application-tier fan-out.
    if let (Some(agw), Some(app)) = (&agw, &app) {
        writer.add(agw, app, EdgeKind::L7);
    }
    if let Some(app) = &app {
        for dep in [&sql, &storage, &key_vault].into_iter().flatten() {
            writer.add(app, dep, EdgeKind::L7);
        }
    }

    // 2. Private endpoints to their resolved targets. Unresolvable
    //    endpoints are skipped; partial input is normal here.
    for (pe_id, target) in resolve_endpoints(model) {
        writer.add(&pe_id, &target, EdgeKind::L7);
    }

    // 3. Traffic Manager fronts the entry point.
    if let (Some(tm), Some(entry)) = (&traffic_manager, &entry) {
        writer.add(tm, entry, EdgeKind::L7);
    }

    // 4. Firewall routes into the entry point.
    if let (Some(firewall), Some(entry)) = (&firewall, &entry) {
        writer.add(firewall, entry, EdgeKind::L3);
    }

    // 5. On-premises path through the VPN gateway.
    if let Some(vpn) = &vpn {
        writer.add(config::ONPREM_ID, vpn, EdgeKind::L3);
        if let Some(firewall) = &firewall {
            writer.add(vpn, firewall, EdgeKind::L3);
        }
        let inner = firewall.as_ref().unwrap_or(vpn);
        if let Some(entry) = &entry {
            writer.add(inner, entry, EdgeKind::L3);
        }
    }

    log::info!("wired {} edge(s)", writer.edges.len());
    model.edges = writer.edges;
}

/// Resolve every private endpoint to a target resource id. The declared
/// target id wins when it names a resource of the right type; otherwise
/// the first resource of that type stands in.
fn resolve_endpoints(model: &Model) -> Vec<(String, String)> {
    let mut resolved = Vec::new();
    for resource in model.resources_of_type(ResourceType::PrivateEndpoint) {
        let (target_type, target_id) = match &resource.kind {
            ResourceKind::PrivateEndpoint {
                target_type,
                target_id,
                ..
            } => (target_type, target_id),
            _ => continue,
        };
        let Some(wanted) = endpoint_target_type(target_type) else {
            log::debug!(
                "skipping endpoint '{}': unrecognized target type '{target_type}'",
                resource.id
            );
            continue;
        };
        let target = model
            .resources_of_type(wanted)
            .find(|r| &r.id == target_id)
            .or_else(|| model.first_of_type(wanted));
        match target {
            Some(target) => resolved.push((resource.id.clone(), target.id.clone())),
            None => log::debug!(
                "skipping endpoint '{}': no {wanted} resource to attach to",
                resource.id
            ),
        }
    }
    resolved
}

/// First-writer-wins edge collector: a (from, to) pair is added at most
/// once, whichever rule produced it first.
#[derive(Default)]
struct EdgeWriter {
    edges: Vec<Edge>,
    seen: HashSet<(String, String)>,
}

impl EdgeWriter {
    fn add(&mut self, from: &str, to: &str, kind: EdgeKind) {
        if self.seen.insert((from.to_string(), to.to_string())) {
            self.edges.push(Edge::new(from, to, kind));
        }
    }
}
