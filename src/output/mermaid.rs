//! Mermaid diagram emission.
//!
//! Serializes a normalized model into mermaid `flowchart` text: one
//! subgraph per VNet, one node per resource, solid arrows for L3 routes
//! and dashed arrows for L7 calls. Node placement is the renderer's
//! problem; this module only emits structure.

use crate::config;
use crate::models::{EdgeKind, Model, ResourceKind, VnetKind};
use itertools::Itertools;
use std::collections::HashSet;

/// Render the model as mermaid flowchart text.
pub fn to_mermaid(model: &Model) -> String {
    let mut lines: Vec<String> = vec!["flowchart TB".to_string()];

    // Resources homed in a subnet render inside their VNet subgraph;
    // everything else floats at the top level.
    let mut placed: HashSet<&str> = HashSet::new();

    for vnet in &model.vnets {
        let style = match vnet.kind {
            VnetKind::Hub => "Hub",
            VnetKind::Spoke => "Spoke",
        };
        let cidr = vnet
            .cidr
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        lines.push(format!(
            "    subgraph {} [\"{} ({style}, {cidr})\"]",
            vnet.id, vnet.label
        ));
        for subnet in &vnet.subnets {
            for resource in &model.resources {
                if resource_subnet(&resource.kind) == Some(subnet.id.as_str()) {
                    placed.insert(resource.id.as_str());
                    lines.push(format!(
                        "        {}[\"{}\"]",
                        resource.id,
                        resource.display_label()
                    ));
                }
            }
        }
        lines.push("    end".to_string());
    }

    for resource in &model.resources {
        if !placed.contains(resource.id.as_str()) {
            lines.push(format!(
                "    {}[\"{}\"]",
                resource.id,
                resource.display_label()
            ));
        }
    }

    if model.edges.iter().any(|e| e.from == config::ONPREM_ID) {
        lines.push(format!("    {}[\"On-premises\"]", config::ONPREM_ID));
    }

    for edge in &model.edges {
        let arrow = match edge.kind {
            EdgeKind::L3 => "-->",
            EdgeKind::L7 => "-.->",
        };
        lines.push(format!("    {} {arrow} {}", edge.from, edge.to));
    }

    lines.iter().join("\n")
}

fn resource_subnet(kind: &ResourceKind) -> Option<&str> {
    match kind {
        ResourceKind::ApplicationGateway { subnet_id }
        | ResourceKind::AzureFirewall { subnet_id }
        | ResourceKind::VpnGateway { subnet_id }
        | ResourceKind::ExpressRouteGateway { subnet_id }
        | ResourceKind::Bastion { subnet_id }
        | ResourceKind::PrivateEndpoint { subnet_id, .. } => subnet_id.as_deref(),
        _ => None,
    }
}
