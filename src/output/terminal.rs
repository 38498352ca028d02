//! Terminal summary output.
//!
//! Prints the normalized topology and its audit notes to stdout.

use crate::models::{Model, VnetKind};
use colored::Colorize;
use itertools::Itertools;

/// Print a human-readable summary of the normalized model.
pub fn print_summary(model: &Model) {
    log::info!(
        "Summary: region '{}', {} VNets, {} resources, {} edges",
        model.region,
        model.vnets.len(),
        model.resources.len(),
        model.edges.len()
    );

    println!("Region: {}", model.region);
    for vnet in &model.vnets {
        let role = match vnet.kind {
            VnetKind::Hub => "HUB".blue(),
            VnetKind::Spoke => "SPOKE".normal(),
        };
        println!("{role} {vnet}");
        for subnet in &vnet.subnets {
            let cidr = subnet
                .cidr
                .map(|c| c.to_string())
                .unwrap_or_else(|| "?".to_string());
            println!("    {} [{}]", subnet.id, cidr);
        }
    }

    println!(
        "Resources: {}",
        model
            .resources
            .iter()
            .map(|r| format!("{} ({})", r.id, r.kind.resource_type()))
            .join(", ")
    );

    for note in &model.notes {
        if let Some(fix) = note.strip_prefix("fix: ") {
            println!("{} {fix}", "fix: ".green());
        } else if let Some(warning) = note.strip_prefix("warn: ") {
            println!("{} {warning}", "warn:".yellow());
        } else {
            println!("{note}");
        }
    }
}
