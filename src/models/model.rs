//! Canonical topology model.

use super::{Edge, Peering, Resource, ResourceType, Vnet, VnetKind};
use serde::{Deserialize, Serialize};

/// The canonical, invariant-enforced topology.
///
/// VNets live in a single ordered store tagged hub/spoke; the hub list,
/// spoke list and the single-hub compatibility view are derived
/// accessors, never independently mutable fields. The first hub is
/// always the compatibility representative.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Model {
    /// Region identifier.
    pub region: String,
    /// Ordered VNet store (hubs and spokes, first-seen order).
    pub vnets: Vec<Vnet>,
    /// Directional peering records.
    pub peerings: Vec<Peering>,
    /// All attached resources. Ids are globally unique.
    pub resources: Vec<Resource>,
    /// Derived edges; written exclusively by the wiring engine.
    pub edges: Vec<Edge>,
    /// Append-only audit log ("fix: ..." / "warn: ..." entries).
    pub notes: Vec<String>,
}

impl Model {
    /// All hub VNets, in store order.
    pub fn hubs(&self) -> impl Iterator<Item = &Vnet> {
        self.vnets.iter().filter(|v| v.kind == VnetKind::Hub)
    }

    /// Mutable view over the hub VNets.
    pub fn hubs_mut(&mut self) -> impl Iterator<Item = &mut Vnet> {
        self.vnets.iter_mut().filter(|v| v.kind == VnetKind::Hub)
    }

    /// All spoke VNets, in store order.
    pub fn spokes(&self) -> impl Iterator<Item = &Vnet> {
        self.vnets.iter().filter(|v| v.kind == VnetKind::Spoke)
    }

    /// Mutable view over the spoke VNets.
    pub fn spokes_mut(&mut self) -> impl Iterator<Item = &mut Vnet> {
        self.vnets.iter_mut().filter(|v| v.kind == VnetKind::Spoke)
    }

    /// Single-hub compatibility view: the first hub in store order.
    /// Aggregation guarantees at least one hub exists.
    pub fn hub(&self) -> Option<&Vnet> {
        self.hubs().next()
    }

    /// First resource of the given canonical type, in store order.
    pub fn first_of_type(&self, rtype: ResourceType) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.kind.resource_type() == rtype)
    }

    /// All resources of the given canonical type, in store order.
    pub fn resources_of_type(&self, rtype: ResourceType) -> impl Iterator<Item = &Resource> {
        self.resources
            .iter()
            .filter(move |r| r.kind.resource_type() == rtype)
    }

    /// Look up a resource by id.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// True when any resource of the given type exists.
    pub fn has_type(&self, rtype: ResourceType) -> bool {
        self.first_of_type(rtype).is_some()
    }

    /// Append an auto-repair record to the notes log.
    pub fn push_fix(&mut self, msg: &str) {
        log::info!("fix: {msg}");
        self.notes.push(format!("fix: {msg}"));
    }

    /// Append a residual-risk record to the notes log.
    pub fn push_warn(&mut self, msg: &str) {
        log::warn!("warn: {msg}");
        self.notes.push(format!("warn: {msg}"));
    }
}
