//! Lenient input shapes.
//!
//! The raw model arrives from an LLM or a locally built template and is
//! trusted for nothing: ids may be missing or collide, resource `type`
//! strings are free-form, and the topology may come in any of three
//! legacy layouts (flat vnet list, hub/spoke lists, or a single `hub`
//! field). The aggregator normalizes all of it; the `edges` field is
//! accepted only so it can be counted and discarded.

use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// Raw topology input, loosely matching the canonical model shape.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawModel {
    pub region: Option<String>,
    /// Flat VNet list (wins over the split lists when non-empty).
    pub vnets: Vec<RawVnet>,
    /// Hub list (second precedence, together with `spokes`).
    pub hubs: Vec<RawVnet>,
    /// Legacy single-hub field (lowest precedence).
    pub hub: Option<RawVnet>,
    pub spokes: Vec<RawVnet>,
    pub peerings: Vec<RawPeering>,
    pub resources: Vec<RawResource>,
    /// Untrusted relationship hints. Never forwarded; the wiring engine
    /// reconstructs ground truth from resource presence.
    pub edges: Vec<serde_json::Value>,
}

/// Raw VNet entry.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawVnet {
    #[serde(alias = "name")]
    pub id: Option<String>,
    pub label: Option<String>,
    #[serde(alias = "address_space", alias = "addressSpace")]
    pub cidr: Option<String>,
    /// "hub" or "spoke"; anything else is treated as spoke.
    pub kind: Option<String>,
    pub subnets: Vec<RawSubnet>,
}

/// Raw subnet entry.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawSubnet {
    #[serde(alias = "name")]
    pub id: Option<String>,
    #[serde(alias = "address_prefix", alias = "addressPrefix")]
    pub cidr: Option<String>,
    pub purpose: Option<String>,
    pub nsg_id: Option<String>,
    pub route_table_id: Option<String>,
}

/// Raw peering entry. Unresolvable VNet references are kept, not dropped.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawPeering {
    #[serde(alias = "from", alias = "fromVnetId")]
    pub from_vnet: Option<String>,
    #[serde(alias = "to", alias = "toVnetId")]
    pub to_vnet: Option<String>,
    #[serde(default = "default_true")]
    pub allow_vnet_access: bool,
    pub allow_forwarded_traffic: bool,
    pub gateway_transit: bool,
}

/// Raw resource entry with a free-form `type` string.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawResource {
    pub id: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    pub type_label: Option<String>,
    #[serde(alias = "name")]
    pub label: Option<String>,
    pub subnet_id: Option<String>,
    /// Private endpoint target hints.
    #[serde(alias = "targetResourceType")]
    pub target_type: Option<String>,
    #[serde(alias = "targetResourceId")]
    pub target_id: Option<String>,
    /// SQL tier hint ("GP", "BC", "business critical", ...).
    pub tier: Option<String>,
    pub zone_redundant: Option<bool>,
    /// Storage redundancy hint ("LRS", "ZRS", "GZRS", ...).
    pub redundancy: Option<String>,
    pub sku: Option<String>,
    pub instances: Option<u32>,
    pub zone_name: Option<String>,
    pub vnet_links: Vec<String>,
    pub routes: Vec<crate::models::Route>,
    pub allocation: Option<String>,
}
