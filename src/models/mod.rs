//! Data models for the topology normalizer.

mod edge;
mod flags;
mod ipv4;
mod model;
mod peering;
mod raw;
mod resource;
mod subnet;
mod vnet;

pub use edge::{Edge, EdgeKind};
pub use flags::RequirementFlags;
pub use ipv4::{Ipv4, MAX_LENGTH, OCTET_CAP};
pub use model::Model;
pub use peering::Peering;
pub use raw::{RawModel, RawPeering, RawResource, RawSubnet, RawVnet};
pub use resource::{Resource, ResourceKind, ResourceType, Route, SqlTier, StorageRedundancy};
pub use subnet::{Subnet, SubnetPurpose};
pub use vnet::{Vnet, VnetKind};
