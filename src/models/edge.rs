//! Derived relationship edges.

use serde::{Deserialize, Serialize};

/// Layer of a derived edge.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Network-layer route.
    L3,
    /// Application-layer call.
    L7,
}

/// A directed edge between two node ids.
///
/// Edges are always derived by the wiring engine; externally supplied
/// edges never survive into the model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(from: &str, to: &str, kind: EdgeKind) -> Edge {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
            kind,
        }
    }
}
