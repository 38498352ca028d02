//! Normalization pipeline stages.
//!
//! Stage order is fixed: aggregation, enforcement, DR cloning, wiring,
//! then the narrow edge-adjacent enforcement re-check.

pub mod aggregate;
pub mod classify;
pub mod dr;
pub mod enforce;
pub mod sanitize;
pub mod wiring;

pub use aggregate::aggregate;
pub use classify::{endpoint_target_type, normalize_type};
pub use dr::{clone_for_dr, wire_dr_entry_points};
pub use enforce::{enforce, enforce_edge_adjacent, EnforceOutcome};
pub use sanitize::SanitizeSession;
pub use wiring::rewire;
