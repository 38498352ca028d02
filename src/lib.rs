//! Normalizes loosely specified hub-and-spoke topology input into a
//! structurally valid network model ready for diagram rendering.
//!
//! The input may come from an LLM (missing fields, colliding ids,
//! free-form type strings, hallucinated relationships) or from the local
//! template fallback; either way the pipeline repairs rather than
//! rejects, folding every anomaly into the model's `fix:`/`warn:` notes
//! log. The pipeline is pure and synchronous: no I/O, no shared state,
//! deterministic output for identical input.

pub mod config;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;

use models::{Model, RawModel, RequirementFlags};
use processing::SanitizeSession;

/// Run the full normalization pipeline over a raw model.
///
/// Stage order: aggregate the legacy input shapes into the canonical
/// store, enforce requested-feature invariants, clone into the DR region
/// when requested, rebuild the edge set from resource presence, wire the
/// Traffic Manager to the cloned entry point, then re-check the
/// edge-adjacent public IP and route-table requirements. Never fails;
/// every anomaly ends up in the notes log instead.
pub fn build_topology(raw: RawModel, flags: &RequirementFlags) -> Model {
    let mut session = SanitizeSession::new();

    let mut model = processing::aggregate(raw, &mut session);
    if model.region.is_empty() {
        model.region = flags.region.clone();
    }

    processing::enforce(&mut model, flags);
    processing::clone_for_dr(&mut model, flags);
    processing::rewire(&mut model);
    processing::wire_dr_entry_points(&mut model);
    processing::enforce_edge_adjacent(&mut model, flags);

    log::info!(
        "pipeline done: {} vnet(s), {} resource(s), {} edge(s), {} note(s)",
        model.vnets.len(),
        model.resources.len(),
        model.edges.len(),
        model.notes.len()
    );

    model
}

/// Fallback path: build the topology from the local template when no
/// externally synthesized model is available. Same guarantees as
/// [`build_topology`].
pub fn build_from_template(flags: &RequirementFlags) -> Model {
    build_topology(input::template_model(flags), flags)
}
