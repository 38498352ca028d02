//! Output rendering for normalized models.

pub mod mermaid;
pub mod terminal;

pub use mermaid::to_mermaid;
pub use terminal::print_summary;
