//! Input loading: local template fallback and JSON files.

pub mod json;
pub mod template;

pub use json::{read_flags, read_raw_model};
pub use template::template_model;
