//! JSON input loading.
//!
//! Raw models and requirement flags arrive as JSON files written by the
//! upstream collaborators. Deserialization goes through
//! `serde_path_to_error` so a malformed document reports the exact path
//! that failed instead of a bare serde message.

use crate::models::{RawModel, RequirementFlags};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::path::Path;

/// Read a raw topology model from a JSON file.
pub fn read_raw_model(path: &str) -> Result<RawModel, Box<dyn Error>> {
    read_json(path)
}

/// Read requirement flags from a JSON file.
pub fn read_flags(path: &str) -> Result<RequirementFlags, Box<dyn Error>> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Input file does not exist: {path}").into());
    }
    log::info!("Reading input file: {path}");
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading input file {path}: {e}"))?;

    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let parsed: Result<T, serde_path_to_error::Error<serde_json::Error>> =
        serde_path_to_error::deserialize(&mut deserializer);
    parsed.map_err(|e| {
        let json_path = e.path().to_string();
        format!("Error parsing {path} at '{json_path}': {e}").into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_raw_model_fixture() {
        let raw = read_raw_model("src/tests/test_data/raw_model_01.json")
            .expect("Error reading raw model fixture");
        assert_eq!(raw.hub.as_ref().unwrap().id.as_deref(), Some("corp hub"));
        assert_eq!(raw.spokes.len(), 1);
        assert_eq!(raw.resources.len(), 4);
        assert_eq!(raw.edges.len(), 1, "fixture carries a hallucinated edge");
    }

    #[test]
    fn test_read_flags_fixture() {
        let flags = read_flags("src/tests/test_data/flags_01.json")
            .expect("Error reading flags fixture");
        assert_eq!(flags.region, "japaneast");
        assert!(flags.vpn && flags.waf);
        assert!(!flags.bastion);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_raw_model("src/tests/test_data/no_such_file.json").is_err());
    }

    #[test]
    fn test_parse_error_reports_path() {
        // flags file is not a raw model with vnets as an object
        let err = read_raw_model("src/tests/test_data/malformed_01.json")
            .expect_err("malformed fixture must fail");
        assert!(
            err.to_string().contains("vnets"),
            "error should name the failing path, got: {err}"
        );
    }
}
