//! Test fixture loader for the Beacon corpus and evaluation gold labels.
//!
//! Fixture files live under `data/` in this crate; paths passed to the
//! loaders are relative to that directory.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture data.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a text fixture verbatim.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_text(relative_path: &str) -> String {
    let path = fixtures_root().join(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Check whether a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// One corpus entry from `corpus/manifest.json`.
///
/// `metadata` is left as raw JSON so this crate stays independent of the
/// workspace's model types.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusEntry {
    pub file: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl CorpusEntry {
    pub fn markdown(&self) -> String {
        load_text(&self.file)
    }
}

/// The markdown corpus manifest.
pub fn corpus() -> Vec<CorpusEntry> {
    load_fixture("corpus/manifest.json")
}
