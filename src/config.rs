//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! The engine itself takes plain values; this module only serves the
//! binary entry point.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub scan: ScanConfig,
    pub catalog: CatalogConfig,
    pub quotes: QuotesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Discard traversals with a volume-capped leg (default true):
    /// a capped simulation cannot stand in for a full-size cycle.
    #[serde(default = "default_skip_capped")]
    pub skip_capped: bool,
}

fn default_skip_capped() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON file mapping pair code to { base, quote }.
    pub pairs_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuotesConfig {
    /// JSON book snapshot served by the replay gateway.
    pub snapshot_file: String,
}

impl AppConfig {
    /// Load and parse configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let cfg: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
