//! Pair catalog — the set of tradeable pairs and the asset universe
//! they reference.
//!
//! Read once at scan start and immutable for the duration of a scan.
//! Can be built from in-memory records or loaded from an exchange-shaped
//! JSON document mapping pair code to base/quote legs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::types::{Pair, TriarbError};

/// JSON record for a single pair; auxiliary exchange metadata (fees,
/// lot sizes, leverage) is ignored on load.
#[derive(Debug, Deserialize)]
struct PairRecord {
    base: String,
    quote: String,
}

/// The catalog of tradeable pairs.
#[derive(Debug, Clone, Default)]
pub struct PairCatalog {
    pairs: Vec<Pair>,
    /// Pair code to position in `pairs`; lookups inside the scan's
    /// cubic enumeration must stay O(1).
    index: HashMap<String, usize>,
    assets: BTreeSet<String>,
}

impl PairCatalog {
    /// Build a catalog from pair records.
    ///
    /// Rejects degenerate pairs (base == quote) and duplicate codes, both
    /// of which indicate a malformed upstream catalog.
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Result<Self, TriarbError> {
        let mut catalog = PairCatalog::default();
        for pair in pairs {
            if pair.base == pair.quote {
                return Err(TriarbError::Catalog(format!(
                    "pair {} has identical base and quote legs",
                    pair.code
                )));
            }
            if catalog.index.contains_key(&pair.code) {
                return Err(TriarbError::Catalog(format!(
                    "duplicate pair code {}",
                    pair.code
                )));
            }
            catalog.index.insert(pair.code.clone(), catalog.pairs.len());
            catalog.assets.insert(pair.base.clone());
            catalog.assets.insert(pair.quote.clone());
            catalog.pairs.push(pair);
        }
        Ok(catalog)
    }

    /// Parse a catalog from a JSON document of the shape
    /// `{ "XETHXXBT": { "base": "XETH", "quote": "XXBT", ... }, ... }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: HashMap<String, PairRecord> =
            serde_json::from_str(json).context("failed to parse pair catalog JSON")?;
        let pairs = records
            .into_iter()
            .map(|(code, r)| Pair::new(&code, &r.base, &r.quote));
        Ok(Self::from_pairs(pairs)?)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read pair catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            pairs = catalog.len(),
            assets = catalog.assets.len(),
            "Pair catalog loaded"
        );
        Ok(catalog)
    }

    /// All pairs, in catalog order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Look up a pair by code.
    pub fn get(&self, code: &str) -> Option<&Pair> {
        self.index.get(code).map(|&i| &self.pairs[i])
    }

    /// Whether a pair code exists in the catalog.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// The distinct assets referenced by any pair, in sorted order so
    /// that scan traversal is deterministic.
    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(String::as_str)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pairs() -> Vec<Pair> {
        vec![
            Pair::new("XETHXXBT", "XETH", "XXBT"),
            Pair::new("XETHZCAD", "XETH", "ZCAD"),
            Pair::new("XXBTZCAD", "XXBT", "ZCAD"),
        ]
    }

    #[test]
    fn test_catalog_from_pairs() {
        let catalog = PairCatalog::from_pairs(sample_pairs()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("XETHXXBT"));
        assert!(!catalog.contains("XXBTXETH"));
    }

    #[test]
    fn test_catalog_asset_universe_sorted() {
        let catalog = PairCatalog::from_pairs(sample_pairs()).unwrap();
        let assets: Vec<&str> = catalog.assets().collect();
        assert_eq!(assets, vec!["XETH", "XXBT", "ZCAD"]);
        assert_eq!(catalog.asset_count(), 3);
    }

    #[test]
    fn test_catalog_get() {
        let catalog = PairCatalog::from_pairs(sample_pairs()).unwrap();
        let pair = catalog.get("XXBTZCAD").unwrap();
        assert_eq!(pair.base, "XXBT");
        assert_eq!(pair.quote, "ZCAD");
        assert!(catalog.get("NOPE").is_none());
    }

    #[test]
    fn test_catalog_get_and_contains_agree() {
        let catalog = PairCatalog::from_pairs(sample_pairs()).unwrap();
        for pair in catalog.pairs() {
            assert!(catalog.contains(&pair.code));
            assert_eq!(catalog.get(&pair.code).unwrap(), pair);
        }
        assert!(!catalog.contains("XXBTXETH"));
        assert!(catalog.get("XXBTXETH").is_none());
    }

    #[test]
    fn test_catalog_rejects_degenerate_pair() {
        let err = PairCatalog::from_pairs(vec![Pair::new("XETHXETH", "XETH", "XETH")])
            .unwrap_err();
        assert!(matches!(err, TriarbError::Catalog(_)));
    }

    #[test]
    fn test_catalog_rejects_duplicate_code() {
        let err = PairCatalog::from_pairs(vec![
            Pair::new("XETHXXBT", "XETH", "XXBT"),
            Pair::new("XETHXXBT", "XETH", "XXBT"),
        ])
        .unwrap_err();
        assert!(matches!(err, TriarbError::Catalog(_)));
    }

    #[test]
    fn test_catalog_empty() {
        let catalog = PairCatalog::from_pairs(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.asset_count(), 0);
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "XETHXXBT": { "base": "XETH", "quote": "XXBT", "fee_volume_currency": "ZUSD" },
            "XXBTZCAD": { "base": "XXBT", "quote": "ZCAD" }
        }"#;
        let catalog = PairCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("XETHXXBT").unwrap().quote, "XXBT");
    }

    #[test]
    fn test_catalog_from_json_rejects_garbage() {
        assert!(PairCatalog::from_json_str("not json").is_err());
    }
}
