//! Snapshot-backed quote gateways.
//!
//! A scan against a live exchange can record every book it was served
//! and replay the exact same quotes later — for offline analysis,
//! regression fixtures, or debugging a reported opportunity.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use super::QuoteGateway;
use crate::types::BookTop;

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Serves quotes from an in-memory snapshot, optionally loaded from a
/// JSON file. Pairs absent from the snapshot are reported unquotable.
#[derive(Debug, Default)]
pub struct SnapshotGateway {
    books: HashMap<String, BookTop>,
}

impl SnapshotGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: HashMap<String, BookTop>) -> Self {
        Self { books }
    }

    /// Insert (or replace) the book for one pair.
    pub fn insert(&mut self, pair_code: &str, book: BookTop) {
        self.books.insert(pair_code.to_string(), book);
    }

    /// Load a snapshot from a JSON file mapping pair code to book top.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read quote snapshot {}", path.display()))?;
        let books: HashMap<String, BookTop> =
            serde_json::from_str(&raw).context("failed to parse quote snapshot JSON")?;
        info!(path = %path.display(), pairs = books.len(), "Quote snapshot loaded");
        Ok(Self { books })
    }

    /// Write the snapshot to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.books)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write quote snapshot {}", path.display()))?;
        info!(path = %path.display(), pairs = self.books.len(), "Quote snapshot saved");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[async_trait]
impl QuoteGateway for SnapshotGateway {
    async fn best_quotes(&self, pair_code: &str) -> Result<BookTop> {
        Ok(self
            .books
            .get(pair_code)
            .cloned()
            .unwrap_or_else(BookTop::unquotable))
    }

    fn name(&self) -> &str {
        "snapshot"
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Pass-through gateway that records every book answered by the inner
/// gateway, so the scan can be replayed from a `SnapshotGateway` later.
pub struct RecordingGateway<G> {
    inner: G,
    recorded: Mutex<HashMap<String, BookTop>>,
}

impl<G: QuoteGateway> RecordingGateway<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            recorded: Mutex::new(HashMap::new()),
        }
    }

    /// Everything recorded so far, as a replayable gateway.
    pub fn snapshot(&self) -> SnapshotGateway {
        SnapshotGateway::from_books(self.recorded.lock().unwrap().clone())
    }

    /// Persist everything recorded so far.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.snapshot().save(path)
    }
}

#[async_trait]
impl<G: QuoteGateway> QuoteGateway for RecordingGateway<G> {
    async fn best_quotes(&self, pair_code: &str) -> Result<BookTop> {
        let book = self.inner.best_quotes(pair_code).await?;
        self.recorded
            .lock()
            .unwrap()
            .insert(pair_code.to_string(), book.clone());
        Ok(book)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
