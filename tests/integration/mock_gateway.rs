//! Mock quote gateway for integration testing.
//!
//! Provides a deterministic `QuoteGateway` implementation that serves
//! known books, counts calls, and can be forced into failure — all
//! in-memory with no external dependencies.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;

use triarb::gateway::QuoteGateway;
use triarb::types::{BookTop, QuoteLevel};

/// A mock quote gateway for deterministic testing.
///
/// All state is in-memory. Books, failure mode, and the call counter
/// are fully controllable from test code.
pub struct MockGateway {
    name: String,
    books: HashMap<String, BookTop>,
    calls: Mutex<u64>,
    /// If set, all lookups will return this error.
    force_error: Mutex<Option<String>>,
}

impl MockGateway {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            books: HashMap::new(),
            calls: Mutex::new(0),
            force_error: Mutex::new(None),
        }
    }

    /// Serve `book` for `pair_code`.
    pub fn with_book(mut self, pair_code: &str, book: BookTop) -> Self {
        self.books.insert(pair_code.to_string(), book);
        self
    }

    /// Serve a deep two-sided book at the given prices.
    pub fn with_quotes(self, pair_code: &str, bid: Decimal, ask: Decimal) -> Self {
        let depth = Decimal::from(1_000_000);
        self.with_book(
            pair_code,
            BookTop::new(QuoteLevel::new(bid, depth), QuoteLevel::new(ask, depth)),
        )
    }

    /// Force all subsequent lookups to return an error.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Number of `best_quotes` calls made so far.
    pub fn calls(&self) -> u64 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl QuoteGateway for MockGateway {
    async fn best_quotes(&self, pair_code: &str) -> Result<BookTop> {
        *self.calls.lock().unwrap() += 1;
        if let Some(msg) = self.force_error.lock().unwrap().clone() {
            return Err(anyhow!("{msg}"));
        }
        Ok(self
            .books
            .get(pair_code)
            .cloned()
            .unwrap_or_else(BookTop::unquotable))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
