//! Quote gateway — the engine's only external collaborator.
//!
//! Defines the `QuoteGateway` trait and provides the snapshot-backed
//! implementation used for offline replay and testing. Live exchange
//! connectivity (auth, signing, retries, rate limiting) belongs to
//! implementors of the trait, never to the engine.

pub mod snapshot;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::BookTop;

/// Source of best bid/ask quotes, one pair at a time.
///
/// An empty or one-sided `BookTop` means the pair is currently
/// unquotable and the caller skips it. Transport-level failures are the
/// gateway's own concern; an `Err` from `best_quotes` is treated by the
/// scanner exactly like an unquotable pair.
///
/// Implementations may block or sleep per call (e.g. for rate limiting
/// toward an exchange); the scanner awaits each call sequentially.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteGateway: Send + Sync {
    /// Fetch the best bid and ask for `pair_code`.
    async fn best_quotes(&self, pair_code: &str) -> Result<BookTop>;

    /// Gateway name for logging and identification.
    fn name(&self) -> &str;
}
