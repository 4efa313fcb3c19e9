//! Shared types for the triarb engine.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that catalog, gateway,
//! and engine modules can depend on them without circular references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Pair
// ---------------------------------------------------------------------------

/// A tradeable currency pair.
///
/// `base` and `quote` are always carried explicitly from the catalog —
/// the engine never re-derives them by slicing `code`, since asset-code
/// lengths vary across exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    /// Pair code as listed by the exchange, e.g. "XETHXXBT".
    pub code: String,
    /// Base asset (numerator); price is quoted as quote-per-base.
    pub base: String,
    /// Quote asset (denominator).
    pub quote: String,
}

impl Pair {
    pub fn new(code: &str, base: &str, quote: &str) -> Self {
        Self {
            code: code.to_string(),
            base: base.to_string(),
            quote: quote.to_string(),
        }
    }

    /// Whether `asset` is one of the two legs of this pair.
    pub fn has_leg(&self, asset: &str) -> bool {
        self.base == asset || self.quote == asset
    }

    /// The leg opposite to `asset`, or `None` if `asset` is not a leg.
    pub fn other_leg(&self, asset: &str) -> Option<&str> {
        if self.base == asset {
            Some(&self.quote)
        } else if self.quote == asset {
            Some(&self.base)
        } else {
            None
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.code, self.base, self.quote)
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// One side (bid or ask) of a pair's order book, best level only.
/// Depth beyond level 0 is irrelevant to this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLevel {
    pub price: Decimal,
    pub volume: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl QuoteLevel {
    pub fn new(price: Decimal, volume: Decimal) -> Self {
        Self {
            price,
            volume,
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for QuoteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.price, self.volume)
    }
}

/// Best bid and ask for a pair as returned by the quote gateway.
///
/// Absence of either side means the pair is currently unquotable —
/// an expected condition, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookTop {
    pub bid: Option<QuoteLevel>,
    pub ask: Option<QuoteLevel>,
}

impl BookTop {
    pub fn new(bid: QuoteLevel, ask: QuoteLevel) -> Self {
        Self {
            bid: Some(bid),
            ask: Some(ask),
        }
    }

    /// An empty book — the pair cannot be traded right now.
    pub fn unquotable() -> Self {
        Self::default()
    }

    /// Whether both sides are present.
    pub fn is_quotable(&self) -> bool {
        self.bid.is_some() && self.ask.is_some()
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Direction of a simulated order, from the base asset's perspective.
/// Buying base consumes ask liquidity; selling base consumes bid liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Buy => write!(f, "BUY"),
            TradeDirection::Sell => write!(f, "SELL"),
        }
    }
}

/// How a pair quotes a given asset of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quotation {
    /// The asset is the pair's quote (denominator) currency:
    /// converting a target quantity into base units divides by price.
    Direct,
    /// The asset is the pair's base (numerator) currency:
    /// the target quantity is already denominated in base units.
    Indirect,
}

impl fmt::Display for Quotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quotation::Direct => write!(f, "direct"),
            Quotation::Indirect => write!(f, "indirect"),
        }
    }
}

// ---------------------------------------------------------------------------
// Trade & Balance
// ---------------------------------------------------------------------------

/// A simulated (never executed) order fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub pair_code: String,
    pub direction: TradeDirection,
    /// Executed size in base-asset units. Never negative.
    pub quantity: Decimal,
    pub price: Decimal,
    /// Set when the requested size exceeded quoted depth; holds the
    /// executed (reduced) size. The excess is unfilled, not an error.
    pub capped: Option<Decimal>,
}

impl Trade {
    pub fn is_capped(&self) -> bool {
        self.capped.is_some()
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {}",
            self.direction, self.quantity, self.pair_code, self.price,
        )?;
        if let Some(capped) = self.capped {
            write!(f, " (capped to {capped})")?;
        }
        Ok(())
    }
}

/// Net position change per asset. A single trade touches exactly two
/// assets (the two legs of its pair); summing trades across a triangle
/// collapses the intermediate legs to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance(HashMap<String, Decimal>);

impl Balance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` (signed) to the entry for `asset`.
    pub fn credit(&mut self, asset: &str, amount: Decimal) {
        *self.0.entry(asset.to_string()).or_insert(Decimal::ZERO) += amount;
    }

    /// Net quantity for `asset`; zero if the asset was never touched.
    pub fn net(&self, asset: &str) -> Decimal {
        self.0.get(asset).copied().unwrap_or(Decimal::ZERO)
    }

    /// Fold another balance into this one.
    pub fn merge(&mut self, other: &Balance) {
        for (asset, amount) in &other.0 {
            self.credit(asset, *amount);
        }
    }

    /// Sum a sequence of balances into one.
    pub fn sum<'a>(balances: impl IntoIterator<Item = &'a Balance>) -> Balance {
        let mut total = Balance::new();
        for b in balances {
            total.merge(b);
        }
        total
    }

    /// Assets with a non-zero net entry, sorted by asset code.
    pub fn non_zero(&self) -> Vec<(&str, Decimal)> {
        let mut entries: Vec<(&str, Decimal)> = self
            .0
            .iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.non_zero();
        if entries.is_empty() {
            return write!(f, "flat");
        }
        let parts: Vec<String> = entries
            .iter()
            .map(|(asset, amount)| format!("{asset}: {amount}"))
            .collect();
        write!(f, "{}", parts.join(" | "))
    }
}

// ---------------------------------------------------------------------------
// Opportunity
// ---------------------------------------------------------------------------

/// Result of simulating one traversal order of a triangle.
///
/// The traversal buys one unit of the first pair's quote asset, funded by
/// the first pair's base asset (the funding asset), then chains two sells
/// back around the triangle. The round trip settles into the funding
/// asset; everything else nets to zero when no leg was capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    /// The three pair codes in traversal order (first, next, final).
    pub ordering: [String; 3],
    pub trades: [Trade; 3],
    pub net_balance: Balance,
    /// Asset the cycle is funded from and settles back into.
    pub funding_asset: String,
    /// Net change of the funding asset across the full cycle.
    pub net_funding: Decimal,
    /// True when the cycle returns more funding asset than it spent.
    pub profitable: bool,
}

impl ArbitrageOpportunity {
    /// Net funding change relative to the amount committed on the first
    /// leg. Zero when the first leg did not execute at all.
    pub fn profit_ratio(&self) -> Decimal {
        let committed = self.trades[0].quantity;
        if committed.is_zero() {
            Decimal::ZERO
        } else {
            self.net_funding / committed
        }
    }

    /// Whether any of the three legs was volume-capped.
    pub fn any_capped(&self) -> bool {
        self.trades.iter().any(Trade::is_capped)
    }
}

impl fmt::Display for ArbitrageOpportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} -> {} | {} {} ({})",
            self.ordering[0],
            self.ordering[1],
            self.ordering[2],
            self.funding_asset,
            self.net_funding,
            if self.profitable { "profitable" } else { "flat/loss" },
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for triarb.
///
/// Only true programming-contract violations live here; unquotable pairs
/// and capped trades are ordinary values (see `BookTop` and `Trade`).
#[derive(Debug, thiserror::Error)]
pub enum TriarbError {
    #[error("asset {asset} is not a leg of pair {pair}")]
    AssetNotInPair { asset: String, pair: String },

    #[error("pair {0} quoted a zero price")]
    ZeroPrice(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
