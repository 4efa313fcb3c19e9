//! Trade simulation against a single pair's best quote levels.
//!
//! The canonical side convention, pinned by the regression tests below:
//! positive signed volume buys the base asset and consumes ask
//! liquidity; negative signed volume sells the base asset and consumes
//! bid liquidity. Buying base costs quote; selling base receives quote.

use rust_decimal::Decimal;
use tracing::debug;

use super::quotation::resolve;
use crate::types::{Balance, Pair, Quotation, QuoteLevel, Trade, TradeDirection, TriarbError};

/// Fractional digits intermediate target volumes are rounded to before
/// capping. Keeps float-style drift from compounding across the three
/// multiplicative legs of a triangle.
pub const VOLUME_DECIMALS: u32 = 10;

/// Simulate one order against a pair's best bid/ask.
///
/// The executed size is capped to the liquidity available at the chosen
/// level; a capped fill is reported on the trade, never an error. The
/// returned balance carries exactly the two legs of the pair.
pub fn trade(
    pair: &Pair,
    bid: &QuoteLevel,
    ask: &QuoteLevel,
    signed_volume: Decimal,
) -> (Balance, Trade) {
    let mut balance = Balance::new();

    let (level, direction) = if signed_volume >= Decimal::ZERO {
        (ask, TradeDirection::Buy)
    } else {
        (bid, TradeDirection::Sell)
    };

    let requested = signed_volume.abs();
    let allowed = requested.min(level.volume);
    let capped = if allowed < requested {
        Some(allowed)
    } else {
        None
    };

    match direction {
        TradeDirection::Buy => {
            balance.credit(&pair.base, allowed);
            balance.credit(&pair.quote, -allowed * level.price);
        }
        TradeDirection::Sell => {
            balance.credit(&pair.base, -allowed);
            balance.credit(&pair.quote, allowed * level.price);
        }
    }

    let trade = Trade {
        pair_code: pair.code.clone(),
        direction,
        quantity: allowed,
        price: level.price,
        capped,
    };
    (balance, trade)
}

/// Acquire `amount` units of `asset` using `pair`.
///
/// The quotation resolver decides which side of the pair `asset` sits
/// on: a direct quotation sells base to receive quote, an indirect
/// quotation buys the base outright.
pub fn buy_with_pair(
    asset: &str,
    amount: Decimal,
    pair: &Pair,
    bid: &QuoteLevel,
    ask: &QuoteLevel,
) -> Result<(Balance, Trade), TriarbError> {
    let quotation = resolve(pair, asset)?;
    debug!(%asset, %amount, pair = %pair.code, %quotation, "buying");
    match quotation {
        Quotation::Direct => {
            let target = amount
                .checked_div(bid.price)
                .ok_or_else(|| TriarbError::ZeroPrice(pair.code.clone()))?
                .round_dp(VOLUME_DECIMALS);
            Ok(trade(pair, bid, ask, -target))
        }
        Quotation::Indirect => Ok(trade(pair, bid, ask, amount)),
    }
}

/// Dispose of `amount` units of `asset` using `pair` — the counterpart
/// of [`buy_with_pair`].
pub fn sell_with_pair(
    asset: &str,
    amount: Decimal,
    pair: &Pair,
    bid: &QuoteLevel,
    ask: &QuoteLevel,
) -> Result<(Balance, Trade), TriarbError> {
    let quotation = resolve(pair, asset)?;
    debug!(%asset, %amount, pair = %pair.code, %quotation, "selling");
    match quotation {
        Quotation::Direct => {
            let target = amount
                .checked_div(ask.price)
                .ok_or_else(|| TriarbError::ZeroPrice(pair.code.clone()))?
                .round_dp(VOLUME_DECIMALS);
            Ok(trade(pair, bid, ask, target))
        }
        Quotation::Indirect => Ok(trade(pair, bid, ask, -amount)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
