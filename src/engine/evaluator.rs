//! Triangle evaluation.
//!
//! Given three quoted pairs forming a closed triangle, simulates the
//! three sequential trades for every traversal order and reports the
//! net balance and profitability of each.

use rust_decimal::Decimal;
use tracing::debug;

use super::simulator::{buy_with_pair, sell_with_pair};
use crate::types::{ArbitrageOpportunity, Balance, Pair, QuoteLevel, TriarbError};

/// A pair together with its best bid and ask, as fetched for one scan
/// candidate. Both sides must be present — unquotable pairs are the
/// scanner's responsibility and never reach the evaluator.
#[derive(Debug, Clone)]
pub struct PairQuotes {
    pub pair: Pair,
    pub bid: QuoteLevel,
    pub ask: QuoteLevel,
}

impl PairQuotes {
    pub fn new(pair: Pair, bid: QuoteLevel, ask: QuoteLevel) -> Self {
        Self { pair, bid, ask }
    }
}

/// The six orderings of three legs, enumerated explicitly. Small and
/// fixed-size beats a permutation generator here: the order is stable,
/// so results are index-addressable in tests and replays.
const TRAVERSAL_ORDERS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Evaluate every traversal order of a quoted triangle.
///
/// Each order treats one pair as `first`: the traversal buys one unit
/// of `first`'s quote asset (the pivot), funded by `first`'s base asset,
/// then sells the pivot proceeds through the pair sharing the pivot
/// (`next`) and sells those proceeds through the remaining pair
/// (`final`), which must close the cycle back into the funding asset.
/// Orders that do not close — including reversal-duplicate pair sets —
/// are skipped, not errors.
///
/// With `skip_capped` set, orders where any leg was volume-capped are
/// discarded: a capped simulation cannot stand in for a full-size cycle.
pub fn evaluate(
    legs: &[PairQuotes; 3],
    skip_capped: bool,
) -> Result<Vec<ArbitrageOpportunity>, TriarbError> {
    let mut results = Vec::new();

    for [f, s, t] in TRAVERSAL_ORDERS {
        let first = &legs[f];
        let pivot = first.pair.quote.as_str();
        let funding = first.pair.base.as_str();

        // Exactly one of the remaining pairs must carry the pivot asset.
        let (next, last) = match (legs[s].pair.has_leg(pivot), legs[t].pair.has_leg(pivot)) {
            (true, false) => (&legs[s], &legs[t]),
            (false, true) => (&legs[t], &legs[s]),
            _ => {
                debug!(
                    first = %first.pair.code,
                    %pivot,
                    "traversal skipped: pivot not on exactly one remaining pair"
                );
                continue;
            }
        };

        let Some(intermediate) = next.pair.other_leg(pivot) else {
            continue;
        };

        // The last pair must connect the intermediate asset back to the
        // funding asset, closing the triangle.
        if last.pair.other_leg(intermediate) != Some(funding) {
            debug!(
                first = %first.pair.code,
                last = %last.pair.code,
                %intermediate,
                "traversal skipped: triangle does not close"
            );
            continue;
        }

        let (balance_first, trade_first) =
            buy_with_pair(pivot, Decimal::ONE, &first.pair, &first.bid, &first.ask)?;
        let (balance_next, trade_next) = sell_with_pair(
            pivot,
            balance_first.net(pivot),
            &next.pair,
            &next.bid,
            &next.ask,
        )?;
        let (balance_last, trade_last) = sell_with_pair(
            intermediate,
            balance_next.net(intermediate),
            &last.pair,
            &last.bid,
            &last.ask,
        )?;

        let trades = [trade_first, trade_next, trade_last];
        if skip_capped && trades.iter().any(|t| t.is_capped()) {
            debug!(first = %first.pair.code, "traversal discarded: capped leg");
            continue;
        }

        let net_balance = Balance::sum([&balance_first, &balance_next, &balance_last]);
        let net_funding = net_balance.net(funding);
        results.push(ArbitrageOpportunity {
            ordering: [
                first.pair.code.clone(),
                next.pair.code.clone(),
                last.pair.code.clone(),
            ],
            trades,
            net_balance,
            funding_asset: funding.to_string(),
            net_funding,
            profitable: net_funding > Decimal::ZERO,
        });
    }

    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
