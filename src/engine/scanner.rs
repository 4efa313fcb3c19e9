//! Triangle scanner.
//!
//! Enumerates every (common leg, leg 1, leg 2) asset triple from the
//! catalog's universe, keeps the triples whose three derived pair codes
//! all exist, fetches quotes for them through the gateway, and collects
//! the evaluated opportunities.

use tracing::{debug, info, warn};

use super::evaluator::{evaluate, PairQuotes};
use crate::catalog::PairCatalog;
use crate::gateway::QuoteGateway;
use crate::types::{ArbitrageOpportunity, BookTop, Pair, QuoteLevel, TriarbError};

/// Stateless scan driver. Each candidate triangle is evaluated
/// independently; the only accumulating state is the result list.
pub struct TriangleScanner {
    skip_capped: bool,
}

impl Default for TriangleScanner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TriangleScanner {
    pub fn new(skip_capped: bool) -> Self {
        Self { skip_capped }
    }

    /// Scan every candidate triangle in the catalog.
    ///
    /// Candidate triples are gated by pair-code membership before any
    /// gateway call, so the O(assets cubed) enumeration only pays for
    /// triples that actually exist on the exchange. Gateway calls are
    /// awaited strictly in sequence; a triple with any unquotable leg
    /// (or a failing gateway call) is skipped, never an error. Asset
    /// triples differing only by the swap of the two non-common legs
    /// derive different direct pair codes, so at most one of the two
    /// survives the catalog gate.
    pub async fn scan(
        &self,
        catalog: &PairCatalog,
        gateway: &dyn QuoteGateway,
    ) -> Result<Vec<ArbitrageOpportunity>, TriarbError> {
        let assets: Vec<&str> = catalog.assets().collect();
        info!(
            gateway = gateway.name(),
            pairs = catalog.len(),
            assets = assets.len(),
            "Starting triangle scan"
        );

        let mut opportunities = Vec::new();
        let mut candidates = 0usize;
        let mut evaluated = 0usize;
        let mut unquotable = 0usize;

        for &common_leg in &assets {
            debug!(asset = common_leg, "Trying common leg");
            for &leg1 in &assets {
                if leg1 == common_leg {
                    continue;
                }
                for &leg2 in &assets {
                    if leg2 == common_leg || leg2 == leg1 {
                        continue;
                    }

                    let direct = format!("{leg1}{leg2}");
                    let indirect_1 = format!("{leg1}{common_leg}");
                    let indirect_2 = format!("{leg2}{common_leg}");
                    if !(catalog.contains(&direct)
                        && catalog.contains(&indirect_1)
                        && catalog.contains(&indirect_2))
                    {
                        continue;
                    }
                    candidates += 1;
                    debug!(%direct, %indirect_1, %indirect_2, "Trying triangle");

                    let mut legs: Vec<PairQuotes> = Vec::with_capacity(3);
                    for code in [&direct, &indirect_1, &indirect_2] {
                        let Some(pair) = catalog.get(code) else {
                            // Membership was checked above; a miss here
                            // would mean the catalog mutated mid-scan.
                            continue;
                        };
                        match Self::fetch_leg(gateway, pair).await {
                            Some(quotes) => legs.push(quotes),
                            None => break,
                        }
                    }
                    let Ok(legs) = <[PairQuotes; 3]>::try_from(legs) else {
                        unquotable += 1;
                        continue;
                    };

                    evaluated += 1;
                    opportunities.extend(evaluate(&legs, self.skip_capped)?);
                }
            }
        }

        let profitable = opportunities.iter().filter(|o| o.profitable).count();
        info!(
            candidates,
            evaluated,
            unquotable,
            opportunities = opportunities.len(),
            profitable,
            "Triangle scan complete"
        );
        Ok(opportunities)
    }

    /// Fetch one leg's book; `None` means the leg is unusable (gateway
    /// failure or one-sided/empty book) and the triple should be skipped.
    async fn fetch_leg(gateway: &dyn QuoteGateway, pair: &Pair) -> Option<PairQuotes> {
        let book = match gateway.best_quotes(&pair.code).await {
            Ok(book) => book,
            Err(e) => {
                warn!(pair = %pair.code, error = %e, "Gateway call failed, skipping triangle");
                return None;
            }
        };
        match book {
            BookTop {
                bid: Some(bid),
                ask: Some(ask),
            } => Self::usable_leg(pair, bid, ask),
            _ => {
                debug!(pair = %pair.code, "Pair unquotable, skipping triangle");
                None
            }
        }
    }

    /// Quotes with zero depth or a zero price on either side never
    /// reach the evaluator.
    fn usable_leg(pair: &Pair, bid: QuoteLevel, ask: QuoteLevel) -> Option<PairQuotes> {
        if bid.price.is_zero()
            || ask.price.is_zero()
            || bid.volume.is_zero()
            || ask.volume.is_zero()
        {
            debug!(pair = %pair.code, "Degenerate quote level, skipping triangle");
            return None;
        }
        Some(PairQuotes::new(pair.clone(), bid, ask))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
