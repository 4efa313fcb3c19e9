//! Quotation resolution.
//!
//! Determines, for a given pair and asset of interest, whether the pair
//! quotes that asset directly (asset is the quote/denominator currency)
//! or indirectly (asset is the base/numerator currency).

use crate::types::{Pair, Quotation, TriarbError};

/// Resolve how `pair` quotes `asset`.
///
/// Asking about an asset that is not a leg of the pair is a caller
/// programming error, surfaced as `TriarbError::AssetNotInPair` —
/// correct scanner-driven call sequences never hit it.
pub fn resolve(pair: &Pair, asset: &str) -> Result<Quotation, TriarbError> {
    if pair.quote == asset {
        Ok(Quotation::Direct)
    } else if pair.base == asset {
        Ok(Quotation::Indirect)
    } else {
        Err(TriarbError::AssetNotInPair {
            asset: asset.to_string(),
            pair: pair.code.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
