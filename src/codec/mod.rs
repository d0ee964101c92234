// ============================================================================
// Share Link Codec Module
// Compact, reversible text form of calculator inputs
// ============================================================================
//
// Two formats are understood:
// - v1 share tokens (`v1:` + six base-36 fields), written by `encode`
// - legacy `key=value` queries, read only as a fallback
//
// Loading always tries the share token first and falls back to the legacy
// query only when the token does not decode.

pub mod base36;
pub mod legacy;
mod token;
pub mod zigzag;

pub use token::{decode, encode, ShareToken, TokenError, FIELD_COUNT, VERSION_TAG};

use crate::domain::CalculatorState;
use tracing::debug;

/// Reconstruct a state from the parts of a share link.
///
/// `fragment` holds the share token (a leading `#` is stripped), `query`
/// the legacy parameters.
pub fn restore(fragment: Option<&str>, query: Option<&str>) -> Option<CalculatorState> {
    let from_token = fragment
        .map(|fragment| fragment.strip_prefix('#').unwrap_or(fragment))
        .filter(|token| !token.is_empty())
        .and_then(decode);

    if from_token.is_some() {
        return from_token;
    }

    let from_query = query.and_then(legacy::decode_query);
    if from_query.is_some() {
        debug!("restored calculator state from legacy query");
    }
    from_query
}
