// ============================================================================
// Legacy Query Format
// Flat `a=..&b=..&c=..&d=..&major=..&minor=..` links from before share tokens
// ============================================================================

use crate::domain::{CalculatorState, StateField};
use tracing::debug;

/// Decode a legacy query string (a leading `?` is allowed).
///
/// The query is form-urlencoded: `%XX` escapes are decoded and `+` reads as a
/// space before values reach the tolerant parser. Unknown keys are ignored,
/// missing keys keep their [`CalculatorState::default`] value, a repeated key
/// takes its first value, and `None` is returned when no recognized key is
/// present at all.
pub fn decode_query(query: &str) -> Option<CalculatorState> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let pairs = match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs,
        Err(error) => {
            debug!(%error, "legacy query rejected");
            return None;
        },
    };

    let mut state = CalculatorState::default();
    let mut recognized = false;

    // reversed so the first occurrence of a key is applied last
    for (key, value) in pairs.iter().rev() {
        if let Some(field) = StateField::from_query_key(key) {
            state = state.with_field_text(field, value);
            recognized = true;
        }
    }

    recognized.then_some(state)
}

/// Write `state` in the legacy format, amounts floored to whole units.
pub fn encode_query(state: &CalculatorState) -> String {
    let pairs: Vec<(&str, String)> = StateField::ALL
        .iter()
        .map(|field| {
            let value = match field {
                StateField::AttributableRevenue => {
                    state.attributable_revenue.floor_integer().to_string()
                },
                StateField::TotalRevenue => state.total_revenue.floor_integer().to_string(),
                StateField::NetProfit => state.net_profit.floor_integer().to_string(),
                StateField::TotalShares => state.total_shares.to_string(),
                StateField::MajorShares => state.major_shares.to_string(),
                StateField::MinorShares => state.minor_shares.to_string(),
            };
            (field.query_key(), value)
        })
        .collect();

    // a flat list of string pairs always serializes
    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}
