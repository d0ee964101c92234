// ============================================================================
// Share Token
// Versioned, dot-delimited base-36 snapshot of calculator inputs
// ============================================================================
//
// Grammar (wire contract, keep stable):
//
//   token := "v1:" field ("." field){5}
//   field := [0-9a-z]+
//
// Field order: A, B, zigzag(C), D, major shares, minor shares.
// Amounts are floored to whole units; A and B are clamped to >= 0.

use super::{base36, zigzag};
use crate::domain::CalculatorState;
use crate::numeric::Amount;
use arrayvec::ArrayVec;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Literal version tag every token starts with
pub const VERSION_TAG: &str = "v1:";

/// Separator between fields
pub const FIELD_SEPARATOR: char = '.';

/// Number of fields in a v1 token
pub const FIELD_COUNT: usize = 6;

// ============================================================================
// Errors
// ============================================================================

/// Reasons a token is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenError {
    /// Token does not start with the literal version tag
    MissingVersion,
    /// Token body does not split into exactly six fields
    FieldCount { found: usize },
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::MissingVersion => {
                write!(f, "unrecognized share token: expected '{}' prefix", VERSION_TAG)
            },
            TokenError::FieldCount { found } => write!(
                f,
                "malformed share token: expected {} fields, found {}",
                FIELD_COUNT, found
            ),
        }
    }
}

impl std::error::Error for TokenError {}

// ============================================================================
// Token
// ============================================================================

/// Decoded field values of a v1 token, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShareToken {
    fields: [u64; FIELD_COUNT],
}

impl ShareToken {
    /// Capture `state`, flooring amounts to whole units.
    pub fn from_state(state: &CalculatorState) -> Self {
        let non_negative = |amount: Amount| amount.floor_integer().max(0) as u64;

        Self {
            fields: [
                non_negative(state.attributable_revenue),
                non_negative(state.total_revenue),
                zigzag::zigzag(state.net_profit.floor_integer()),
                state.total_shares as u64,
                state.major_shares as u64,
                state.minor_shares as u64,
            ],
        }
    }

    /// Rebuild the state. Values that do not fit their field read as zero.
    pub fn to_state(&self) -> CalculatorState {
        let amount = |value: i64| Amount::from_integer(value).unwrap_or(Amount::ZERO);
        let unsigned_amount = |value: u64| i64::try_from(value).map_or(Amount::ZERO, amount);
        let shares = |value: u64| u32::try_from(value).unwrap_or(0);

        let [a, b, c, d, major, minor] = self.fields;
        CalculatorState {
            attributable_revenue: unsigned_amount(a),
            total_revenue: unsigned_amount(b),
            net_profit: amount(zigzag::unzigzag(c)),
            total_shares: shares(d),
            major_shares: shares(major),
            minor_shares: shares(minor),
        }
    }

    /// Parse a token, reporting why it was rejected.
    ///
    /// Only the version tag and the field count can fail; unparseable
    /// fields decode to zero.
    pub fn parse(token: &str) -> Result<Self, TokenError> {
        let body = token
            .strip_prefix(VERSION_TAG)
            .ok_or(TokenError::MissingVersion)?;

        let mut fields = ArrayVec::<u64, FIELD_COUNT>::new();
        for part in body.split(FIELD_SEPARATOR) {
            fields
                .try_push(base36::decode(part))
                .map_err(|_| TokenError::FieldCount {
                    found: body.split(FIELD_SEPARATOR).count(),
                })?;
        }

        let fields = fields
            .into_inner()
            .map_err(|partial| TokenError::FieldCount {
                found: partial.len(),
            })?;

        Ok(Self { fields })
    }

    /// Raw field values in wire order
    pub fn fields(&self) -> &[u64; FIELD_COUNT] {
        &self.fields
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(VERSION_TAG)?;
        for (i, value) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", FIELD_SEPARATOR)?;
            }
            f.write_str(&base36::encode(*value))?;
        }
        Ok(())
    }
}

impl FromStr for ShareToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Codec Functions
// ============================================================================

/// Encode `state` as a `v1:` share token.
///
/// # Example
/// ```
/// use profit_split::codec::encode;
/// use profit_split::domain::CalculatorState;
///
/// assert_eq!(encode(&CalculatorState::sample()), "v1:5yc1s.tro8w.1bmoe8.3m.1o.0");
/// ```
pub fn encode(state: &CalculatorState) -> String {
    ShareToken::from_state(state).to_string()
}

/// Decode a share token, or `None` when it is not a well-formed v1 token.
///
/// `None` is the signal to try the legacy query format.
pub fn decode(token: &str) -> Option<CalculatorState> {
    match ShareToken::parse(token) {
        Ok(parsed) => Some(parsed.to_state()),
        Err(error) => {
            debug!(%error, "share token rejected");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_sample() {
        let token = encode(&CalculatorState::sample());
        assert_eq!(token, "v1:5yc1s.tro8w.1bmoe8.3m.1o.0");
        assert_eq!(decode(&token), Some(CalculatorState::sample()));
    }

    #[test]
    fn test_negative_profit_roundtrip() {
        let state = CalculatorState::from_integers(100, 200, -12_345, 130, 60, 10);
        let token = encode(&state);
        assert!(token.contains(".j1t."));
        assert_eq!(decode(&token), Some(state));
    }

    #[test]
    fn test_encode_floors_amounts() {
        let state = CalculatorState::default()
            .with_field_text(crate::domain::StateField::AttributableRevenue, "10.9")
            .with_field_text(crate::domain::StateField::NetProfit, "-0.5");
        let decoded = decode(&encode(&state)).unwrap();
        assert_eq!(decoded.attributable_revenue.integer_part(), 10);
        assert_eq!(decoded.net_profit.integer_part(), -1);
    }

    #[test]
    fn test_encode_clamps_negative_revenue() {
        let state = CalculatorState::from_integers(-5, -10, 0, 130, 0, 0);
        assert_eq!(encode(&state), "v1:0.0.0.3m.0.0");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(decode("v1:bad"), None);
        assert_eq!(decode("garbage"), None);
        assert_eq!(decode(""), None);
        assert_eq!(decode("v2:1.2.3.4.5.6"), None);
        assert_eq!(decode("V1:1.2.3.4.5.6"), None);
        assert_eq!(decode("v1:1.2.3.4.5"), None);
        assert_eq!(decode("v1:1.2.3.4.5.6.7"), None);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(ShareToken::parse("garbage"), Err(TokenError::MissingVersion));
        assert_eq!(
            ShareToken::parse("v1:bad"),
            Err(TokenError::FieldCount { found: 1 })
        );
        assert_eq!(
            ShareToken::parse("v1:1.2.3.4.5.6.7.8"),
            Err(TokenError::FieldCount { found: 8 })
        );
        assert_eq!(
            TokenError::FieldCount { found: 1 }.to_string(),
            "malformed share token: expected 6 fields, found 1"
        );
    }

    #[test]
    fn test_unparseable_fields_decode_to_zero() {
        let state = decode("v1:!!.tro8w..3m.1o.0").unwrap();
        assert_eq!(state.attributable_revenue, Amount::ZERO);
        assert_eq!(state.net_profit, Amount::ZERO);
        assert_eq!(state.total_revenue.integer_part(), 50_000_000);
    }

    #[test]
    fn test_out_of_range_fields_decode_to_zero() {
        // u64::MAX fits neither an amount nor a share count
        let state = decode("v1:3w5e11264sgsf.1.2.3w5e11264sgsf.1.1").unwrap();
        assert_eq!(state.attributable_revenue, Amount::ZERO);
        assert_eq!(state.total_shares, 0);
        assert_eq!(state.net_profit.integer_part(), 1);
    }

    #[test]
    fn test_large_amounts_decode() {
        // A = 1e15, B = 2e15
        let state = decode("v1:9ugxnorjls.joxvbdj37k.1bmoe8.3m.1o.0").unwrap();
        assert_eq!(state.attributable_revenue.integer_part(), 1_000_000_000_000_000);
        assert_eq!(state.total_revenue.integer_part(), 2_000_000_000_000_000);
        assert!(crate::engine::compute(state).valid);

        // 2^53 survives a round trip
        let safe = 9_007_199_254_740_992;
        let state = CalculatorState::from_integers(safe, safe, -safe, 130, 60, 0);
        assert!(encode(&state).starts_with("v1:2gosa7pa2gw.2gosa7pa2gw."));
        assert_eq!(decode(&encode(&state)), Some(state));
    }

    #[test]
    fn test_from_str_and_fields() {
        let token: ShareToken = "v1:5yc1s.tro8w.1bmoe8.3m.1o.0".parse().unwrap();
        assert_eq!(token.fields(), &[10_000_000, 50_000_000, 80_000_000, 130, 60, 0]);
        assert_eq!(token.to_string(), "v1:5yc1s.tro8w.1bmoe8.3m.1o.0");
    }

    proptest! {
        #[test]
        fn prop_integer_states_roundtrip(
            a in 0i64..90_000_000_000_000_000,
            b in 0i64..90_000_000_000_000_000,
            c in -90_000_000_000_000_000i64..90_000_000_000_000_000,
            d in any::<u32>(),
            major in any::<u32>(),
            minor in any::<u32>(),
        ) {
            let state = CalculatorState::from_integers(a, b, c, d, major, minor);
            prop_assert_eq!(decode(&encode(&state)), Some(state));
        }

        #[test]
        fn prop_tokens_match_grammar(
            a in 0i64..1_000_000_000,
            c in -1_000_000_000i64..1_000_000_000,
            major in 0u32..200,
        ) {
            let state = CalculatorState::from_integers(a, a, c, 130, major, 0);
            let token = encode(&state);
            let body = token.strip_prefix(VERSION_TAG).unwrap();
            let fields: Vec<&str> = body.split(FIELD_SEPARATOR).collect();
            prop_assert_eq!(fields.len(), FIELD_COUNT);
            for field in fields {
                prop_assert!(!field.is_empty());
                prop_assert!(field.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
            }
        }
    }
}
