// ============================================================================
// Numeric Parser
// Tolerant, total conversion of free-form input text to numbers
// ============================================================================
//
// Every function here is total: malformed text degrades to zero instead of
// producing an error. Thousands separators (",") are ignored and trailing
// garbage after a numeric prefix is dropped, so "12,500 shares" reads as 12500.

use super::fixed_decimal::Amount;

/// Thousands separator stripped before parsing
const THOUSANDS_SEPARATOR: char = ',';

/// Parse free-form text into a finite float.
///
/// Returns `0.0` when no numeric prefix exists or the value is not finite.
pub fn parse(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| *c != THOUSANDS_SEPARATOR).collect();
    let literal = leading_literal(cleaned.trim_start());

    literal
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// `floor(parse(raw))` clamped to zero from below.
pub fn to_non_negative_int(raw: &str) -> u64 {
    let value = parse(raw).floor();
    if value <= 0.0 {
        0
    } else {
        // float-to-int casts saturate
        value as u64
    }
}

/// `floor(parse(raw))`, negative values allowed.
pub fn to_signed_int(raw: &str) -> i64 {
    parse(raw).floor() as i64
}

/// Whole share count, saturating at `u32::MAX`.
pub fn to_share_count(raw: &str) -> u32 {
    u32::try_from(to_non_negative_int(raw)).unwrap_or(u32::MAX)
}

/// Parse a money amount.
///
/// Plain decimal literals are read exactly; anything else goes through the
/// float path and is rounded to the amount precision. Out-of-range values
/// degrade to zero.
pub fn parse_amount(raw: &str) -> Amount {
    let cleaned: String = raw.chars().filter(|c| *c != THOUSANDS_SEPARATOR).collect();
    if let Ok(exact) = cleaned.trim().parse::<Amount>() {
        return exact;
    }

    Amount::from_f64(parse(&cleaned)).unwrap_or(Amount::ZERO)
}

/// Whether `raw` is an in-progress placeholder while typing a signed number.
///
/// The parser still maps these to zero; input-echo logic uses this to keep
/// the text on screen instead of replacing it with "0".
pub fn is_transient(raw: &str) -> bool {
    matches!(raw, "" | "-")
}

/// Longest prefix of `s` that forms a decimal float literal:
/// `[+-]? digits? ("." digits?)? ([eE] [+-]? digits)?` with at least one
/// mantissa digit.
fn leading_literal(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        if mantissa_digits > 0 {
            i = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }

    &s[..i]
}
