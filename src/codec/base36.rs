// ============================================================================
// Base-36
// Radix-36 digits 0-9a-z for compact token fields
// ============================================================================

const RADIX: u64 = 36;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Longest base-36 rendering of a u64 (`u64::MAX` = "3w5e11264sgsf")
pub const MAX_DIGITS: usize = 13;

/// Encode `value` with lowercase base-36 digits.
pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut buf = [0u8; MAX_DIGITS];
    let mut start = MAX_DIGITS;
    while value > 0 {
        start -= 1;
        buf[start] = DIGITS[(value % RADIX) as usize];
        value /= RADIX;
    }

    buf[start..].iter().map(|&b| b as char).collect()
}

/// Decode a base-36 field.
///
/// Never fails: an empty field, a non-digit character or a value above
/// `u64::MAX` decodes to 0. Uppercase digits are accepted.
pub fn decode(field: &str) -> u64 {
    if field.is_empty() {
        return 0;
    }

    field
        .chars()
        .try_fold(0u64, |acc, ch| {
            let digit = ch.to_digit(RADIX as u32)? as u64;
            acc.checked_mul(RADIX)?.checked_add(digit)
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(35), "z");
        assert_eq!(encode(36), "10");
        assert_eq!(encode(130), "3m");
        assert_eq!(encode(10_000_000), "5yc1s");
        assert_eq!(encode(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("3m"), 130);
        assert_eq!(decode("5yc1s"), 10_000_000);
        assert_eq!(decode("5YC1S"), 10_000_000);
        assert_eq!(decode("3w5e11264sgsf"), u64::MAX);
    }

    #[test]
    fn test_decode_degrades_to_zero() {
        assert_eq!(decode(""), 0);
        assert_eq!(decode("bad!"), 0);
        assert_eq!(decode("-1"), 0);
        assert_eq!(decode("3w5e11264sgsg"), 0);
        assert_eq!(decode("zzzzzzzzzzzzzzzz"), 0);
    }

    #[test]
    fn test_roundtrip() {
        for value in [1, 2, 35, 36, 1_295, 1_296, 80_000_000, u64::MAX / 3] {
            assert_eq!(decode(&encode(value)), value);
        }
    }
}
