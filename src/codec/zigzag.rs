// ============================================================================
// Zig-Zag Transform
// Bijection between signed and unsigned integers
// ============================================================================
//
//   0 -> 0, -1 -> 1, 1 -> 2, -2 -> 3, 2 -> 4, ...
//
// Small magnitudes of either sign stay small, so a negative profit costs
// one extra bit instead of a sign marker in the token grammar.

/// `n >= 0 ? 2n : -2n - 1`, defined over the whole `i64` range.
#[inline]
pub const fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag`]: even values are non-negative, odd values negative.
#[inline]
pub const fn unzigzag(z: u64) -> i64 {
    ((z >> 1) as i64) ^ -((z & 1) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_small_values() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(-2), 3);
        assert_eq!(zigzag(40_000_000), 80_000_000);
        assert_eq!(zigzag(-12_345), 24_689);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(zigzag(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag(i64::MIN), u64::MAX);
        assert_eq!(unzigzag(u64::MAX), i64::MIN);
        assert_eq!(unzigzag(u64::MAX - 1), i64::MAX);
    }

    #[test]
    fn test_roundtrip_property() {
        fn roundtrip(n: i64) -> bool {
            unzigzag(zigzag(n)) == n
        }
        fn inverse(z: u64) -> bool {
            zigzag(unzigzag(z)) == z
        }
        fn parity_encodes_sign(n: i64) -> bool {
            (zigzag(n) % 2 == 1) == (n < 0)
        }

        quickcheck(roundtrip as fn(i64) -> bool);
        quickcheck(inverse as fn(u64) -> bool);
        quickcheck(parity_encodes_sign as fn(i64) -> bool);
    }
}
