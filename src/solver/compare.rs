// src/solver/compare.rs
//! Big-endian unsigned 256-bit comparison
//!
//! The sole correctness gate for "found a solution": a digest qualifies
//! when it is numerically less than the target, both interpreted as
//! big-endian unsigned 256-bit integers.

use crate::solver::message::UINT256_LENGTH;

/// Returns true iff `left < right` as big-endian unsigned 256-bit integers
///
/// Comparison proceeds from the most significant byte (index 0) to the
/// least significant (index 31); the first differing byte decides. Equal
/// values compare as not-less-than.
pub fn less_than(left: &[u8; UINT256_LENGTH], right: &[u8; UINT256_LENGTH]) -> bool {
    for i in 0..UINT256_LENGTH {
        if left[i] < right[i] {
            return true;
        } else if left[i] > right[i] {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    /// Reference ordering via two 128-bit halves
    fn reference_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
        let hi = |v: &[u8; 32]| u128::from_be_bytes(v[..16].try_into().unwrap());
        let lo = |v: &[u8; 32]| u128::from_be_bytes(v[16..].try_into().unwrap());
        (hi(a), lo(a)) < (hi(b), lo(b))
    }

    #[test]
    fn test_less_than_matches_integer_ordering() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let a: [u8; 32] = rng.r#gen();
            let b: [u8; 32] = rng.r#gen();
            assert_eq!(
                less_than(&a, &b),
                reference_less_than(&a, &b),
                "mismatch for a={} b={}",
                hex::encode(a),
                hex::encode(b)
            );
        }
    }

    #[test]
    fn test_less_than_equal_prefix_differing_suffix() {
        let mut rng = rand::thread_rng();
        for split in [0usize, 1, 15, 30, 31] {
            for _ in 0..200 {
                let mut a: [u8; 32] = rng.r#gen();
                let mut b = a;
                a[split] = 0x10;
                b[split] = 0x20;
                assert!(less_than(&a, &b), "differ at byte {}", split);
                assert!(!less_than(&b, &a), "differ at byte {}", split);
            }
        }
    }

    #[test]
    fn test_less_than_is_irreflexive() {
        let mut rng = rand::thread_rng();
        for _ in 0..1_000 {
            let a: [u8; 32] = rng.r#gen();
            assert!(!less_than(&a, &a));
        }
        assert!(!less_than(&[0u8; 32], &[0u8; 32]));
        assert!(!less_than(&[0xFF; 32], &[0xFF; 32]));
    }

    #[test]
    fn test_less_than_extremes() {
        let zero = [0u8; 32];
        let max = [0xFF; 32];
        let mut one = [0u8; 32];
        one[31] = 1;

        assert!(less_than(&zero, &one));
        assert!(less_than(&zero, &max));
        assert!(less_than(&one, &max));
        assert!(!less_than(&max, &zero));
        assert!(!less_than(&one, &zero));
    }
}
