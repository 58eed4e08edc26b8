//! Lexicographically ordered path weights.
//!
//! W/D computation runs an ordinary all-pairs shortest-path algorithm over
//! pairs `(registers, -delay)`. Minimizing the pair lexicographically picks
//! the fewest registers first, and among equally registered paths the one
//! with the largest delay.

use kairos_common::{Delay, Registers};
use std::cmp::Ordering;

/// A path weight compared lexicographically.
///
/// Arithmetic and ordering are explicit methods. `(1, 100)` is smaller than
/// `(2, -100)` because the first components already differ. Sums are
/// checked and return `None` on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LexPair {
    /// Total register count along the path.
    pub registers: Registers,
    /// Negated total delay of the nodes the path leaves.
    pub neg_delay: Delay,
}

impl LexPair {
    /// The additive identity, used for the empty path from a node to itself.
    pub const ZERO: LexPair = LexPair {
        registers: 0,
        neg_delay: 0,
    };

    /// Creates a pair.
    pub const fn new(registers: Registers, neg_delay: Delay) -> Self {
        Self {
            registers,
            neg_delay,
        }
    }

    /// Componentwise sum.
    pub fn checked_add(self, other: LexPair) -> Option<LexPair> {
        Some(LexPair {
            registers: self.registers.checked_add(other.registers)?,
            neg_delay: self.neg_delay.checked_add(other.neg_delay)?,
        })
    }

    /// Adds `k` to both components.
    pub fn checked_add_scalar(self, k: i64) -> Option<LexPair> {
        Some(LexPair {
            registers: self.registers.checked_add(k)?,
            neg_delay: self.neg_delay.checked_add(k)?,
        })
    }

    /// Compares `registers` first, then `neg_delay`.
    pub fn compare(&self, other: &LexPair) -> Ordering {
        match self.registers.cmp(&other.registers) {
            Ordering::Equal => self.neg_delay.cmp(&other.neg_delay),
            unequal => unequal,
        }
    }

    /// Returns `true` if `self` is strictly smaller than `other`.
    pub fn is_less(&self, other: &LexPair) -> bool {
        self.compare(other) == Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_component_dominates() {
        let a = LexPair::new(1, 100);
        let b = LexPair::new(2, -100);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert!(a.is_less(&b));
    }

    #[test]
    fn second_component_breaks_ties() {
        let more_delay = LexPair::new(1, -9);
        let less_delay = LexPair::new(1, -4);
        assert!(more_delay.is_less(&less_delay));
    }

    #[test]
    fn equality_needs_both_components() {
        assert_eq!(LexPair::new(3, -2).compare(&LexPair::new(3, -2)), Ordering::Equal);
        assert_ne!(LexPair::new(3, -2), LexPair::new(3, -1));
        assert!(!LexPair::new(3, -2).is_less(&LexPair::new(3, -2)));
    }

    #[test]
    fn addition() {
        let p = LexPair::new(1, -3).checked_add(LexPair::new(2, -7)).unwrap();
        assert_eq!(p, LexPair::new(3, -10));
        assert_eq!(LexPair::ZERO.checked_add(p), Some(p));
    }

    #[test]
    fn scalar_broadcast() {
        assert_eq!(LexPair::ZERO.checked_add_scalar(5), Some(LexPair::new(5, 5)));
        assert_eq!(
            LexPair::new(2, -3).checked_add_scalar(-1),
            Some(LexPair::new(1, -4))
        );
    }

    #[test]
    fn overflow_in_either_component() {
        let big = LexPair::new(i64::MAX, 0);
        assert_eq!(big.checked_add(LexPair::new(1, 0)), None);
        assert_eq!(LexPair::new(0, i64::MIN).checked_add(LexPair::new(0, -1)), None);
        assert_eq!(big.checked_add_scalar(1), None);
        assert_eq!(big.checked_add(LexPair::new(-1, -5)), Some(LexPair::new(i64::MAX - 1, -5)));
    }
}
