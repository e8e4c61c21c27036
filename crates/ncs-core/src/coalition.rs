//! Coalitions of criteria as fixed-width bitsets.
//!
//! A coalition is a subset of the criteria index set. Its bit pattern doubles
//! as its index: with `n` criteria, the `2^n` coalitions are exactly the
//! integers `0..2^n`, so per-coalition data lives in plain vectors.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest number of criteria a [`Coalition`] can hold.
///
/// Coalition indices are `u32` bit patterns and the coalition count `2^n`
/// must itself fit in a `u32`.
pub const MAX_CRITERIA: usize = 31;

/// A subset of criteria.
///
/// `Copy` and two words wide, so iterating the coalition universe never
/// allocates. The universe width is carried along so that [`complement`]
/// needs no extra context.
///
/// [`complement`]: Coalition::complement
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCoalition"))]
pub struct Coalition {
    bits: u32,
    criteria_count: u8,
}

/// Unchecked wire form of a [`Coalition`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawCoalition {
    bits: u32,
    criteria_count: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoalition> for Coalition {
    type Error = String;

    fn try_from(raw: RawCoalition) -> Result<Self, Self::Error> {
        Coalition::checked(raw.criteria_count as usize, raw.bits).ok_or_else(|| {
            format!(
                "bits {:#b} are not a coalition of {} criteria (at most {})",
                raw.bits, raw.criteria_count, MAX_CRITERIA
            )
        })
    }
}

#[inline]
fn universe_mask(criteria_count: usize) -> u32 {
    debug_assert!(criteria_count <= MAX_CRITERIA);
    (1u32 << criteria_count) - 1
}

impl Coalition {
    /// Creates a coalition from its bit pattern (equivalently, its index).
    pub fn new(criteria_count: usize, bits: u32) -> Self {
        debug_assert!(criteria_count <= MAX_CRITERIA);
        debug_assert_eq!(bits & !universe_mask(criteria_count), 0);
        Self {
            bits,
            criteria_count: criteria_count as u8,
        }
    }

    /// Creates a coalition, or `None` when `bits` has members outside the
    /// universe or the universe exceeds [`MAX_CRITERIA`].
    pub fn checked(criteria_count: usize, bits: u32) -> Option<Self> {
        if criteria_count > MAX_CRITERIA || bits & !universe_mask(criteria_count) != 0 {
            return None;
        }
        Some(Self::new(criteria_count, bits))
    }

    /// Creates the coalition holding exactly the given criteria.
    pub fn from_criteria(criteria_count: usize, criteria: impl IntoIterator<Item = usize>) -> Self {
        let bits = criteria.into_iter().fold(0u32, |bits, criterion| {
            debug_assert!(criterion < criteria_count);
            bits | (1 << criterion)
        });
        Self::new(criteria_count, bits)
    }

    /// The empty coalition.
    pub fn empty(criteria_count: usize) -> Self {
        Self::new(criteria_count, 0)
    }

    /// The coalition of all criteria.
    pub fn full(criteria_count: usize) -> Self {
        Self::new(criteria_count, universe_mask(criteria_count))
    }

    /// Index of this coalition in the coalition universe.
    #[inline]
    pub fn index(self) -> usize {
        self.bits as usize
    }

    /// Raw bit pattern; bit `c` is set iff criterion `c` is a member.
    #[inline]
    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Number of criteria in the universe this coalition belongs to.
    #[inline]
    pub fn criteria_count(self) -> usize {
        self.criteria_count as usize
    }

    #[inline]
    pub fn contains(self, criterion: usize) -> bool {
        debug_assert!(criterion < self.criteria_count());
        self.bits & (1 << criterion) != 0
    }

    /// Number of member criteria.
    #[inline]
    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn is_subset_of(self, other: Coalition) -> bool {
        self.bits & !other.bits == 0
    }

    #[inline]
    pub fn is_proper_subset_of(self, other: Coalition) -> bool {
        self.bits != other.bits && self.is_subset_of(other)
    }

    /// Criteria of the universe that are not members.
    #[inline]
    pub fn complement(self) -> Coalition {
        Self {
            bits: !self.bits & universe_mask(self.criteria_count()),
            criteria_count: self.criteria_count,
        }
    }

    /// Member criteria in increasing index order.
    pub fn criteria(self) -> Criteria {
        Criteria { remaining: self.bits }
    }

    /// Every proper subset, the empty coalition included.
    ///
    /// Enumerates submasks directly, so a coalition of size `k` costs `2^k`
    /// steps rather than a scan of the whole universe.
    pub fn proper_subsets(self) -> ProperSubsets {
        ProperSubsets {
            of: self,
            next: self.bits.checked_sub(1).map(|below| below & self.bits),
        }
    }

    /// Every proper superset within the universe.
    pub fn proper_supersets(self) -> ProperSupersets {
        let free = self.complement().bits;
        ProperSupersets {
            base: self,
            free,
            next: free,
        }
    }
}

impl fmt::Debug for Coalition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.criteria()).finish()
    }
}

impl fmt::Display for Coalition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, criterion) in self.criteria().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", criterion)?;
        }
        write!(f, "}}")
    }
}

/// Iterator over the member criteria of a coalition.
#[derive(Debug, Clone)]
pub struct Criteria {
    remaining: u32,
}

impl Iterator for Criteria {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let criterion = self.remaining.trailing_zeros() as usize;
        self.remaining &= self.remaining - 1;
        Some(criterion)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Criteria {}

/// Iterator over the proper subsets of a coalition, in decreasing index order.
#[derive(Debug, Clone)]
pub struct ProperSubsets {
    of: Coalition,
    next: Option<u32>,
}

impl Iterator for ProperSubsets {
    type Item = Coalition;

    fn next(&mut self) -> Option<Coalition> {
        let sub = self.next?;
        self.next = sub.checked_sub(1).map(|below| below & self.of.bits);
        Some(Coalition {
            bits: sub,
            criteria_count: self.of.criteria_count,
        })
    }
}

/// Iterator over the proper supersets of a coalition, in decreasing index order.
#[derive(Debug, Clone)]
pub struct ProperSupersets {
    base: Coalition,
    free: u32,
    next: u32,
}

impl Iterator for ProperSupersets {
    type Item = Coalition;

    fn next(&mut self) -> Option<Coalition> {
        if self.next == 0 {
            return None;
        }
        let added = self.next;
        self.next = (added - 1) & self.free;
        Some(Coalition {
            bits: self.base.bits | added,
            criteria_count: self.base.criteria_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let coalition = Coalition::from_criteria(4, [0, 2]);
        assert_eq!(coalition.index(), 0b0101);
        assert!(coalition.contains(0));
        assert!(!coalition.contains(1));
        assert!(coalition.contains(2));
        assert_eq!(coalition.len(), 2);
        assert_eq!(coalition.criteria().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_proper_subset() {
        let small = Coalition::from_criteria(3, [1]);
        let large = Coalition::from_criteria(3, [0, 1]);
        let other = Coalition::from_criteria(3, [2]);

        assert!(small.is_proper_subset_of(large));
        assert!(!large.is_proper_subset_of(small));
        assert!(!large.is_proper_subset_of(large));
        assert!(large.is_subset_of(large));
        assert!(!other.is_proper_subset_of(large));
        assert!(Coalition::empty(3).is_proper_subset_of(other));
    }

    #[test]
    fn test_complement() {
        let coalition = Coalition::from_criteria(3, [0, 2]);
        assert_eq!(coalition.complement(), Coalition::from_criteria(3, [1]));
        assert_eq!(Coalition::empty(3).complement(), Coalition::full(3));
        assert_eq!(Coalition::full(3).complement(), Coalition::empty(3));
    }

    #[test]
    fn test_proper_subsets_match_brute_force() {
        let criteria_count = 4;
        for bits in 0..16 {
            let coalition = Coalition::new(criteria_count, bits);
            let mut direct: Vec<_> = coalition.proper_subsets().collect();
            direct.sort();
            let brute: Vec<_> = (0..16)
                .map(|b| Coalition::new(criteria_count, b))
                .filter(|c| c.is_proper_subset_of(coalition))
                .collect();
            assert_eq!(direct, brute, "subsets of {}", coalition);
        }
    }

    #[test]
    fn test_proper_supersets_match_brute_force() {
        let criteria_count = 4;
        for bits in 0..16 {
            let coalition = Coalition::new(criteria_count, bits);
            let mut direct: Vec<_> = coalition.proper_supersets().collect();
            direct.sort();
            let brute: Vec<_> = (0..16)
                .map(|b| Coalition::new(criteria_count, b))
                .filter(|c| coalition.is_proper_subset_of(*c))
                .collect();
            assert_eq!(direct, brute, "supersets of {}", coalition);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Coalition::from_criteria(3, [0, 2])), "{0, 2}");
        assert_eq!(format!("{}", Coalition::empty(3)), "{}");
        assert_eq!(format!("{:?}", Coalition::from_criteria(3, [1])), "{1}");
    }

    #[test]
    fn test_widest_universe() {
        let full = Coalition::full(MAX_CRITERIA);
        assert_eq!(full.len(), MAX_CRITERIA);
        assert!(full.complement().is_empty());
    }

    #[test]
    fn test_checked_rejects_outside_universe() {
        assert_eq!(Coalition::checked(2, 0b11), Some(Coalition::full(2)));
        assert_eq!(Coalition::checked(2, 0b100), None);
        assert_eq!(Coalition::checked(MAX_CRITERIA + 1, 0), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_bits() {
        let valid: Coalition = toml::from_str("bits = 2\ncriteria_count = 2").unwrap();
        assert_eq!(valid, Coalition::from_criteria(2, [1]));

        let outside = toml::from_str::<Coalition>("bits = 4\ncriteria_count = 2");
        assert!(outside.is_err());
        let too_wide = toml::from_str::<Coalition>("bits = 0\ncriteria_count = 40");
        assert!(too_wide.is_err());
    }
}
