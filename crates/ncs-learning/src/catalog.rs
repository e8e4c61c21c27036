//! Coalition catalog.
//!
//! The catalog stands for the universe of `2^n` coalitions over `n` criteria.
//! Coalitions are produced on demand in index order; nothing is materialized.

use ncs_core::{Coalition, NcsError, Result, MAX_CRITERIA};

/// Every coalition of a fixed set of criteria, indexed by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalitionCatalog {
    criteria_count: usize,
}

impl CoalitionCatalog {
    /// Creates the catalog for `criteria_count` criteria.
    ///
    /// # Errors
    ///
    /// Returns [`NcsError::TooManyCriteria`] above [`MAX_CRITERIA`].
    pub fn new(criteria_count: usize) -> Result<Self> {
        Self::with_limit(criteria_count, MAX_CRITERIA)
    }

    /// Creates the catalog, rejecting more than `limit` criteria.
    ///
    /// The limit is clamped to [`MAX_CRITERIA`].
    pub fn with_limit(criteria_count: usize, limit: usize) -> Result<Self> {
        let max = limit.min(MAX_CRITERIA);
        if criteria_count > max {
            return Err(NcsError::TooManyCriteria {
                criteria_count,
                max,
            });
        }
        Ok(Self { criteria_count })
    }

    pub fn criteria_count(&self) -> usize {
        self.criteria_count
    }

    /// `2^criteria_count`.
    pub fn coalitions_count(&self) -> usize {
        1usize << self.criteria_count
    }

    /// The coalition with the given index.
    pub fn get(&self, index: usize) -> Coalition {
        debug_assert!(index < self.coalitions_count());
        Coalition::new(self.criteria_count, index as u32)
    }

    /// All coalitions, in index order, each exactly once.
    pub fn iter(&self) -> impl Iterator<Item = Coalition> {
        let criteria_count = self.criteria_count;
        (0..self.coalitions_count() as u32).map(move |bits| Coalition::new(criteria_count, bits))
    }
}
