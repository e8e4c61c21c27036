//! Uc-NCS model types.
//!
//! A model has one boundary per pair of adjacent categories. Each boundary
//! describes, per criterion, which performances are accepted, plus the family
//! of sufficient coalitions. Learned Uc-NCS models share one family across
//! all boundaries.
//!
//! Two representations exist: [`PreprocessedBoundary`] works on value ranks
//! and is what learners decode; [`Boundary`] works on real performance values
//! and is what [`LearningSet::post_process`](crate::LearningSet::post_process)
//! produces.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coalition::Coalition;

/// Accepted value ranks of one criterion at one boundary.
///
/// Regular criteria accept every rank from a threshold upwards; single-peaked
/// criteria accept a contiguous window. A threshold or window starting at the
/// criterion's `values_count` accepts nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AcceptedRanks {
    /// Ranks `>= threshold` are accepted.
    Threshold(u32),

    /// Ranks in `low..=high` are accepted.
    Interval { low: u32, high: u32 },
}

impl AcceptedRanks {
    /// The variant that accepts no rank of a criterion with `values_count` ranks.
    pub fn reject_all(values_count: u32, single_peaked: bool) -> Self {
        if single_peaked {
            AcceptedRanks::Interval {
                low: values_count,
                high: values_count,
            }
        } else {
            AcceptedRanks::Threshold(values_count)
        }
    }

    #[inline]
    pub fn accepts(&self, rank: u32) -> bool {
        match *self {
            AcceptedRanks::Threshold(threshold) => rank >= threshold,
            AcceptedRanks::Interval { low, high } => low <= rank && rank <= high,
        }
    }

    /// Whether this accepts no rank of a criterion with `values_count` ranks.
    pub fn is_reject_all(&self, values_count: u32) -> bool {
        match *self {
            AcceptedRanks::Threshold(threshold) => threshold >= values_count,
            AcceptedRanks::Interval { low, high } => low >= values_count || low > high,
        }
    }
}

/// An upward-closed family of coalitions, stored as its minimal elements.
///
/// Any superset of a root is sufficient too. Roots form an antichain: no
/// root is a proper subset of another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SufficientCoalitions {
    roots: Vec<Coalition>,
}

impl SufficientCoalitions {
    pub fn from_roots(roots: Vec<Coalition>) -> Self {
        debug_assert!(roots
            .iter()
            .all(|a| roots.iter().all(|b| !a.is_proper_subset_of(*b))));
        Self { roots }
    }

    pub fn roots(&self) -> &[Coalition] {
        &self.roots
    }

    /// Whether `coalition` is sufficient, i.e. contains some root.
    pub fn contains(&self, coalition: Coalition) -> bool {
        self.roots.iter().any(|root| root.is_subset_of(coalition))
    }
}

/// A boundary expressed on value ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PreprocessedBoundary {
    pub profile_ranks: Vec<AcceptedRanks>,
    pub sufficient_coalitions: SufficientCoalitions,
}

impl PreprocessedBoundary {
    pub fn new(
        profile_ranks: Vec<AcceptedRanks>,
        sufficient_coalitions: SufficientCoalitions,
    ) -> Self {
        Self {
            profile_ranks,
            sufficient_coalitions,
        }
    }

    /// Coalition of the criteria on which `rank_of` is accepted.
    pub fn accepted_coalition(&self, rank_of: impl Fn(usize) -> u32) -> Coalition {
        let criteria_count = self.profile_ranks.len();
        Coalition::from_criteria(
            criteria_count,
            self.profile_ranks
                .iter()
                .enumerate()
                .filter(|(criterion, accepted)| accepted.accepts(rank_of(*criterion)))
                .map(|(criterion, _)| criterion),
        )
    }
}

/// Accepted performance values of one criterion at one boundary.
///
/// `None` means no value is accepted. A threshold is read in the criterion's
/// preference direction: values at least as good as it are accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AcceptedValues {
    Threshold(Option<f64>),
    Interval(Option<(f64, f64)>),
}

/// A boundary expressed on performance values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Boundary {
    pub profile: Vec<AcceptedValues>,
    pub sufficient_coalitions: SufficientCoalitions,
}

/// A learned NCS model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Model {
    pub boundaries: Vec<Boundary>,
}
