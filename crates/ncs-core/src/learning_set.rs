//! Ranked learning sets.
//!
//! Learners never see raw performance values. Each criterion's distinct values
//! are replaced by their rank, `0` being the worst, so every criterion becomes
//! a small integer domain. The sorted value table is kept to map learned ranks
//! back to values in [`LearningSet::post_process`].

use crate::error::{NcsError, Result};
use crate::model::{AcceptedRanks, AcceptedValues, Boundary, Model, PreprocessedBoundary};
use crate::problem::{Alternative, Preference, Problem};

/// Rank-domain metadata of one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedCriterion {
    pub values_count: u32,
    pub single_peaked: bool,
}

impl RankedCriterion {
    /// A criterion where a higher rank is always at least as good.
    pub fn regular(values_count: u32) -> Self {
        Self {
            values_count,
            single_peaked: false,
        }
    }

    /// A criterion whose accepted ranks form a window.
    pub fn single_peaked(values_count: u32) -> Self {
        Self {
            values_count,
            single_peaked: true,
        }
    }
}

/// An alternative given directly by its ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedAlternative {
    pub ranks: Vec<u32>,
    pub category_index: usize,
}

impl RankedAlternative {
    pub fn new(ranks: Vec<u32>, category_index: usize) -> Self {
        Self {
            ranks,
            category_index,
        }
    }
}

/// An immutable, ranked learning set.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningSet {
    categories_count: usize,
    alternatives_count: usize,
    values_counts: Vec<u32>,
    single_peaked: Vec<bool>,
    decreasing: Vec<bool>,
    /// Indexed `[criterion][alternative]`.
    performance_ranks: Vec<Vec<u32>>,
    assignments: Vec<usize>,
    /// Indexed `[criterion][rank]`.
    rank_values: Vec<Vec<f64>>,
}

impl LearningSet {
    /// Builds a learning set from already ranked data.
    ///
    /// Rank `r` post-processes to the value `r as f64`.
    ///
    /// # Errors
    ///
    /// Returns [`NcsError::InvalidLearningSet`] when there are no categories,
    /// a criterion has no values, or an alternative has the wrong number of
    /// ranks, an out-of-range rank or an out-of-range category.
    pub fn from_ranks(
        categories_count: usize,
        criteria: Vec<RankedCriterion>,
        alternatives: Vec<RankedAlternative>,
    ) -> Result<Self> {
        if categories_count == 0 {
            return Err(invalid("at least one category is required"));
        }
        let criteria_count = criteria.len();
        let mut performance_ranks = vec![Vec::with_capacity(alternatives.len()); criteria_count];
        let mut assignments = Vec::with_capacity(alternatives.len());

        for (criterion_index, criterion) in criteria.iter().enumerate() {
            if criterion.values_count == 0 {
                return Err(invalid(format!(
                    "criterion {} has no values",
                    criterion_index
                )));
            }
        }

        for (alternative_index, alternative) in alternatives.into_iter().enumerate() {
            if alternative.ranks.len() != criteria_count {
                return Err(invalid(format!(
                    "alternative {} has {} ranks, expected {}",
                    alternative_index,
                    alternative.ranks.len(),
                    criteria_count
                )));
            }
            if alternative.category_index >= categories_count {
                return Err(invalid(format!(
                    "alternative {} is in category {}, but there are only {} categories",
                    alternative_index, alternative.category_index, categories_count
                )));
            }
            for (criterion_index, &rank) in alternative.ranks.iter().enumerate() {
                if rank >= criteria[criterion_index].values_count {
                    return Err(invalid(format!(
                        "alternative {} has rank {} on criterion {} with {} values",
                        alternative_index,
                        rank,
                        criterion_index,
                        criteria[criterion_index].values_count
                    )));
                }
                performance_ranks[criterion_index].push(rank);
            }
            assignments.push(alternative.category_index);
        }

        let rank_values = criteria
            .iter()
            .map(|criterion| (0..criterion.values_count).map(f64::from).collect())
            .collect();

        Ok(Self {
            categories_count,
            alternatives_count: assignments.len(),
            values_counts: criteria.iter().map(|c| c.values_count).collect(),
            single_peaked: criteria.iter().map(|c| c.single_peaked).collect(),
            decreasing: vec![false; criteria_count],
            performance_ranks,
            assignments,
            rank_values,
        })
    }

    /// Ranks raw alternatives of `problem`.
    ///
    /// Per criterion, distinct performance values are sorted from worst to
    /// best (decreasing criteria are reversed; single-peaked criteria keep the
    /// natural order) and each value is replaced by its position.
    ///
    /// # Errors
    ///
    /// Returns [`NcsError::Preprocessing`] for NaN performances and
    /// [`NcsError::InvalidLearningSet`] for a problem without categories or
    /// alternatives without a category or with a profile of the wrong length.
    pub fn from_alternatives(problem: &Problem, alternatives: &[Alternative]) -> Result<Self> {
        if problem.categories_count() == 0 {
            return Err(invalid("at least one category is required"));
        }
        let criteria_count = problem.criteria_count();
        let mut assignments = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            if alternative.profile.len() != criteria_count {
                return Err(invalid(format!(
                    "alternative '{}' has {} performances, expected {}",
                    alternative.name,
                    alternative.profile.len(),
                    criteria_count
                )));
            }
            let category_index = alternative.category_index.ok_or_else(|| {
                invalid(format!("alternative '{}' has no category", alternative.name))
            })?;
            if category_index >= problem.categories_count() {
                return Err(invalid(format!(
                    "alternative '{}' is in category {}, but there are only {} categories",
                    alternative.name,
                    category_index,
                    problem.categories_count()
                )));
            }
            assignments.push(category_index);
        }

        let mut values_counts = Vec::with_capacity(criteria_count);
        let mut performance_ranks = Vec::with_capacity(criteria_count);
        let mut rank_values = Vec::with_capacity(criteria_count);

        for (criterion_index, criterion) in problem.criteria.iter().enumerate() {
            let mut values: Vec<f64> = Vec::with_capacity(alternatives.len());
            for alternative in alternatives {
                let value = alternative.profile[criterion_index];
                if value.is_nan() {
                    return Err(NcsError::Preprocessing(format!(
                        "alternative '{}' has a NaN performance on criterion '{}'",
                        alternative.name, criterion.name
                    )));
                }
                values.push(value);
            }
            values.sort_by(f64::total_cmp);
            values.dedup();
            if criterion.preference == Preference::Decreasing {
                values.reverse();
            }

            let ranks = alternatives
                .iter()
                .map(|alternative| {
                    let value = alternative.profile[criterion_index];
                    let position = if criterion.preference == Preference::Decreasing {
                        values.partition_point(|&v| v > value)
                    } else {
                        values.partition_point(|&v| v < value)
                    };
                    position as u32
                })
                .collect();

            // An empty learning set still needs a non-empty rank domain.
            values_counts.push(values.len().max(1) as u32);
            performance_ranks.push(ranks);
            rank_values.push(values);
        }

        Ok(Self {
            categories_count: problem.categories_count(),
            alternatives_count: alternatives.len(),
            values_counts,
            single_peaked: problem
                .criteria
                .iter()
                .map(|criterion| criterion.is_single_peaked())
                .collect(),
            decreasing: problem
                .criteria
                .iter()
                .map(|criterion| criterion.preference == Preference::Decreasing)
                .collect(),
            performance_ranks,
            assignments,
            rank_values,
        })
    }

    pub fn criteria_count(&self) -> usize {
        self.values_counts.len()
    }

    pub fn categories_count(&self) -> usize {
        self.categories_count
    }

    pub fn boundaries_count(&self) -> usize {
        self.categories_count.saturating_sub(1)
    }

    pub fn alternatives_count(&self) -> usize {
        self.alternatives_count
    }

    pub fn values_counts(&self) -> &[u32] {
        &self.values_counts
    }

    #[inline]
    pub fn values_count(&self, criterion_index: usize) -> u32 {
        self.values_counts[criterion_index]
    }

    #[inline]
    pub fn is_single_peaked(&self, criterion_index: usize) -> bool {
        self.single_peaked[criterion_index]
    }

    #[inline]
    pub fn performance_rank(&self, criterion_index: usize, alternative_index: usize) -> u32 {
        self.performance_ranks[criterion_index][alternative_index]
    }

    /// True category of an alternative.
    #[inline]
    pub fn assignment(&self, alternative_index: usize) -> usize {
        self.assignments[alternative_index]
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Value of `rank` on a criterion, or `None` past the last rank.
    pub fn rank_value(&self, criterion_index: usize, rank: u32) -> Option<f64> {
        self.rank_values[criterion_index].get(rank as usize).copied()
    }

    /// Maps rank-space boundaries back to performance values.
    ///
    /// A criterion with no observed value has a single placeholder rank that
    /// stands for every value: accepting it post-processes to an unbounded
    /// threshold or interval, rejecting it to `None`.
    pub fn post_process(&self, boundaries: Vec<PreprocessedBoundary>) -> Model {
        let boundaries = boundaries
            .into_iter()
            .map(|boundary| {
                let profile = boundary
                    .profile_ranks
                    .iter()
                    .enumerate()
                    .map(|(criterion_index, accepted)| {
                        self.accepted_values(criterion_index, *accepted)
                    })
                    .collect();
                Boundary {
                    profile,
                    sufficient_coalitions: boundary.sufficient_coalitions,
                }
            })
            .collect();
        Model { boundaries }
    }

    fn accepted_values(&self, criterion_index: usize, accepted: AcceptedRanks) -> AcceptedValues {
        if self.rank_values[criterion_index].is_empty() {
            let accepts_all = accepted.accepts(0);
            let unbounded = if self.decreasing[criterion_index] {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
            return match accepted {
                AcceptedRanks::Threshold(_) => {
                    AcceptedValues::Threshold(accepts_all.then_some(unbounded))
                }
                AcceptedRanks::Interval { .. } => AcceptedValues::Interval(
                    accepts_all.then_some((f64::NEG_INFINITY, f64::INFINITY)),
                ),
            };
        }
        match accepted {
            AcceptedRanks::Threshold(rank) => {
                AcceptedValues::Threshold(self.rank_value(criterion_index, rank))
            }
            AcceptedRanks::Interval { low, high } => AcceptedValues::Interval(
                self.rank_value(criterion_index, low)
                    .zip(self.rank_value(criterion_index, high)),
            ),
        }
    }
}

fn invalid(message: impl Into<String>) -> NcsError {
    NcsError::InvalidLearningSet(message.into())
}
