//! Decoding a MaxSAT assignment into model boundaries.

use ncs_core::{
    count_correctly_classified, AcceptedRanks, Assignment, AssignmentExt, Coalition, LearningSet,
    PreprocessedBoundary, SufficientCoalitions,
};
use tracing::debug_span;

use crate::catalog::CoalitionCatalog;
use crate::variables::Variables;

/// Sufficient coalitions with no sufficient proper subset.
pub fn root_coalitions(
    assignment: &Assignment,
    catalog: &CoalitionCatalog,
    variables: &Variables,
) -> Vec<Coalition> {
    let is_sufficient =
        |coalition: Coalition| assignment.var_is_true(variables.sufficient(coalition));
    catalog
        .iter()
        .filter(|&coalition| {
            is_sufficient(coalition)
                && !coalition
                    .proper_subsets()
                    .any(|subset| is_sufficient(subset))
        })
        .collect()
}

/// Rank-space boundaries encoded by `assignment`, sharing one family of
/// sufficient coalitions.
pub fn decode(
    assignment: &Assignment,
    learning_set: &LearningSet,
    catalog: &CoalitionCatalog,
    variables: &Variables,
) -> Vec<PreprocessedBoundary> {
    let _span = debug_span!("decode").entered();

    let sufficient_coalitions =
        SufficientCoalitions::from_roots(root_coalitions(assignment, catalog, variables));

    (0..learning_set.boundaries_count())
        .map(|boundary_index| {
            let profile_ranks = (0..learning_set.criteria_count())
                .map(|criterion_index| {
                    decode_accepted_ranks(
                        assignment,
                        learning_set,
                        variables,
                        criterion_index,
                        boundary_index,
                    )
                })
                .collect();
            PreprocessedBoundary::new(profile_ranks, sufficient_coalitions.clone())
        })
        .collect()
}

fn decode_accepted_ranks(
    assignment: &Assignment,
    learning_set: &LearningSet,
    variables: &Variables,
    criterion_index: usize,
    boundary_index: usize,
) -> AcceptedRanks {
    let values_count = learning_set.values_count(criterion_index);
    let single_peaked = learning_set.is_single_peaked(criterion_index);
    let mut accepted_ranks = (0..values_count)
        .filter(|&rank| assignment.var_is_true(variables.accepted(criterion_index, boundary_index, rank)));

    let Some(low) = accepted_ranks.next() else {
        return AcceptedRanks::reject_all(values_count, single_peaked);
    };
    if single_peaked {
        let high = accepted_ranks.last().unwrap_or(low);
        AcceptedRanks::Interval { low, high }
    } else {
        AcceptedRanks::Threshold(low)
    }
}

/// Outcome of cross-checking a decoded model against its assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationReport {
    /// Alternatives whose `correct` variable is true.
    pub expected_correct: usize,
    /// Alternatives the decoded boundaries actually classify correctly.
    pub actual_correct: usize,
}

impl VerificationReport {
    /// A mismatch means the encoding and the decoder disagree.
    pub fn is_consistent(&self) -> bool {
        self.expected_correct == self.actual_correct
    }
}

/// Recounts correctly classified alternatives with the decoded boundaries and
/// compares with the assignment's `correct` variables.
///
/// Equal counts are expected for an optimal assignment.
pub fn verify(
    assignment: &Assignment,
    learning_set: &LearningSet,
    variables: &Variables,
    boundaries: &[PreprocessedBoundary],
) -> VerificationReport {
    let _span = debug_span!("verify").entered();

    let expected_correct = (0..learning_set.alternatives_count())
        .filter(|&alternative_index| assignment.var_is_true(variables.correct(alternative_index)))
        .count();
    let actual_correct = count_correctly_classified(boundaries, learning_set);
    VerificationReport {
        expected_correct,
        actual_correct,
    }
}

#[cfg(test)]
mod tests;
