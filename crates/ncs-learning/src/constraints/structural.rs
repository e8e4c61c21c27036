//! Structural clauses.
//!
//! These hold for every valid Uc-NCS model whatever the learning set says:
//! - regular criteria accept a rising step of ranks
//! - single-peaked criteria accept a contiguous window of ranks
//! - a rank accepted at a boundary is accepted at every lower boundary
//! - supersets of sufficient coalitions are sufficient
//!
//! There is no clause forbidding a coalition from being both sufficient and
//! insufficient; the objective takes care of that.

use ncs_core::{implies, LearningSet, MaxSatProblem};
use tracing::{debug_span, trace};

use crate::catalog::CoalitionCatalog;
use crate::variables::Variables;

/// Adds every structural clause.
pub fn add_structural_constraints<P: MaxSatProblem>(
    sat: &mut P,
    learning_set: &LearningSet,
    catalog: &CoalitionCatalog,
    variables: &Variables,
) {
    let _span = debug_span!("add_structural_constraints").entered();

    let shape = add_acceptance_shape_clauses(sat, learning_set, variables);
    let cross_boundary = add_cross_boundary_clauses(sat, learning_set, variables);
    let monotonicity = add_coalition_monotonicity_clauses(sat, catalog, variables);

    trace!(
        event = "structural_clauses",
        shape,
        cross_boundary,
        monotonicity,
    );
}

/// Per criterion and boundary: rising steps for regular criteria, contiguous
/// windows for single-peaked ones. Returns the number of clauses added.
pub fn add_acceptance_shape_clauses<P: MaxSatProblem>(
    sat: &mut P,
    learning_set: &LearningSet,
    variables: &Variables,
) -> usize {
    let mut added = 0;
    for criterion_index in 0..learning_set.criteria_count() {
        let values_count = learning_set.values_count(criterion_index);

        if learning_set.is_single_peaked(criterion_index) {
            // With fewer than 3 ranks every accepted set is already a window.
            if values_count < 3 {
                continue;
            }
            for boundary_index in 0..learning_set.boundaries_count() {
                let accepted = |rank| variables.accepted(criterion_index, boundary_index, rank);
                // If a and c are accepted, so are a+1 or c-1; by induction
                // on c - a, everything in between.
                for rank_a in 0..values_count - 2 {
                    for rank_c in rank_a + 2..values_count {
                        sat.add_clause(&[
                            accepted(rank_a).neg_lit(),
                            accepted(rank_c).neg_lit(),
                            accepted(rank_a + 1).pos_lit(),
                            accepted(rank_c - 1).pos_lit(),
                        ]);
                        added += 1;
                    }
                }
            }
        } else {
            for boundary_index in 0..learning_set.boundaries_count() {
                for rank in 1..values_count {
                    sat.add_clause(&implies(
                        variables.accepted(criterion_index, boundary_index, rank - 1),
                        variables.accepted(criterion_index, boundary_index, rank),
                    ));
                    added += 1;
                }
            }
        }
    }
    added
}

/// A rank accepted at boundary `b` is accepted at boundary `b - 1`.
pub fn add_cross_boundary_clauses<P: MaxSatProblem>(
    sat: &mut P,
    learning_set: &LearningSet,
    variables: &Variables,
) -> usize {
    let mut added = 0;
    for criterion_index in 0..learning_set.criteria_count() {
        for rank in 0..learning_set.values_count(criterion_index) {
            for boundary_index in 1..learning_set.boundaries_count() {
                sat.add_clause(&implies(
                    variables.accepted(criterion_index, boundary_index, rank),
                    variables.accepted(criterion_index, boundary_index - 1, rank),
                ));
                added += 1;
            }
        }
    }
    added
}

/// `sufficient[A] ⇒ sufficient[B]` for every proper subset `A` of `B`.
///
/// Walks each coalition's proper supersets directly instead of testing all
/// pairs, which costs `3^n` instead of `4^n` for the same clauses.
pub fn add_coalition_monotonicity_clauses<P: MaxSatProblem>(
    sat: &mut P,
    catalog: &CoalitionCatalog,
    variables: &Variables,
) -> usize {
    let mut added = 0;
    for coalition_a in catalog.iter() {
        for coalition_b in coalition_a.proper_supersets() {
            sat.add_clause(&implies(
                variables.sufficient(coalition_a),
                variables.sufficient(coalition_b),
            ));
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests;
