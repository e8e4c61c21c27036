//! Learning-set clauses and the soft objective.
//!
//! For an alternative `x` in category `k`, `correct[x]` may only be true if
//! - `x` does not cross boundary `k` (skipped when `k` is the top category):
//!   for every coalition `S`, `S` is not sufficient or `x` is rejected on some
//!   member of `S` at boundary `k`;
//! - `x` crosses boundary `k - 1` (skipped when `k` is 0): for every
//!   coalition `S`, the complement of `S` is sufficient or `x` is accepted on
//!   some member of `S` at boundary `k - 1`.
//!
//! One soft unit clause `{correct[x]}` per alternative makes the solver
//! maximize the number of correctly classified alternatives.

use ncs_core::{LearningSet, Lit, MaxSatProblem, Weight};
use smallvec::SmallVec;
use tracing::{debug_span, trace};

use crate::catalog::CoalitionCatalog;
use crate::variables::Variables;

type Clause = SmallVec<[Lit; 8]>;

/// Adds both hard clause families and the soft objective.
pub fn add_learning_set_constraints<P: MaxSatProblem>(
    sat: &mut P,
    learning_set: &LearningSet,
    catalog: &CoalitionCatalog,
    variables: &Variables,
    goal_weight: Weight,
) {
    let _span = debug_span!("add_learning_set_constraints").entered();

    let not_above = add_not_above_clauses(sat, learning_set, catalog, variables);
    let not_below = add_not_below_clauses(sat, learning_set, catalog, variables);
    let goals = add_goal_clauses(sat, learning_set, variables, goal_weight);

    trace!(
        event = "learning_set_clauses",
        not_above,
        not_below,
        goals,
    );
}

/// A correct alternative must not cross the boundary just above its category.
pub fn add_not_above_clauses<P: MaxSatProblem>(
    sat: &mut P,
    learning_set: &LearningSet,
    catalog: &CoalitionCatalog,
    variables: &Variables,
) -> usize {
    let top_category = learning_set.categories_count() - 1;
    let mut clause = Clause::new();
    let mut added = 0;

    for alternative_index in 0..learning_set.alternatives_count() {
        let category_index = learning_set.assignment(alternative_index);
        if category_index == top_category {
            continue;
        }
        let boundary_index = category_index;

        for coalition in catalog.iter() {
            clause.clear();
            // Either the coalition is not sufficient...
            clause.push(variables.sufficient(coalition).neg_lit());
            // ... or the alternative is rejected on one of its criteria...
            for criterion_index in coalition.criteria() {
                let rank = learning_set.performance_rank(criterion_index, alternative_index);
                debug_assert!(rank < learning_set.values_count(criterion_index));
                clause.push(
                    variables
                        .accepted(criterion_index, boundary_index, rank)
                        .neg_lit(),
                );
            }
            // ... or the alternative is not classified correctly.
            clause.push(variables.correct(alternative_index).neg_lit());
            sat.add_clause(&clause);
            added += 1;
        }
    }
    added
}

/// A correct alternative must cross the boundary just below its category.
pub fn add_not_below_clauses<P: MaxSatProblem>(
    sat: &mut P,
    learning_set: &LearningSet,
    catalog: &CoalitionCatalog,
    variables: &Variables,
) -> usize {
    let mut clause = Clause::new();
    let mut added = 0;

    for alternative_index in 0..learning_set.alternatives_count() {
        let category_index = learning_set.assignment(alternative_index);
        if category_index == 0 {
            continue;
        }
        let boundary_index = category_index - 1;

        for coalition in catalog.iter() {
            clause.clear();
            clause.push(variables.sufficient(coalition.complement()).pos_lit());
            for criterion_index in coalition.criteria() {
                let rank = learning_set.performance_rank(criterion_index, alternative_index);
                debug_assert!(rank < learning_set.values_count(criterion_index));
                clause.push(
                    variables
                        .accepted(criterion_index, boundary_index, rank)
                        .pos_lit(),
                );
            }
            clause.push(variables.correct(alternative_index).neg_lit());
            sat.add_clause(&clause);
            added += 1;
        }
    }
    added
}

/// One weighted unit clause `{correct[x]}` per alternative.
pub fn add_goal_clauses<P: MaxSatProblem>(
    sat: &mut P,
    learning_set: &LearningSet,
    variables: &Variables,
    goal_weight: Weight,
) -> usize {
    for alternative_index in 0..learning_set.alternatives_count() {
        sat.add_weighted_clause(&[variables.correct(alternative_index).pos_lit()], goal_weight);
    }
    learning_set.alternatives_count()
}
