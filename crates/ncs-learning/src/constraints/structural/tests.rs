//! Tests for structural clause generation.

use super::*;
use ncs_core::{false_assignment, AssignmentExt, Coalition, RankedAlternative, RankedCriterion};
use ncs_test::RecordingMaxSat;

fn setup(
    categories_count: usize,
    criteria: Vec<RankedCriterion>,
) -> (LearningSet, CoalitionCatalog, RecordingMaxSat, Variables) {
    let learning_set = LearningSet::from_ranks(categories_count, criteria, vec![]).unwrap();
    let catalog = CoalitionCatalog::new(learning_set.criteria_count()).unwrap();
    let mut sat = RecordingMaxSat::new();
    let variables = Variables::allocate(&mut sat, &learning_set, &catalog);
    (learning_set, catalog, sat, variables)
}

#[test]
fn test_regular_criterion_rising_steps() {
    let (learning_set, _, mut sat, variables) = setup(3, vec![RankedCriterion::regular(3)]);

    let added = add_acceptance_shape_clauses(&mut sat, &learning_set, &variables);

    assert_eq!(added, 4);
    assert_eq!(sat.hard_clauses().len(), 4);
    for boundary_index in 0..2 {
        for rank in 1..3 {
            assert!(sat.contains_clause(&implies(
                variables.accepted(0, boundary_index, rank - 1),
                variables.accepted(0, boundary_index, rank),
            )));
        }
    }
}

#[test]
fn test_single_peaked_contiguity_clauses() {
    let (learning_set, _, mut sat, variables) = setup(2, vec![RankedCriterion::single_peaked(4)]);

    let added = add_acceptance_shape_clauses(&mut sat, &learning_set, &variables);

    // Pairs (0, 2), (0, 3), (1, 3)
    assert_eq!(added, 3);
    let accepted = |rank| variables.accepted(0, 0, rank);
    assert!(sat.contains_clause(&[
        accepted(0).neg_lit(),
        accepted(3).neg_lit(),
        accepted(1).pos_lit(),
        accepted(2).pos_lit(),
    ]));
}

#[test]
fn test_single_peaked_accepts_exactly_windows() {
    let (learning_set, _, mut sat, variables) = setup(2, vec![RankedCriterion::single_peaked(4)]);
    add_acceptance_shape_clauses(&mut sat, &learning_set, &variables);

    for mask in 0u32..16 {
        let mut assignment = false_assignment(sat.variables_count());
        for rank in 0..4 {
            assignment.set_var(variables.accepted(0, 0, rank), mask & (1 << rank) != 0);
        }
        let satisfied = sat
            .hard_clauses()
            .iter()
            .all(|clause| assignment.satisfies_clause(clause));
        // A window is a single run of set bits
        let is_window = mask == 0 || {
            let shifted = mask >> mask.trailing_zeros();
            shifted & (shifted + 1) == 0
        };
        assert_eq!(satisfied, is_window, "mask {:04b}", mask);
    }
}

#[test]
fn test_small_single_peaked_criteria_unconstrained() {
    let (learning_set, _, mut sat, variables) = setup(
        3,
        vec![
            RankedCriterion::single_peaked(1),
            RankedCriterion::single_peaked(2),
        ],
    );

    assert_eq!(
        add_acceptance_shape_clauses(&mut sat, &learning_set, &variables),
        0
    );
    assert!(sat.hard_clauses().is_empty());
}

#[test]
fn test_cross_boundary_clauses() {
    let (learning_set, _, mut sat, variables) = setup(4, vec![RankedCriterion::regular(2)]);

    let added = add_cross_boundary_clauses(&mut sat, &learning_set, &variables);

    // 2 ranks x (3 boundaries - 1)
    assert_eq!(added, 4);
    for rank in 0..2 {
        for boundary_index in 1..3 {
            assert!(sat.contains_clause(&implies(
                variables.accepted(0, boundary_index, rank),
                variables.accepted(0, boundary_index - 1, rank),
            )));
        }
    }
}

#[test]
fn test_single_boundary_has_no_cross_boundary_clauses() {
    let (learning_set, _, mut sat, variables) = setup(2, vec![RankedCriterion::regular(5)]);
    assert_eq!(add_cross_boundary_clauses(&mut sat, &learning_set, &variables), 0);
}

#[test]
fn test_coalition_monotonicity_matches_all_pairs() {
    let (_, catalog, mut sat, variables) = setup(2, vec![RankedCriterion::regular(2); 3]);

    let added = add_coalition_monotonicity_clauses(&mut sat, &catalog, &variables);

    // Pairs A ⊊ B over 3 criteria: 3^3 - 2^3
    assert_eq!(added, 19);
    let mut expected = 0;
    for a in catalog.iter() {
        for b in catalog.iter() {
            if a.is_proper_subset_of(b) {
                expected += 1;
                assert!(sat.contains_clause(&implies(
                    variables.sufficient(a),
                    variables.sufficient(b)
                )));
            }
        }
    }
    assert_eq!(expected, added);
}

#[test]
fn test_structural_constraints_total() {
    let (learning_set, catalog, mut sat, variables) = setup(
        3,
        vec![RankedCriterion::regular(3), RankedCriterion::single_peaked(3)],
    );

    add_structural_constraints(&mut sat, &learning_set, &catalog, &variables);

    // shape: 2 boundaries x 2 steps + 2 boundaries x 1 window clause
    // cross boundary: (3 + 3) ranks x 1
    // monotonicity: 3^2 - 2^2
    assert_eq!(sat.hard_clauses().len(), 4 + 2 + 6 + 5);
    assert!(sat.soft_clauses().is_empty());
    assert!(sat.contains_clause(&implies(
        variables.sufficient(Coalition::empty(2)),
        variables.sufficient(Coalition::full(2)),
    )));
}

#[test]
fn test_clauses_need_no_alternatives() {
    let learning_set = LearningSet::from_ranks(
        2,
        vec![RankedCriterion::regular(2)],
        vec![RankedAlternative::new(vec![1], 1)],
    )
    .unwrap();
    let catalog = CoalitionCatalog::new(1).unwrap();
    let mut with_alternative = RecordingMaxSat::new();
    let variables = Variables::allocate(&mut with_alternative, &learning_set, &catalog);
    add_structural_constraints(&mut with_alternative, &learning_set, &catalog, &variables);

    let (empty_set, empty_catalog, mut without, empty_variables) =
        setup(2, vec![RankedCriterion::regular(2)]);
    add_structural_constraints(&mut without, &empty_set, &empty_catalog, &empty_variables);

    assert_eq!(
        with_alternative.hard_clauses().len(),
        without.hard_clauses().len()
    );
}
