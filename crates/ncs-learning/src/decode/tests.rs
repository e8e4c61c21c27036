//! Tests for assignment decoding and verification.

use super::*;
use ncs_core::{false_assignment, RankedAlternative, RankedCriterion};
use ncs_test::RecordingMaxSat;

fn setup(
    criteria: Vec<RankedCriterion>,
    alternatives: Vec<RankedAlternative>,
) -> (LearningSet, CoalitionCatalog, Variables, Assignment) {
    let learning_set = LearningSet::from_ranks(2, criteria, alternatives).unwrap();
    let catalog = CoalitionCatalog::new(learning_set.criteria_count()).unwrap();
    let mut sat = RecordingMaxSat::new();
    let variables = Variables::allocate(&mut sat, &learning_set, &catalog);
    let assignment = false_assignment(sat.variables_count());
    (learning_set, catalog, variables, assignment)
}

#[test]
fn test_roots_of_upward_closed_family() {
    let (_, catalog, variables, mut assignment) =
        setup(vec![RankedCriterion::regular(2); 3], vec![]);
    for coalition in catalog.iter() {
        let sufficient = Coalition::from_criteria(3, [0, 1]).is_subset_of(coalition)
            || coalition.contains(2);
        assignment.set_var(variables.sufficient(coalition), sufficient);
    }

    let roots = root_coalitions(&assignment, &catalog, &variables);

    assert_eq!(
        roots,
        vec![
            Coalition::from_criteria(3, [0, 1]),
            Coalition::from_criteria(3, [2]),
        ]
    );
}

#[test]
fn test_roots_form_antichain() {
    let (_, catalog, variables, mut assignment) =
        setup(vec![RankedCriterion::regular(2); 3], vec![]);
    for coalition in [
        Coalition::from_criteria(3, [0]),
        Coalition::from_criteria(3, [0, 1]),
        Coalition::from_criteria(3, [1]),
        Coalition::full(3),
    ] {
        assignment.set_var(variables.sufficient(coalition), true);
    }

    let roots = root_coalitions(&assignment, &catalog, &variables);

    assert_eq!(
        roots,
        vec![
            Coalition::from_criteria(3, [0]),
            Coalition::from_criteria(3, [1]),
        ]
    );
    for a in &roots {
        for b in &roots {
            assert!(!a.is_proper_subset_of(*b));
        }
    }
}

#[test]
fn test_no_sufficient_coalition() {
    let (_, catalog, variables, assignment) = setup(vec![RankedCriterion::regular(2); 2], vec![]);
    assert!(root_coalitions(&assignment, &catalog, &variables).is_empty());
}

#[test]
fn test_decode_regular_threshold() {
    let (learning_set, catalog, variables, mut assignment) = setup(
        vec![RankedCriterion::regular(3), RankedCriterion::regular(3)],
        vec![],
    );
    assignment.set_var(variables.accepted(0, 0, 1), true);
    assignment.set_var(variables.accepted(0, 0, 2), true);

    let boundaries = decode(&assignment, &learning_set, &catalog, &variables);

    assert_eq!(boundaries.len(), 1);
    assert_eq!(
        boundaries[0].profile_ranks,
        vec![AcceptedRanks::Threshold(1), AcceptedRanks::Threshold(3)]
    );
}

#[test]
fn test_decode_single_peaked_interval() {
    let (learning_set, catalog, variables, mut assignment) = setup(
        vec![
            RankedCriterion::single_peaked(3),
            RankedCriterion::single_peaked(3),
        ],
        vec![],
    );
    assignment.set_var(variables.accepted(0, 0, 1), true);

    let boundaries = decode(&assignment, &learning_set, &catalog, &variables);

    assert_eq!(
        boundaries[0].profile_ranks,
        vec![
            AcceptedRanks::Interval { low: 1, high: 1 },
            AcceptedRanks::Interval { low: 3, high: 3 },
        ]
    );
}

#[test]
fn test_decode_single_peaked_wide_window() {
    let (learning_set, catalog, variables, mut assignment) =
        setup(vec![RankedCriterion::single_peaked(5)], vec![]);
    for rank in 1..4 {
        assignment.set_var(variables.accepted(0, 0, rank), true);
    }

    let boundaries = decode(&assignment, &learning_set, &catalog, &variables);

    assert_eq!(
        boundaries[0].profile_ranks,
        vec![AcceptedRanks::Interval { low: 1, high: 3 }]
    );
}

#[test]
fn test_boundaries_share_coalitions() {
    let learning_set =
        LearningSet::from_ranks(4, vec![RankedCriterion::regular(2); 2], vec![]).unwrap();
    let catalog = CoalitionCatalog::new(2).unwrap();
    let mut sat = RecordingMaxSat::new();
    let variables = Variables::allocate(&mut sat, &learning_set, &catalog);
    let mut assignment = false_assignment(sat.variables_count());
    assignment.set_var(variables.sufficient(Coalition::full(2)), true);

    let boundaries = decode(&assignment, &learning_set, &catalog, &variables);

    assert_eq!(boundaries.len(), 3);
    for boundary in &boundaries {
        assert_eq!(
            boundary.sufficient_coalitions.roots(),
            &[Coalition::full(2)]
        );
    }
}

#[test]
fn test_verify_consistent_assignment() {
    let (learning_set, catalog, variables, mut assignment) = setup(
        vec![RankedCriterion::regular(2); 2],
        vec![
            RankedAlternative::new(vec![1, 1], 1),
            RankedAlternative::new(vec![0, 0], 0),
        ],
    );
    for criterion_index in 0..2 {
        assignment.set_var(variables.accepted(criterion_index, 0, 1), true);
    }
    assignment.set_var(variables.sufficient(Coalition::full(2)), true);
    assignment.set_var(variables.correct(0), true);
    assignment.set_var(variables.correct(1), true);

    let boundaries = decode(&assignment, &learning_set, &catalog, &variables);
    let report = verify(&assignment, &learning_set, &variables, &boundaries);

    assert_eq!(report.expected_correct, 2);
    assert_eq!(report.actual_correct, 2);
    assert!(report.is_consistent());
}

#[test]
fn test_verify_detects_mismatch() {
    let (learning_set, catalog, variables, mut assignment) = setup(
        vec![RankedCriterion::regular(2); 2],
        vec![
            RankedAlternative::new(vec![1, 1], 1),
            RankedAlternative::new(vec![0, 0], 0),
        ],
    );
    // Nothing is sufficient, so the first alternative lands in category 0,
    // yet it claims to be correct.
    assignment.set_var(variables.correct(0), true);
    assignment.set_var(variables.correct(1), true);

    let boundaries = decode(&assignment, &learning_set, &catalog, &variables);
    let report = verify(&assignment, &learning_set, &variables, &boundaries);

    assert_eq!(report.expected_correct, 2);
    assert_eq!(report.actual_correct, 1);
    assert!(!report.is_consistent());
}
