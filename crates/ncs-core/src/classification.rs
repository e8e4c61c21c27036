//! Assigning alternatives to categories with an NCS model.
//!
//! An alternative reaches category `b + 1` when the criteria on which it is
//! accepted at boundary `b` form a sufficient coalition. Boundaries are tried
//! from the highest down; an alternative crossing none lands in category 0.

use crate::coalition::Coalition;
use crate::learning_set::LearningSet;
use crate::model::{AcceptedValues, Boundary, Model, PreprocessedBoundary};
use crate::problem::{Preference, Problem};

/// Category of an alternative given by its ranks, `ranks[criterion]`.
pub fn classify_ranks(boundaries: &[PreprocessedBoundary], ranks: &[u32]) -> usize {
    classify_with(boundaries, |criterion| ranks[criterion])
}

fn classify_with(boundaries: &[PreprocessedBoundary], rank_of: impl Fn(usize) -> u32) -> usize {
    boundaries
        .iter()
        .enumerate()
        .rev()
        .find(|(_, boundary)| {
            boundary
                .sufficient_coalitions
                .contains(boundary.accepted_coalition(&rank_of))
        })
        .map_or(0, |(boundary_index, _)| boundary_index + 1)
}

/// Number of alternatives of `learning_set` that `boundaries` put in their
/// true category.
pub fn count_correctly_classified(
    boundaries: &[PreprocessedBoundary],
    learning_set: &LearningSet,
) -> usize {
    (0..learning_set.alternatives_count())
        .filter(|&alternative_index| {
            let category = classify_with(boundaries, |criterion_index| {
                learning_set.performance_rank(criterion_index, alternative_index)
            });
            category == learning_set.assignment(alternative_index)
        })
        .count()
}

impl AcceptedValues {
    /// Whether `value` is accepted on a criterion with the given preference.
    pub fn accepts(&self, value: f64, preference: Preference) -> bool {
        match *self {
            AcceptedValues::Threshold(None) | AcceptedValues::Interval(None) => false,
            AcceptedValues::Threshold(Some(threshold)) => match preference {
                Preference::Decreasing => value <= threshold,
                Preference::Increasing | Preference::SinglePeaked => value >= threshold,
            },
            AcceptedValues::Interval(Some((low, high))) => low <= value && value <= high,
        }
    }
}

impl Boundary {
    fn is_crossed_by(&self, problem: &Problem, profile: &[f64]) -> bool {
        let accepted = Coalition::from_criteria(
            self.profile.len(),
            (0..self.profile.len()).filter(|&criterion_index| {
                self.profile[criterion_index].accepts(
                    profile[criterion_index],
                    problem.criteria[criterion_index].preference,
                )
            }),
        );
        self.sufficient_coalitions.contains(accepted)
    }
}

impl Model {
    /// Category of a raw alternative profile, one value per criterion of
    /// `problem`.
    pub fn classify(&self, problem: &Problem, profile: &[f64]) -> usize {
        debug_assert_eq!(profile.len(), problem.criteria_count());
        self.boundaries
            .iter()
            .enumerate()
            .rev()
            .find(|(_, boundary)| boundary.is_crossed_by(problem, profile))
            .map_or(0, |(boundary_index, _)| boundary_index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning_set::{RankedAlternative, RankedCriterion};
    use crate::model::{AcceptedRanks, SufficientCoalitions};
    use crate::problem::{Category, Criterion};

    fn majority_of_three() -> SufficientCoalitions {
        SufficientCoalitions::from_roots(vec![
            Coalition::from_criteria(3, [0, 1]),
            Coalition::from_criteria(3, [0, 2]),
            Coalition::from_criteria(3, [1, 2]),
        ])
    }

    fn two_boundaries() -> Vec<PreprocessedBoundary> {
        vec![
            PreprocessedBoundary::new(
                vec![AcceptedRanks::Threshold(1); 3],
                majority_of_three(),
            ),
            PreprocessedBoundary::new(
                vec![AcceptedRanks::Threshold(2); 3],
                majority_of_three(),
            ),
        ]
    }

    #[test]
    fn test_classify_ranks() {
        let boundaries = two_boundaries();
        assert_eq!(classify_ranks(&boundaries, &[0, 0, 2]), 0);
        assert_eq!(classify_ranks(&boundaries, &[1, 0, 1]), 1);
        assert_eq!(classify_ranks(&boundaries, &[2, 2, 0]), 2);
        assert_eq!(classify_ranks(&boundaries, &[2, 1, 0]), 1);
    }

    #[test]
    fn test_classify_without_boundaries() {
        assert_eq!(classify_ranks(&[], &[3, 1]), 0);
    }

    #[test]
    fn test_count_correctly_classified() {
        let learning_set = LearningSet::from_ranks(
            3,
            vec![RankedCriterion::regular(3); 3],
            vec![
                RankedAlternative::new(vec![0, 0, 2], 0),
                RankedAlternative::new(vec![1, 0, 1], 1),
                RankedAlternative::new(vec![2, 2, 0], 2),
                RankedAlternative::new(vec![2, 1, 0], 2),
            ],
        )
        .unwrap();

        assert_eq!(count_correctly_classified(&two_boundaries(), &learning_set), 3);
    }

    #[test]
    fn test_model_classify_values() {
        let problem = Problem::new(
            vec![
                Criterion::new("price", Preference::Decreasing),
                Criterion::new("temperature", Preference::SinglePeaked),
            ],
            vec![Category::new("no"), Category::new("yes")],
        )
        .unwrap();
        let model = Model {
            boundaries: vec![Boundary {
                profile: vec![
                    AcceptedValues::Threshold(Some(100.0)),
                    AcceptedValues::Interval(Some((18.0, 24.0))),
                ],
                sufficient_coalitions: SufficientCoalitions::from_roots(vec![Coalition::full(2)]),
            }],
        };

        assert_eq!(model.classify(&problem, &[80.0, 20.0]), 1);
        assert_eq!(model.classify(&problem, &[120.0, 20.0]), 0);
        assert_eq!(model.classify(&problem, &[80.0, 30.0]), 0);
        assert_eq!(model.classify(&problem, &[100.0, 18.0]), 1);
    }
}
