//! Learning sets for tests.
//!
//! Hand-written scenarios with known optimal models, and seeded random
//! learning sets generated from a random Uc-NCS model so that a perfect
//! model is known to exist.

use ncs_core::{
    classify_ranks, AcceptedRanks, Coalition, LearningSet, PreprocessedBoundary,
    RankedAlternative, RankedCriterion, SufficientCoalitions,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Two regular criteria with two ranks each and two categories.
///
/// The good category holds exactly the alternative best on both criteria,
/// so the only perfect models need both criteria.
pub fn both_criteria_required() -> LearningSet {
    LearningSet::from_ranks(
        2,
        vec![RankedCriterion::regular(2), RankedCriterion::regular(2)],
        vec![
            RankedAlternative::new(vec![1, 1], 1),
            RankedAlternative::new(vec![0, 1], 0),
            RankedAlternative::new(vec![1, 0], 0),
            RankedAlternative::new(vec![0, 0], 0),
        ],
    )
    .expect("valid learning set")
}

/// One single-peaked criterion with three ranks where only the middle rank
/// belongs to the good category.
pub fn single_peaked_middle_rank() -> LearningSet {
    LearningSet::from_ranks(
        2,
        vec![RankedCriterion::single_peaked(3)],
        vec![
            RankedAlternative::new(vec![0], 0),
            RankedAlternative::new(vec![1], 1),
            RankedAlternative::new(vec![2], 0),
        ],
    )
    .expect("valid learning set")
}

/// Two alternatives with identical ranks in different categories.
pub fn contradictory_twins() -> LearningSet {
    LearningSet::from_ranks(
        2,
        vec![RankedCriterion::regular(2), RankedCriterion::regular(2)],
        vec![
            RankedAlternative::new(vec![1, 0], 0),
            RankedAlternative::new(vec![1, 0], 1),
        ],
    )
    .expect("valid learning set")
}

/// A random Uc-NCS model in rank space.
///
/// Regular thresholds are non-decreasing from boundary to boundary and
/// single-peaked windows are nested around a common peak, so acceptance at a
/// boundary implies acceptance at every lower one. The sufficient family is
/// the upward closure of up to three random non-empty coalitions.
pub fn random_model(
    rng: &mut impl Rng,
    criteria: &[RankedCriterion],
    categories_count: usize,
) -> Vec<PreprocessedBoundary> {
    let boundaries_count = categories_count.saturating_sub(1);
    let criteria_count = criteria.len();

    let per_criterion: Vec<Vec<AcceptedRanks>> = criteria
        .iter()
        .map(|criterion| random_acceptance(&mut *rng, *criterion, boundaries_count))
        .collect();

    let sufficient_coalitions = random_sufficient_coalitions(&mut *rng, criteria_count);

    (0..boundaries_count)
        .map(|boundary_index| {
            PreprocessedBoundary::new(
                per_criterion
                    .iter()
                    .map(|accepted| accepted[boundary_index])
                    .collect(),
                sufficient_coalitions.clone(),
            )
        })
        .collect()
}

fn random_acceptance(
    rng: &mut impl Rng,
    criterion: RankedCriterion,
    boundaries_count: usize,
) -> Vec<AcceptedRanks> {
    let values_count = criterion.values_count;
    if criterion.single_peaked {
        let peak = rng.random_range(0..values_count);
        let mut lows: Vec<u32> = (0..boundaries_count)
            .map(|_| rng.random_range(0..=peak))
            .collect();
        let mut highs: Vec<u32> = (0..boundaries_count)
            .map(|_| rng.random_range(peak..values_count))
            .collect();
        lows.sort_unstable();
        highs.sort_unstable_by(|a, b| b.cmp(a));
        lows.into_iter()
            .zip(highs)
            .map(|(low, high)| AcceptedRanks::Interval { low, high })
            .collect()
    } else {
        let mut thresholds: Vec<u32> = (0..boundaries_count)
            .map(|_| rng.random_range(0..=values_count))
            .collect();
        thresholds.sort_unstable();
        thresholds.into_iter().map(AcceptedRanks::Threshold).collect()
    }
}

fn random_sufficient_coalitions(rng: &mut impl Rng, criteria_count: usize) -> SufficientCoalitions {
    if criteria_count == 0 {
        return SufficientCoalitions::from_roots(vec![Coalition::empty(0)]);
    }
    let full_bits = (1u32 << criteria_count) - 1;
    let mut generators: Vec<Coalition> = (0..rng.random_range(1..=3))
        .map(|_| Coalition::new(criteria_count, rng.random_range(1..=full_bits)))
        .collect();
    generators.sort_by_key(|coalition| coalition.bits());
    generators.dedup();

    let roots = generators
        .iter()
        .copied()
        .filter(|candidate| {
            !generators
                .iter()
                .any(|other| other.is_proper_subset_of(*candidate))
        })
        .collect();
    SufficientCoalitions::from_roots(roots)
}

/// A learning set perfectly classified by a random model, with that model.
///
/// Same seed, same learning set.
pub fn separable_learning_set(
    seed: u64,
    criteria: &[RankedCriterion],
    categories_count: usize,
    alternatives_count: usize,
) -> (LearningSet, Vec<PreprocessedBoundary>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let model = random_model(&mut rng, criteria, categories_count);

    let alternatives = (0..alternatives_count)
        .map(|_| {
            let ranks: Vec<u32> = criteria
                .iter()
                .map(|criterion| rng.random_range(0..criterion.values_count))
                .collect();
            let category_index = classify_ranks(&model, &ranks);
            RankedAlternative::new(ranks, category_index)
        })
        .collect();

    let learning_set = LearningSet::from_ranks(categories_count, criteria.to_vec(), alternatives)
        .expect("generated alternatives are in range");
    (learning_set, model)
}

/// A learning set with uniformly random labels; usually not separable.
pub fn noisy_learning_set(
    seed: u64,
    criteria: &[RankedCriterion],
    categories_count: usize,
    alternatives_count: usize,
) -> LearningSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let alternatives = (0..alternatives_count)
        .map(|_| {
            let ranks = criteria
                .iter()
                .map(|criterion| rng.random_range(0..criterion.values_count))
                .collect();
            RankedAlternative::new(ranks, rng.random_range(0..categories_count))
        })
        .collect();
    LearningSet::from_ranks(categories_count, criteria.to_vec(), alternatives)
        .expect("generated alternatives are in range")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separable_learning_set_is_deterministic() {
        let criteria = [RankedCriterion::regular(3), RankedCriterion::single_peaked(3)];
        let (a, model_a) = separable_learning_set(7, &criteria, 3, 10);
        let (b, model_b) = separable_learning_set(7, &criteria, 3, 10);
        assert_eq!(a, b);
        assert_eq!(model_a, model_b);
    }

    #[test]
    fn test_generating_model_classifies_perfectly() {
        let criteria = [
            RankedCriterion::regular(3),
            RankedCriterion::regular(2),
            RankedCriterion::single_peaked(4),
        ];
        for seed in 0..20 {
            let (learning_set, model) = separable_learning_set(seed, &criteria, 3, 12);
            assert_eq!(
                ncs_core::count_correctly_classified(&model, &learning_set),
                learning_set.alternatives_count()
            );
        }
    }

    #[test]
    fn test_random_model_is_nested() {
        let criteria = [RankedCriterion::regular(4), RankedCriterion::single_peaked(5)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let model = random_model(&mut rng, &criteria, 4);
            assert_eq!(model.len(), 3);
            for pair in model.windows(2) {
                for criterion_index in 0..criteria.len() {
                    let values_count = criteria[criterion_index].values_count;
                    for rank in 0..values_count {
                        if pair[1].profile_ranks[criterion_index].accepts(rank) {
                            assert!(pair[0].profile_ranks[criterion_index].accepts(rank));
                        }
                    }
                }
            }
            let roots = model[0].sufficient_coalitions.roots();
            assert!(!roots.is_empty());
            assert!(roots.iter().all(|root| !root.is_empty()));
        }
    }

    #[test]
    fn test_scenarios_are_valid() {
        assert_eq!(both_criteria_required().alternatives_count(), 4);
        assert!(single_peaked_middle_rank().is_single_peaked(0));
        let twins = contradictory_twins();
        assert_eq!(twins.performance_rank(0, 0), twins.performance_rank(0, 1));
    }
}
