//! Learning entry point that hides preprocessing and post-processing.

use ncs_config::LearningConfig;
use ncs_core::{Alternative, LearningSet, MaxSatProblem, Model, Problem, Result};
use ncs_learning::MaxSatCoalitionsLearning;
use tracing::debug;

/// Learns a Uc-NCS model of `problem` from categorized alternatives.
///
/// Ranks the alternatives, runs MaxSAT coalitions learning on `sat` and maps
/// the learned boundaries back to performance values.
///
/// # Errors
///
/// Returns [`NcsError::Preprocessing`](ncs_core::NcsError::Preprocessing) or
/// [`NcsError::InvalidLearningSet`](ncs_core::NcsError::InvalidLearningSet)
/// for unusable alternatives, and any error of
/// [`MaxSatCoalitionsLearning`].
pub fn learn<P: MaxSatProblem>(
    problem: &Problem,
    alternatives: &[Alternative],
    sat: P,
    config: LearningConfig,
) -> Result<Model> {
    #[cfg(feature = "console")]
    crate::console::init();

    let learning_set = LearningSet::from_alternatives(problem, alternatives)?;
    debug!(
        event = "preprocessed",
        values_counts = ?learning_set.values_counts(),
    );
    MaxSatCoalitionsLearning::new(&learning_set, sat, config)?.perform()
}
