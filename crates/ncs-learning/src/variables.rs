//! Decision variables of the MaxSAT encoding.

use ncs_core::{Coalition, LearningSet, MaxSatProblem, Var};
use tracing::debug;

use crate::catalog::CoalitionCatalog;

/// Variables created for one learning invocation.
///
/// - `accepted[c][b][r]`: rank `r` of criterion `c` is accepted at boundary `b`
/// - `sufficient[s]`: coalition with index `s` is sufficient
/// - `correct[a]`: alternative `a` is classified consistently
#[derive(Debug, Clone)]
pub struct Variables {
    accepted: Vec<Vec<Vec<Var>>>,
    sufficient: Vec<Var>,
    correct: Vec<Var>,
}

impl Variables {
    /// Creates every variable, then marks variable creation complete.
    ///
    /// Must be called once per backend, before any clause is added.
    pub fn allocate<P: MaxSatProblem>(
        sat: &mut P,
        learning_set: &LearningSet,
        catalog: &CoalitionCatalog,
    ) -> Self {
        let accepted: Vec<Vec<Vec<Var>>> = (0..learning_set.criteria_count())
            .map(|criterion_index| {
                (0..learning_set.boundaries_count())
                    .map(|_| {
                        (0..learning_set.values_count(criterion_index))
                            .map(|_| sat.create_variable())
                            .collect()
                    })
                    .collect()
            })
            .collect();

        let sufficient: Vec<Var> = catalog.iter().map(|_| sat.create_variable()).collect();

        let correct: Vec<Var> = (0..learning_set.alternatives_count())
            .map(|_| sat.create_variable())
            .collect();

        sat.mark_all_variables_created();

        let variables = Self {
            accepted,
            sufficient,
            correct,
        };
        debug!(
            event = "variables_created",
            accepted = variables.accepted_count(),
            sufficient = variables.sufficient.len(),
            correct = variables.correct.len(),
        );
        variables
    }

    #[inline]
    pub fn accepted(&self, criterion_index: usize, boundary_index: usize, value_rank: u32) -> Var {
        self.accepted[criterion_index][boundary_index][value_rank as usize]
    }

    #[inline]
    pub fn sufficient(&self, coalition: Coalition) -> Var {
        self.sufficient[coalition.index()]
    }

    #[inline]
    pub fn correct(&self, alternative_index: usize) -> Var {
        self.correct[alternative_index]
    }

    /// Number of `accepted` variables.
    pub fn accepted_count(&self) -> usize {
        self.accepted
            .iter()
            .flat_map(|per_boundary| per_boundary.iter().map(Vec::len))
            .sum()
    }

    /// Total number of variables.
    pub fn len(&self) -> usize {
        self.accepted_count() + self.sufficient.len() + self.correct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
