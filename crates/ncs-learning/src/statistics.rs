//! Encoding statistics.
//!
//! [`CountingProblem`] wraps any backend and tallies what the learner sends
//! through it, so encoding size can be inspected without knowing the backend.

use std::time::Duration;

use ncs_core::{Assignment, Lit, MaxSatProblem, Var, Weight};

/// Size of an encoding and time spent on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodingStatistics {
    /// Variables created.
    pub variables: usize,
    /// Hard clauses added.
    pub hard_clauses: usize,
    /// Soft (weighted) clauses added.
    pub soft_clauses: usize,
    /// Literals over all clauses, hard and soft.
    pub literals: usize,
    /// Time spent creating variables and clauses.
    pub encode_duration: Duration,
    /// Time spent in the backend's `solve`.
    pub solve_duration: Duration,
}

impl EncodingStatistics {
    /// Whether two encodings have the same size, ignoring timings.
    pub fn same_size_as(&self, other: &EncodingStatistics) -> bool {
        self.variables == other.variables
            && self.hard_clauses == other.hard_clauses
            && self.soft_clauses == other.soft_clauses
            && self.literals == other.literals
    }
}

/// A backend wrapper counting variables, clauses and literals.
#[derive(Debug, Clone, Default)]
pub struct CountingProblem<P> {
    inner: P,
    statistics: EncodingStatistics,
}

impl<P> CountingProblem<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            statistics: EncodingStatistics::default(),
        }
    }

    pub fn statistics(&self) -> &EncodingStatistics {
        &self.statistics
    }

    pub(crate) fn statistics_mut(&mut self) -> &mut EncodingStatistics {
        &mut self.statistics
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: MaxSatProblem> MaxSatProblem for CountingProblem<P> {
    fn create_variable(&mut self) -> Var {
        self.statistics.variables += 1;
        self.inner.create_variable()
    }

    fn mark_all_variables_created(&mut self) {
        self.inner.mark_all_variables_created();
    }

    fn add_clause(&mut self, clause: &[Lit]) {
        self.statistics.hard_clauses += 1;
        self.statistics.literals += clause.len();
        self.inner.add_clause(clause);
    }

    fn add_weighted_clause(&mut self, clause: &[Lit], weight: Weight) {
        self.statistics.soft_clauses += 1;
        self.statistics.literals += clause.len();
        self.inner.add_weighted_clause(clause, weight);
    }

    fn solve(&mut self) -> Option<Assignment> {
        self.inner.solve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncs_test::RecordingMaxSat;

    #[test]
    fn test_counts_forwarded_calls() {
        let mut sat = CountingProblem::new(RecordingMaxSat::new());
        let a = sat.create_variable();
        let b = sat.create_variable();
        sat.mark_all_variables_created();
        sat.add_clause(&[a.pos_lit(), b.neg_lit()]);
        sat.add_clause(&[b.pos_lit()]);
        sat.add_weighted_clause(&[a.pos_lit()], 3);

        let statistics = *sat.statistics();
        assert_eq!(statistics.variables, 2);
        assert_eq!(statistics.hard_clauses, 2);
        assert_eq!(statistics.soft_clauses, 1);
        assert_eq!(statistics.literals, 4);

        let inner = sat.into_inner();
        assert_eq!(inner.variables_count(), 2);
        assert_eq!(inner.hard_clauses().len(), 2);
        assert_eq!(inner.soft_clauses().len(), 1);
    }

    #[test]
    fn test_same_size_ignores_timings() {
        let fast = EncodingStatistics {
            variables: 4,
            hard_clauses: 2,
            encode_duration: Duration::from_millis(1),
            ..Default::default()
        };
        let slow = EncodingStatistics {
            encode_duration: Duration::from_secs(1),
            ..fast
        };
        assert!(fast.same_size_as(&slow));
        assert!(!fast.same_size_as(&EncodingStatistics::default()));
    }
}
