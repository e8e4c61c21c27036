//! Uc-NCS learning by MaxSAT over sufficient coalitions.
//!
//! The learner runs in typed stages so the protocol order is enforced by the
//! compiler: [`MaxSatCoalitionsLearning::encode`] allocates every variable
//! before any clause is generated, [`Encoded::solve`] runs the backend once
//! and decodes, and [`Learned`] holds the result. [`perform`] chains them.
//!
//! Logging levels:
//! - **INFO**: Learning start/end with problem scale and objective
//! - **DEBUG**: Per-stage spans, encoding size
//! - **TRACE**: Clause counts per clause family
//!
//! [`perform`]: MaxSatCoalitionsLearning::perform

use std::time::Instant;

use ncs_config::LearningConfig;
use ncs_core::{
    Assignment, AssignmentExt, LearningSet, MaxSatProblem, Model, NcsError, PreprocessedBoundary,
    Result,
};
use tracing::{debug, debug_span, info, warn};

use crate::catalog::CoalitionCatalog;
use crate::constraints::{add_learning_set_constraints, add_structural_constraints};
use crate::decode::{decode, verify, VerificationReport};
use crate::statistics::{CountingProblem, EncodingStatistics};
use crate::variables::Variables;

/// Learns a Uc-NCS model from a learning set with a MaxSAT backend.
///
/// # Example
///
/// ```
/// use ncs_config::LearningConfig;
/// use ncs_core::{LearningSet, RankedAlternative, RankedCriterion};
/// use ncs_learning::MaxSatCoalitionsLearning;
/// use ncs_maxsat::LinearSearchMaxSat;
///
/// let learning_set = LearningSet::from_ranks(
///     2,
///     vec![RankedCriterion::regular(2), RankedCriterion::regular(2)],
///     vec![
///         RankedAlternative::new(vec![1, 1], 1),
///         RankedAlternative::new(vec![0, 0], 0),
///     ],
/// ).unwrap();
///
/// let learning = MaxSatCoalitionsLearning::new(
///     &learning_set,
///     LinearSearchMaxSat::new(),
///     LearningConfig::default(),
/// ).unwrap();
/// let model = learning.perform().unwrap();
/// assert_eq!(model.boundaries.len(), 1);
/// ```
#[derive(Debug)]
pub struct MaxSatCoalitionsLearning<'a, P> {
    learning_set: &'a LearningSet,
    config: LearningConfig,
    catalog: CoalitionCatalog,
    sat: CountingProblem<P>,
}

impl<'a, P: MaxSatProblem> MaxSatCoalitionsLearning<'a, P> {
    /// Creates a learner over a fresh backend.
    ///
    /// # Errors
    ///
    /// Returns [`NcsError::Config`] for an invalid configuration and
    /// [`NcsError::TooManyCriteria`] when coalitions over the learning set's
    /// criteria cannot be represented or exceed the configured cap.
    pub fn new(learning_set: &'a LearningSet, sat: P, config: LearningConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| NcsError::Config(e.to_string()))?;
        let catalog =
            CoalitionCatalog::with_limit(learning_set.criteria_count(), config.criteria_limit())?;
        Ok(Self {
            learning_set,
            config,
            catalog,
            sat: CountingProblem::new(sat),
        })
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CoalitionCatalog {
        &self.catalog
    }

    /// Encodes, solves, decodes and post-processes.
    ///
    /// Runs the verification pass when the configuration asks for it.
    ///
    /// # Errors
    ///
    /// Returns [`NcsError::LearningFailure`] if the backend finds no
    /// assignment.
    ///
    /// # Panics
    ///
    /// With verification enabled, panics if the decoded model does not
    /// classify exactly the alternatives the assignment marks correct.
    pub fn perform(self) -> Result<Model> {
        let verify_decoded_model = self.config.verify_decoded_model;
        let learned = self.encode().solve()?;
        if verify_decoded_model {
            let report = learned.verify();
            assert!(
                report.is_consistent(),
                "decoded model disagrees with the MaxSAT assignment: {} alternatives marked correct, {} classified correctly",
                report.expected_correct,
                report.actual_correct,
            );
        }
        Ok(learned.into_model())
    }

    /// Creates every variable, then adds structural and learning-set clauses.
    pub fn encode(mut self) -> Encoded<'a, P> {
        let learning_set = self.learning_set;
        info!(
            event = "learn_start",
            criteria_count = learning_set.criteria_count(),
            categories_count = learning_set.categories_count(),
            alternatives_count = learning_set.alternatives_count(),
            coalitions_count = self.catalog.coalitions_count(),
            goal_weight = self.config.goal_weight,
        );

        let start = Instant::now();
        let variables = {
            let _span = debug_span!("create_variables").entered();
            Variables::allocate(&mut self.sat, learning_set, &self.catalog)
        };
        add_structural_constraints(&mut self.sat, learning_set, &self.catalog, &variables);
        add_learning_set_constraints(
            &mut self.sat,
            learning_set,
            &self.catalog,
            &variables,
            self.config.goal_weight,
        );
        self.sat.statistics_mut().encode_duration = start.elapsed();

        let statistics = self.sat.statistics();
        debug!(
            event = "encoded",
            variables = statistics.variables,
            hard_clauses = statistics.hard_clauses,
            soft_clauses = statistics.soft_clauses,
            literals = statistics.literals,
            encode_ms = statistics.encode_duration.as_millis() as u64,
        );

        Encoded {
            learning_set,
            catalog: self.catalog,
            variables,
            sat: self.sat,
        }
    }
}

/// A fully encoded learning problem, ready to solve.
#[derive(Debug)]
pub struct Encoded<'a, P> {
    learning_set: &'a LearningSet,
    catalog: CoalitionCatalog,
    variables: Variables,
    sat: CountingProblem<P>,
}

impl<'a, P: MaxSatProblem> Encoded<'a, P> {
    pub fn statistics(&self) -> &EncodingStatistics {
        self.sat.statistics()
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn catalog(&self) -> &CoalitionCatalog {
        &self.catalog
    }

    /// The backend holding the encoding.
    pub fn backend(&self) -> &P {
        self.sat.inner()
    }

    /// Runs the backend and decodes its assignment.
    ///
    /// # Errors
    ///
    /// Returns [`NcsError::LearningFailure`] if the backend finds no
    /// assignment satisfying the hard clauses.
    pub fn solve(mut self) -> Result<Learned<'a>> {
        let start = Instant::now();
        let solution = {
            let _span = debug_span!("solve").entered();
            self.sat.solve()
        };
        self.sat.statistics_mut().solve_duration = start.elapsed();

        let Some(assignment) = solution else {
            warn!(event = "learn_failed", reason = "no assignment");
            return Err(NcsError::LearningFailure(
                "MaxSAT solver found no assignment satisfying the hard clauses".to_string(),
            ));
        };
        debug_assert_eq!(assignment.len(), self.sat.statistics().variables);

        let boundaries = decode(
            &assignment,
            self.learning_set,
            &self.catalog,
            &self.variables,
        );
        let learned = Learned {
            learning_set: self.learning_set,
            variables: self.variables,
            assignment,
            boundaries,
            statistics: *self.sat.statistics(),
        };

        info!(
            event = "learn_end",
            correct_count = learned.correct_count(),
            alternatives_count = self.learning_set.alternatives_count(),
            roots_count = learned
                .boundaries
                .first()
                .map_or(0, |b| b.sufficient_coalitions.roots().len()),
            solve_ms = learned.statistics.solve_duration.as_millis() as u64,
        );
        Ok(learned)
    }
}

/// Decoded result of one learning invocation.
#[derive(Debug, Clone)]
pub struct Learned<'a> {
    learning_set: &'a LearningSet,
    variables: Variables,
    assignment: Assignment,
    boundaries: Vec<PreprocessedBoundary>,
    statistics: EncodingStatistics,
}

impl<'a> Learned<'a> {
    /// Rank-space boundaries, lowest first.
    pub fn boundaries(&self) -> &[PreprocessedBoundary] {
        &self.boundaries
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn statistics(&self) -> &EncodingStatistics {
        &self.statistics
    }

    /// Alternatives whose `correct` variable the solver set.
    pub fn correct_count(&self) -> usize {
        (0..self.learning_set.alternatives_count())
            .filter(|&alternative_index| {
                self.assignment
                    .var_is_true(self.variables.correct(alternative_index))
            })
            .count()
    }

    /// Cross-checks the decoded boundaries against the assignment.
    pub fn verify(&self) -> VerificationReport {
        verify(
            &self.assignment,
            self.learning_set,
            &self.variables,
            &self.boundaries,
        )
    }

    /// Maps the boundaries back to performance values.
    pub fn into_model(self) -> Model {
        self.learning_set.post_process(self.boundaries)
    }
}
