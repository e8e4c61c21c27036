//! NCS Core - Core types and traits for Non-Compensatory Sorting
//!
//! This crate provides the fundamental abstractions for learning NCS models:
//! - Problem and alternative types describing raw sorting data
//! - The ranked, immutable [`LearningSet`] consumed by learners
//! - [`Coalition`] bitsets over criteria
//! - Model types, both in rank space and in value space
//! - The [`MaxSatProblem`] capability trait for pluggable MaxSAT backends,
//!   over `rustsat` variables, literals and assignments
//! - Classification of alternatives by a model

pub mod classification;
pub mod coalition;
pub mod error;
pub mod learning_set;
pub mod model;
pub mod problem;
pub mod sat;

pub use classification::{classify_ranks, count_correctly_classified};
pub use coalition::{Coalition, MAX_CRITERIA};
pub use error::{NcsError, Result};
pub use learning_set::{LearningSet, RankedAlternative, RankedCriterion};
pub use model::{
    AcceptedRanks, AcceptedValues, Boundary, Model, PreprocessedBoundary, SufficientCoalitions,
};
pub use problem::{Alternative, Category, Criterion, Preference, Problem};
pub use sat::{
    false_assignment, implies, Assignment, AssignmentExt, Lit, MaxSatProblem, TernaryVal, Var,
    Weight,
};
