//! NCS - Non-Compensatory Sorting model learning in Rust
//!
//! Learns Uc-NCS models (one shared family of sufficient coalitions) from
//! alternatives with known categories by encoding the learning problem as
//! weighted MaxSAT. [`LinearSearchMaxSat`] solves the encoding with MiniSat;
//! other solvers plug in by implementing [`MaxSatProblem`].
//!
//! # Example
//!
//! ```rust
//! use ncs::prelude::*;
//!
//! let problem = Problem::new(
//!     vec![Criterion::new("quality", Preference::Increasing)],
//!     vec![Category::new("bad"), Category::new("good")],
//! )
//! .unwrap();
//! let alternatives = vec![
//!     Alternative::new("a", vec![1.0], Some(0)),
//!     Alternative::new("b", vec![3.0], Some(1)),
//! ];
//!
//! let model = learn(
//!     &problem,
//!     &alternatives,
//!     LinearSearchMaxSat::new(),
//!     LearningConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(model.classify(&problem, &[5.0]), 1);
//! ```

// Domain and model types
pub use ncs_core::{
    classify_ranks, count_correctly_classified, AcceptedRanks, AcceptedValues, Alternative,
    Boundary, Category, Coalition, Criterion, LearningSet, Model, NcsError, Preference,
    PreprocessedBoundary, Problem, RankedAlternative, RankedCriterion, Result,
    SufficientCoalitions, MAX_CRITERIA,
};

// MaxSAT interface implemented by solver backends
pub use ncs_core::{
    false_assignment, implies, Assignment, AssignmentExt, Lit, MaxSatProblem, TernaryVal, Var,
    Weight,
};

pub use ncs_maxsat::{BackendError, LinearSearchMaxSat};

pub use ncs_config::{ConfigError, LearningConfig};

pub use ncs_learning::{
    CoalitionCatalog, Encoded, EncodingStatistics, Learned, MaxSatCoalitionsLearning,
    VerificationReport,
};

#[cfg(feature = "console")]
pub mod console;

mod learn;
pub use learn::learn;

pub mod prelude {
    pub use super::learn;
    pub use super::{
        Alternative, Category, Criterion, LearningConfig, LinearSearchMaxSat, MaxSatProblem, Model,
        NcsError, Preference, Problem,
    };
}
