//! Error types for NCS learning

use thiserror::Error;

/// Main error type for NCS learning operations
#[derive(Debug, Error)]
pub enum NcsError {
    /// Error in learner configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The learning problem has more criteria than a coalition can represent
    #[error("Too many criteria: {criteria_count} (coalitions support at most {max})")]
    TooManyCriteria {
        /// Number of criteria in the learning set
        criteria_count: usize,
        /// Largest supported number of criteria
        max: usize,
    },

    /// The learning set is malformed (shape mismatch, out-of-range category)
    #[error("Invalid learning set: {0}")]
    InvalidLearningSet(String),

    /// Raw alternatives could not be ranked
    #[error("Preprocessing error: {0}")]
    Preprocessing(String),

    /// The MaxSAT solver found no assignment for the hard clauses
    #[error("Learning failure: {0}")]
    LearningFailure(String),
}

/// Result type alias for NCS learning operations
pub type Result<T> = std::result::Result<T, NcsError>;
