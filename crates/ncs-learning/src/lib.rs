//! NCS Learning Engine
//!
//! This crate learns Uc-NCS models by weighted MaxSAT:
//! - Coalition catalog enumerating every subset of criteria
//! - Variable allocation over a pluggable [`MaxSatProblem`] backend
//! - Structural clauses keeping any decoded model valid
//! - Learning-set clauses and the soft objective
//! - Decoding of the solver's assignment back into a model
//! - An explicit verification pass cross-checking the decoded model
//!
//! [`MaxSatProblem`]: ncs_core::MaxSatProblem

pub mod catalog;
pub mod constraints;
pub mod decode;
pub mod learning;
pub mod statistics;
pub mod variables;

pub use catalog::CoalitionCatalog;
pub use decode::{decode, root_coalitions, verify, VerificationReport};
pub use learning::{Encoded, Learned, MaxSatCoalitionsLearning};
pub use statistics::{CountingProblem, EncodingStatistics};
pub use variables::Variables;
