//! Clause generation.
//!
//! - [`structural`] - hard clauses every decoded model must satisfy,
//!   independent of the training data
//! - [`learning_set`] - hard clauses linking each alternative's true category
//!   to its `correct` variable, plus the soft objective

pub mod learning_set;
pub mod structural;

pub use learning_set::add_learning_set_constraints;
pub use structural::add_structural_constraints;
