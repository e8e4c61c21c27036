//! Shared test fixtures for NCS learning crates.
//!
//! This crate provides a recording MaxSAT backend and learning sets for
//! testing.
//! It depends only on `ncs-core` so learner crates can use it as a
//! dev-dependency without cycles.
//!
//! - [`recording`] - backend that records clauses and replays a fixed answer
//! - [`fixtures`] - hand-written scenarios and seeded random learning sets
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! ncs-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use ncs_test::RecordingMaxSat;
//! use ncs_test::fixtures::separable_learning_set;
//! ```

pub mod fixtures;
pub mod recording;

pub use recording::RecordingMaxSat;
