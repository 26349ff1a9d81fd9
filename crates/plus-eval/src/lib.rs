//! plus-eval - Tree-walking evaluator.
//!
//! Runs a parsed PLUS `Program` to completion against a single flat
//! [`Environment`], writing `write` statement output to an arbitrary
//! `std::io::Write` sink. See [`evaluator`] for the full semantics.

pub mod environment;
pub mod error;
pub mod evaluator;

pub use environment::Environment;
pub use error::EvalError;
pub use evaluator::Evaluator;
