//! plus-util - Core utilities shared by every stage of the `plus` pipeline.
//!
//! This crate carries the pieces that do not belong to any one pipeline
//! stage: the arbitrary-precision [`bigint::BigInt`] kernel used uniformly
//! as the interpreter's numeric domain, source-location tracking, the
//! [`diagnostic::Diagnostic`] contract every phase's error type implements,
//! and [`index_vec::IndexVec`] for the dense integer-id spaces the LR(1)
//! toolkit manufactures (state ids, production ids, symbol ids).

pub mod bigint;
pub mod diagnostic;
pub mod index_vec;
pub mod location;

pub use bigint::{BigInt, BigIntError};
pub use diagnostic::{format_diagnostic, Diagnostic};
pub use index_vec::{Idx, IndexVec};
pub use location::SourceLocation;
