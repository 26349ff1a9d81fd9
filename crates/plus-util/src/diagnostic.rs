//! Shared diagnostic-formatting contract.
//!
//! Every phase of the pipeline (lexer, parser, evaluator) defines its own
//! closed `Error` enum with `thiserror`, per spec: lexical errors, literal
//! conversion errors, parse errors, and runtime errors are never expected
//! to recover, so there is no generic `Diagnostic` collector here — each
//! phase just returns `Result<T, E>` and the first `Err` stops the
//! pipeline. What *is* shared is the one-line wire format the driver uses
//! to print any of those errors to the error sink, and the
//! [`Diagnostic`] trait each phase's error type implements so the driver
//! can format it without matching on every concrete error type.

use crate::location::SourceLocation;

/// Implemented by every phase's error type so `plus-drv` can print a
/// uniform `path:line:column: error: kind: message` line regardless of
/// which phase the error came from.
pub trait Diagnostic: std::error::Error {
    /// Where the error occurred, if the phase had a location to attach
    /// (grammar build-time errors, for instance, have none).
    fn location(&self) -> Option<&SourceLocation>;

    /// A short, closed-set tag naming the error kind (e.g.
    /// `"UndeclaredIdentifier"`).
    fn kind(&self) -> &'static str;
}

/// Formats `diag` as one line: source path, 1-based line, 0-based
/// column, and a human-readable kind.
pub fn format_diagnostic(diag: &(impl Diagnostic + ?Sized)) -> String {
    match diag.location() {
        Some(loc) => format!("{loc}: error: {}: {diag}", diag.kind()),
        None => format!("error: {}: {diag}", diag.kind()),
    }
}
