//! Error types for parsing.
//!
//! [`ParseError`]s are recoverable: they are collected as [`Diagnostic`]s on
//! the parse result and never stop the scan. [`InvocationError`] is the only
//! failure that prevents a result from being built.

use std::fmt;

use thiserror::Error;

use crate::FlagType;

/// A recoverable, per-token parse problem.
///
/// Flag names are reported as written (`--value`, `-x`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No flag in the active scope matches the token.
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    /// A non-boolean flag had no inline or following value.
    #[error("missing value for flag: {0}")]
    MissingValue(String),
    /// A boolean value outside the truthy/falsy literal sets.
    #[error("invalid boolean value for flag {flag}: {value}")]
    InvalidBooleanLiteral { flag: String, value: String },
    /// A numeric value that failed conversion.
    #[error("invalid {expected} value for flag {flag}: {value}")]
    InvalidNumericLiteral {
        flag: String,
        value: String,
        expected: FlagType,
    },
    /// A non-boolean flag inside a short-flag cluster.
    #[error("cannot batch non-boolean flag -{short} (in {token})")]
    BatchedNonBooleanFlag { short: char, token: String },
}

/// A [`ParseError`] tagged with the index of the argument that caused it.
///
/// Indexes count from the program path, so the first real argument is `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub index: usize,
    pub error: ParseError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "argument {}: {}", self.index, self.error)
    }
}

/// Fatal precondition failures of [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// The argument vector did not contain the program path.
    #[error("argument vector is empty: expected the program path as the first element")]
    EmptyArgv,
}
