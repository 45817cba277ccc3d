//! Error types for the `optly` binary.

use std::path::PathBuf;

use optly_core::{InvocationError, ValidationError};
use thiserror::Error;

/// Errors that end an `optly` run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failure.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Schema file extension is neither JSON nor YAML.
    #[error("unsupported schema file '{}': expected .json, .yaml or .yml", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Schema failed validation.
    #[error("invalid schema '{}': {}", .path.display(), join_errors(.errors))]
    InvalidSpec {
        path: PathBuf,
        errors: Vec<ValidationError>,
    },

    /// `optly validate` found problems in this many files.
    #[error("{0} schema file(s) failed validation")]
    InvalidSchemas(usize),

    /// The argument vector could not be parsed at all.
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    /// `--command` named a command the schema does not declare.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// `--strict` parse produced diagnostics.
    #[error("parse produced {0} diagnostic(s)")]
    Diagnostics(usize),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
