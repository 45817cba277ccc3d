//! Schema validation.
//!
//! Validates structural invariants of a [`CliSpec`] before it is used for
//! parsing: flag and command names must be non-empty and unambiguous within
//! their scope, and defaults must coerce to the declared type. The parser does
//! not require a validated schema (on duplicates the first declaration wins),
//! but duplicates make later declarations unreachable.
//!
//! # Examples
//!
//! ```
//! use optly_core::*;
//!
//! let spec = CliSpec::new("app").with_global_flag(FlagSpec::boolean("verbose", Some('v')));
//! assert!(validate_spec(&spec).is_empty());
//!
//! // Invalid: two flags share the short name `v`
//! let bad = spec.with_global_flag(FlagSpec::boolean("version", Some('v')));
//! assert_eq!(
//!     validate_spec(&bad),
//!     vec![ValidationError::DuplicateShortName { scope: "global".into(), short: 'v' }]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CliSpec, FlagSpec, coerce};

/// Schema validation errors.
///
/// `scope` is `"global"` for global flags and the command name otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Flag full name is empty or whitespace-only.
    #[error("flag with empty name in scope {scope}")]
    EmptyFlagName { scope: String },
    /// Flag full name starts with `-` or contains `=` or whitespace.
    #[error("invalid flag name in scope {scope}: {name}")]
    InvalidFlagName { scope: String, name: String },
    /// Short name is `-`, `=`, or whitespace.
    #[error("invalid short name for flag --{flag}: {short:?}")]
    InvalidShortName { flag: String, short: char },
    /// Two flags in one scope share a full name.
    #[error("duplicate flag in scope {scope}: --{name}")]
    DuplicateFlag { scope: String, name: String },
    /// Two flags in one scope share a short name.
    #[error("duplicate short flag in scope {scope}: -{short}")]
    DuplicateShortName { scope: String, short: char },
    /// Default literal does not coerce to the flag's type.
    #[error("invalid default for flag --{flag}: {value}")]
    InvalidDefault { flag: String, value: String },
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Command name starts with `-` and could never be selected.
    #[error("invalid command name: {0}")]
    InvalidCommandName(String),
    /// Two commands share a name.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
}

/// Validates a schema, returning every problem found.
///
/// # Examples
///
/// ```
/// use optly_core::*;
///
/// let spec = CliSpec::new("app")
///     .with_command(CommandSpec::new("build"))
///     .with_command(CommandSpec::new("build"));
///
/// let errors = validate_spec(&spec);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateCommand(_))));
/// ```
pub fn validate_spec(spec: &CliSpec) -> Vec<ValidationError> {
    let mut errors = validate_flags("global", &spec.global_flags);

    let mut seen: HashSet<&str> = HashSet::new();
    for command in &spec.commands {
        let name = command.name.as_str();
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyCommandName);
        } else if name.starts_with('-') {
            errors.push(ValidationError::InvalidCommandName(name.to_string()));
        } else if !seen.insert(name) {
            errors.push(ValidationError::DuplicateCommand(name.to_string()));
        }

        errors.extend(validate_flags(name, &command.flags));
    }

    errors
}

fn validate_flags(scope: &str, flags: &[FlagSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut names = HashSet::new();
    let mut shorts = HashSet::new();

    for flag in flags {
        let name = flag.full_name.as_str();
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyFlagName {
                scope: scope.to_string(),
            });
        } else if name.starts_with('-') || name.contains('=') || name.contains(char::is_whitespace)
        {
            errors.push(ValidationError::InvalidFlagName {
                scope: scope.to_string(),
                name: name.to_string(),
            });
        } else if !names.insert(name) {
            errors.push(ValidationError::DuplicateFlag {
                scope: scope.to_string(),
                name: name.to_string(),
            });
        }

        if let Some(short) = flag.short_name {
            if short == '-' || short == '=' || short.is_whitespace() {
                errors.push(ValidationError::InvalidShortName {
                    flag: name.to_string(),
                    short,
                });
            } else if !shorts.insert(short) {
                errors.push(ValidationError::DuplicateShortName {
                    scope: scope.to_string(),
                    short,
                });
            }
        }

        if let Some(default) = &flag.default {
            if coerce(flag.flag_type, default).is_err() {
                errors.push(ValidationError::InvalidDefault {
                    flag: name.to_string(),
                    value: default.clone(),
                });
            }
        }
    }

    errors
}
