//! Schema-driven command-line argument parsing.
//!
//! This crate turns a raw argument vector into a selected command plus typed
//! flag values, using a caller-supplied schema:
//!
//! - [`CliSpec`]: global flags plus mutually exclusive commands.
//! - [`CommandSpec`]: a command with its own flag set.
//! - [`FlagSpec`]: a flag with a full name (`--verbose`), an optional short
//!   name (`-v`), a [`FlagType`], and an optional default.
//!
//! [`parse`] performs one left-to-right pass and returns a
//! [`ParsedInvocation`] holding the selected command, the coerced
//! [`FlagValue`]s keyed by [`FlagId`], the order in which flags were written,
//! and any recoverable [`Diagnostic`]s. The schema is never mutated.
//!
//! Supported syntax: `--name`, `--name=value`, `--name value`, `-n`,
//! `-n=value`, `-n value`, and batched boolean short flags (`-abc`).
//!
//! Validation ([`validate_spec`]) catches duplicate and malformed names and
//! bad defaults. Usage text comes from [`render_usage`] and
//! [`render_command_usage`].
//!
//! # Example
//!
//! ```
//! use optly_core::*;
//!
//! let spec = CliSpec::new("app")
//!     .with_global_flag(FlagSpec::boolean("verbose", Some('v')))
//!     .with_command(
//!         CommandSpec::new("download")
//!             .with_flag(FlagSpec::with_value("url", Some('u'), FlagType::String))
//!             .with_flag(FlagSpec::with_value("retries", None, FlagType::Uint8).with_default("3")),
//!     );
//! assert!(validate_spec(&spec).is_empty());
//!
//! let argv = ["app", "-v", "download", "--url", "https://example.com"];
//! let parsed = parse(&argv, &spec).unwrap();
//!
//! assert_eq!(parsed.selected_command().map(|c| c.name.as_str()), Some("download"));
//! assert_eq!(parsed.value(FlagId::global(0)), Some(FlagValue::Bool(true)));
//! assert_eq!(
//!     parsed.value(FlagId::command(0, 0)).and_then(|v| v.as_str()),
//!     Some("https://example.com")
//! );
//! assert_eq!(parsed.value(FlagId::command(0, 1)), Some(FlagValue::U8(3)));
//! assert!(parsed.is_clean());
//! ```

mod error;
mod lexer;
mod parser;
mod resolve;
mod types;
mod usage;
mod validate;
mod value;

pub use error::{Diagnostic, InvocationError, ParseError};
pub use lexer::{Token, classify};
pub use parser::{ParsedInvocation, parse};
pub use types::*;
pub use usage::{render_command_usage, render_usage, write_command_usage, write_usage};
pub use validate::{ValidationError, validate_spec};
pub use value::{CoerceError, FALSY_LITERALS, FlagValue, TRUTHY_LITERALS, coerce, parse_bool};
