//! Schema type definitions for flags and commands.
//!
//! A [`CliSpec`] is the caller-owned description of everything the parser can
//! recognize: the global flag set and the commands with their own flag sets.
//! The types are plain data, derive [`serde`] traits, and are never mutated by
//! parsing. Parsed values live in [`ParsedInvocation`](crate::ParsedInvocation)
//! and refer back to declarations through [`FlagId`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest program path (in bytes) kept from `argv[0]`; longer paths are truncated.
pub const MAX_PROGRAM_PATH_LEN: usize = 4096;

/// Declared type of a flag's value.
///
/// Serialized in lowercase (`"bool"`, `"int32"`, `"uint8"`, `"double"`, ...).
///
/// # Examples
///
/// ```
/// use optly_core::FlagType;
///
/// assert_eq!(FlagType::default(), FlagType::Bool);
/// assert!(FlagType::Bool.is_bool());
/// assert!(!FlagType::Int32.is_bool());
/// assert_eq!(FlagType::Uint64.to_string(), "uint64");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    /// Switch; present without a value means `true`.
    #[default]
    Bool,
    /// Single character (first character of the value).
    Char,
    /// Borrowed string slice.
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl FlagType {
    /// Returns `true` for [`FlagType::Bool`].
    pub fn is_bool(self) -> bool {
        self == FlagType::Bool
    }

    /// Returns `true` if the flag needs an explicit value on the command line.
    pub fn requires_value(self) -> bool {
        !self.is_bool()
    }

    /// Lowercase type name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            FlagType::Bool => "bool",
            FlagType::Char => "char",
            FlagType::String => "string",
            FlagType::Int8 => "int8",
            FlagType::Int16 => "int16",
            FlagType::Int32 => "int32",
            FlagType::Int64 => "int64",
            FlagType::Uint8 => "uint8",
            FlagType::Uint16 => "uint16",
            FlagType::Uint32 => "uint32",
            FlagType::Uint64 => "uint64",
            FlagType::Float => "float",
            FlagType::Double => "double",
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declaration of one recognizable flag.
///
/// A flag always has a full name (`--verbose`) and may have a single-character
/// short name (`-v`). Names are stored without their dashes.
///
/// # Examples
///
/// ```
/// use optly_core::{FlagSpec, FlagType};
///
/// let verbose = FlagSpec::boolean("verbose", Some('v'))
///     .with_description("Enable verbose output");
/// assert_eq!(verbose.flag_type, FlagType::Bool);
/// assert_eq!(verbose.long_form(), "--verbose");
/// assert_eq!(verbose.short_form().as_deref(), Some("-v"));
///
/// let port = FlagSpec::with_value("port", None, FlagType::Uint16).with_default("8080");
/// assert!(port.flag_type.requires_value());
/// assert_eq!(port.default.as_deref(), Some("8080"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSpec {
    /// Long name without the leading `--` (e.g. "verbose").
    pub full_name: String,
    /// Short name without the leading `-` (e.g. 'v').
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<char>,
    /// Type the raw value is coerced into.
    #[serde(rename = "type", default)]
    pub flag_type: FlagType,
    /// Raw default literal, coerced like a command-line value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Help text shown by usage output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlagSpec {
    /// Creates a boolean flag.
    pub fn boolean(full_name: &str, short_name: Option<char>) -> Self {
        Self::with_value(full_name, short_name, FlagType::Bool)
    }

    /// Creates a flag of the given type.
    pub fn with_value(full_name: &str, short_name: Option<char>, flag_type: FlagType) -> Self {
        Self {
            full_name: full_name.to_string(),
            short_name,
            flag_type,
            default: None,
            description: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Sets the raw default literal.
    pub fn with_default(mut self, raw: &str) -> Self {
        self.default = Some(raw.to_string());
        self
    }

    /// Returns the long form as typed on the command line.
    pub fn long_form(&self) -> String {
        format!("--{}", self.full_name)
    }

    /// Returns the short form as typed on the command line, if any.
    pub fn short_form(&self) -> Option<String> {
        self.short_name.map(|c| format!("-{c}"))
    }
}

/// Declaration of a command and its own flag set.
///
/// # Examples
///
/// ```
/// use optly_core::{CommandSpec, FlagSpec, FlagType};
///
/// let download = CommandSpec::new("download")
///     .with_description("Fetch a resource")
///     .with_flag(FlagSpec::with_value("url", Some('u'), FlagType::String));
///
/// assert_eq!(download.name, "download");
/// assert_eq!(download.flags.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name as typed on the command line.
    pub name: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Flags that become resolvable once this command is selected.
    #[serde(default)]
    pub flags: Vec<FlagSpec>,
}

impl CommandSpec {
    /// Creates a command with no flags.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Adds a flag to this command's scope.
    pub fn with_flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }
}

/// Complete parser schema: global flags plus commands.
///
/// # Examples
///
/// ```
/// use optly_core::*;
///
/// let spec = CliSpec::new("app")
///     .with_global_flag(FlagSpec::boolean("help", Some('h')))
///     .with_command(CommandSpec::new("build"))
///     .with_command(CommandSpec::new("test"));
///
/// assert_eq!(spec.command_names(), vec!["build", "test"]);
/// assert_eq!(spec.flags(Scope::Global).map(|f| f.len()), Some(1));
/// assert!(spec.flags(Scope::Command(5)).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliSpec {
    /// Display name used by usage output when no program path is known.
    pub name: String,
    /// Short description of the program.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Flags resolvable before any command is selected.
    #[serde(default)]
    pub global_flags: Vec<FlagSpec>,
    /// Mutually exclusive commands.
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

impl CliSpec {
    /// Creates an empty schema.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a global flag.
    pub fn with_global_flag(mut self, flag: FlagSpec) -> Self {
        self.global_flags.push(flag);
        self
    }

    /// Adds a command.
    pub fn with_command(mut self, command: CommandSpec) -> Self {
        self.commands.push(command);
        self
    }

    /// Gets all command names in declaration order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns the flag set for a scope, or `None` for an out-of-range command.
    pub fn flags(&self, scope: Scope) -> Option<&[FlagSpec]> {
        match scope {
            Scope::Global => Some(self.global_flags.as_slice()),
            Scope::Command(index) => self.commands.get(index).map(|c| c.flags.as_slice()),
        }
    }

    /// Returns the declaration behind a flag identity.
    pub fn flag(&self, id: FlagId) -> Option<&FlagSpec> {
        self.flags(id.scope)?.get(id.index)
    }
}

/// Flag set against which flag tokens are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Scope {
    /// [`CliSpec::global_flags`].
    Global,
    /// Flags of the command at this index in [`CliSpec::commands`].
    Command(usize),
}

/// Identity of a declared flag: its scope plus declaration index.
///
/// # Examples
///
/// ```
/// use optly_core::{FlagId, Scope};
///
/// assert_eq!(FlagId::global(2).scope, Scope::Global);
/// assert_eq!(FlagId::command(1, 0).scope, Scope::Command(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FlagId {
    pub scope: Scope,
    pub index: usize,
}

impl FlagId {
    /// Identity of the `index`-th global flag.
    pub const fn global(index: usize) -> Self {
        Self {
            scope: Scope::Global,
            index,
        }
    }

    /// Identity of the `index`-th flag of the `command`-th command.
    pub const fn command(command: usize, index: usize) -> Self {
        Self {
            scope: Scope::Command(command),
            index,
        }
    }
}
