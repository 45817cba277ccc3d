//! Single-pass argument parsing.
//!
//! [`parse`] walks the argument vector left to right. Each token is classified
//! ([`classify`]), flag tokens are resolved against the active scope, and the
//! value is bound from `=value`, from the next token, or as an implicit `true`.
//! Problems are recorded as [`Diagnostic`]s and logged with `tracing`; the scan
//! always runs to the end.
//!
//! Value lookahead is greedy: when a flag has no `=value`, the next token is
//! taken as its value whenever it does not start with `-`. This means a command
//! name placed right after a value-taking flag is consumed as that flag's value
//! (`--name build` stores `"build"`, `--verbose build` reports an invalid
//! boolean). Use `--name=value` to keep a following command visible.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{Diagnostic, InvocationError, ParseError};
use crate::lexer::{Token, classify};
use crate::resolve::{FlagName, resolve};
use crate::value::{CoerceError, FlagValue, coerce};
use crate::{CliSpec, CommandSpec, FlagId, FlagSpec, MAX_PROGRAM_PATH_LEN, Scope};

/// Result of one [`parse`] call.
///
/// Borrows both the argument vector and the schema: string values are slices
/// of the arguments, and declarations are looked up through [`FlagId`]s.
#[derive(Debug, Clone)]
pub struct ParsedInvocation<'a> {
    spec: &'a CliSpec,
    program_path: &'a str,
    selected_command: Option<usize>,
    values: HashMap<FlagId, FlagValue<'a>>,
    occurrences: Vec<FlagId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ParsedInvocation<'a> {
    fn new(spec: &'a CliSpec, program_path: &'a str) -> Self {
        Self {
            spec,
            program_path,
            selected_command: None,
            values: HashMap::new(),
            occurrences: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// The schema this invocation was parsed against.
    pub fn spec(&self) -> &'a CliSpec {
        self.spec
    }

    /// `argv[0]`, cut to [`MAX_PROGRAM_PATH_LEN`] bytes.
    pub fn program_path(&self) -> &'a str {
        self.program_path
    }

    /// The selected command, if a command token matched.
    pub fn selected_command(&self) -> Option<&'a CommandSpec> {
        let spec = self.spec;
        self.selected_command.and_then(|index| spec.commands.get(index))
    }

    /// Index of the selected command in [`CliSpec::commands`].
    pub fn selected_command_index(&self) -> Option<usize> {
        self.selected_command
    }

    /// Scope that flag tokens resolved against at the end of the parse.
    pub fn active_scope(&self) -> Scope {
        self.selected_command
            .map(Scope::Command)
            .unwrap_or(Scope::Global)
    }

    /// Value of a flag: the last value written by the parse, else its default.
    pub fn value(&self, id: FlagId) -> Option<FlagValue<'a>> {
        self.explicit_value(id).or_else(|| self.default_value(id))
    }

    /// Value written by the parse, ignoring defaults.
    pub fn explicit_value(&self, id: FlagId) -> Option<FlagValue<'a>> {
        self.values.get(&id).copied()
    }

    /// Coerced default of a flag. An uncoercible default yields `None`.
    pub fn default_value(&self, id: FlagId) -> Option<FlagValue<'a>> {
        let spec = self.spec;
        let flag = spec.flag(id)?;
        let raw = flag.default.as_deref()?;
        coerce(flag.flag_type, raw).ok()
    }

    /// Returns `true` if the parse wrote a value for this flag.
    pub fn is_set(&self, id: FlagId) -> bool {
        self.values.contains_key(&id)
    }

    /// Every flag of a scope in declaration order, with its current value.
    pub fn flags(
        &self,
        scope: Scope,
    ) -> impl Iterator<Item = (FlagId, &'a FlagSpec, Option<FlagValue<'a>>)> + '_ {
        let spec = self.spec;
        spec.flags(scope)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(move |(index, flag)| {
                let id = FlagId { scope, index };
                (id, flag, self.value(id))
            })
    }

    /// Every successful write, in argument order. Repeated flags appear once
    /// per occurrence.
    pub fn occurrences(&self) -> &[FlagId] {
        &self.occurrences
    }

    /// Recoverable problems found during the parse, in argument order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if the parse produced no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Handles the token at `index`; returns how many following tokens it
    /// consumed.
    fn consume(&mut self, index: usize, arg: &'a str, next: Option<&'a str>) -> usize {
        let token = classify(arg);
        let next = next.filter(|_| token.accepts_next_value());
        match token {
            Token::Command(name) => {
                self.select_command(name);
                0
            }
            Token::Long { name, value } => self.bind_flag(index, FlagName::Long(name), value, next),
            Token::Short { name, value } => {
                self.bind_flag(index, FlagName::Short(name), value, next)
            }
            Token::Batch(cluster) => {
                self.bind_batch(index, arg, cluster);
                0
            }
        }
    }

    fn select_command(&mut self, name: &str) {
        let Some(command) = self.spec.commands.iter().position(|c| c.name == name) else {
            debug!(token = name, "ignoring token that matches no command");
            return;
        };

        if let Some(previous) = self.selected_command.filter(|&p| p != command) {
            debug!(
                previous = %self.spec.commands[previous].name,
                command = name,
                "replacing selected command"
            );
        }
        debug!(command = name, "selected command");
        self.selected_command = Some(command);
    }

    /// `next` is only `Some` when the token has no inline value.
    fn bind_flag(
        &mut self,
        index: usize,
        name: FlagName<'a>,
        inline: Option<&'a str>,
        next: Option<&'a str>,
    ) -> usize {
        let Some(id) = resolve(self.spec, self.active_scope(), name) else {
            self.report(index, ParseError::UnknownFlag(name.to_string()));
            return 0;
        };

        let lookahead = next.filter(|next| !next.starts_with('-'));
        self.bind_value(index, id, name, inline.or(lookahead));
        usize::from(lookahead.is_some())
    }

    fn bind_value(&mut self, index: usize, id: FlagId, name: FlagName<'a>, raw: Option<&'a str>) {
        let spec = self.spec;
        let Some(flag) = spec.flag(id) else {
            return;
        };

        let result = match raw {
            None if flag.flag_type.requires_value() => {
                Err(ParseError::MissingValue(name.to_string()))
            }
            None => Ok(FlagValue::Bool(true)),
            Some(raw) => coerce(flag.flag_type, raw).map_err(|err| match err {
                CoerceError::Empty => ParseError::MissingValue(name.to_string()),
                CoerceError::InvalidBoolean => ParseError::InvalidBooleanLiteral {
                    flag: name.to_string(),
                    value: raw.to_string(),
                },
                CoerceError::InvalidNumber(expected) => ParseError::InvalidNumericLiteral {
                    flag: name.to_string(),
                    value: raw.to_string(),
                    expected,
                },
            }),
        };

        match result {
            Ok(value) => self.store(index, id, name, value),
            Err(error) => self.report(index, error),
        }
    }

    fn bind_batch(&mut self, index: usize, token: &str, cluster: &str) {
        let spec = self.spec;
        let scope = self.active_scope();

        for short in cluster.chars() {
            let name = FlagName::Char(short);
            let Some(id) = resolve(spec, scope, name) else {
                self.report(index, ParseError::UnknownFlag(name.to_string()));
                continue;
            };

            if !spec.flag(id).is_some_and(|flag| flag.flag_type.is_bool()) {
                self.report(
                    index,
                    ParseError::BatchedNonBooleanFlag {
                        short,
                        token: token.to_string(),
                    },
                );
                continue;
            }

            self.store(index, id, name, FlagValue::Bool(true));
        }
    }

    fn store(&mut self, index: usize, id: FlagId, name: FlagName<'_>, value: FlagValue<'a>) {
        debug!(index, flag = %name, value = %value, "bound flag value");
        self.values.insert(id, value);
        self.occurrences.push(id);
    }

    fn report(&mut self, index: usize, error: ParseError) {
        warn!(index, error = %error, "skipping argument");
        self.diagnostics.push(Diagnostic { index, error });
    }
}

/// Parses an argument vector against a schema.
///
/// `args[0]` is the program path; the rest are scanned left to right. A path
/// longer than [`MAX_PROGRAM_PATH_LEN`] bytes is truncated. Only an empty
/// vector fails; everything else is reported through
/// [`ParsedInvocation::diagnostics`].
///
/// The schema is only read, so one [`CliSpec`] can back any number of parses,
/// including concurrent ones.
///
/// # Examples
///
/// ```
/// use optly_core::*;
///
/// let spec = CliSpec::new("app")
///     .with_global_flag(FlagSpec::boolean("help", Some('h')))
///     .with_global_flag(FlagSpec::boolean("verbose", Some('v')))
///     .with_global_flag(FlagSpec::with_value("value", Some('x'), FlagType::Int64));
///
/// let parsed = parse(&["app", "-hv", "--value=15"], &spec).unwrap();
/// assert_eq!(parsed.value(FlagId::global(0)), Some(FlagValue::Bool(true)));
/// assert_eq!(parsed.value(FlagId::global(1)), Some(FlagValue::Bool(true)));
/// assert_eq!(parsed.value(FlagId::global(2)), Some(FlagValue::I64(15)));
/// assert!(parsed.is_clean());
///
/// let empty: [&str; 0] = [];
/// assert_eq!(parse(&empty, &spec).unwrap_err(), InvocationError::EmptyArgv);
/// ```
pub fn parse<'a, S>(args: &'a [S], spec: &'a CliSpec) -> Result<ParsedInvocation<'a>, InvocationError>
where
    S: AsRef<str>,
{
    let tokens: Vec<&'a str> = args.iter().map(|arg| arg.as_ref()).collect();

    let Some(&program_path) = tokens.first() else {
        return Err(InvocationError::EmptyArgv);
    };
    let program_path = bounded_program_path(program_path);

    let mut invocation = ParsedInvocation::new(spec, program_path);
    let mut index = 1;
    while let Some(&arg) = tokens.get(index) {
        let next = tokens.get(index + 1).copied();
        let consumed = invocation.consume(index, arg, next);
        index += 1 + consumed;
    }

    debug!(
        program = program_path,
        command = ?invocation.selected_command().map(|c| c.name.as_str()),
        written = invocation.occurrences.len(),
        diagnostics = invocation.diagnostics.len(),
        "parsed arguments"
    );
    Ok(invocation)
}

/// Cuts `path` to at most [`MAX_PROGRAM_PATH_LEN`] bytes on a char boundary.
fn bounded_program_path(path: &str) -> &str {
    if path.len() <= MAX_PROGRAM_PATH_LEN {
        return path;
    }
    let end = (0..=MAX_PROGRAM_PATH_LEN)
        .rev()
        .find(|&i| path.is_char_boundary(i))
        .unwrap_or(0);
    warn!(len = path.len(), kept = end, "truncating program path");
    &path[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlagType;

    fn spec() -> CliSpec {
        CliSpec::new("app")
            .with_global_flag(FlagSpec::boolean("help", Some('h')))
            .with_global_flag(FlagSpec::boolean("verbose", Some('v')))
            .with_global_flag(FlagSpec::with_value("value", Some('x'), FlagType::Int64))
            .with_global_flag(FlagSpec::with_value("name", Some('n'), FlagType::String))
            .with_command(
                CommandSpec::new("download")
                    .with_flag(FlagSpec::with_value("url", Some('u'), FlagType::String))
                    .with_flag(FlagSpec::boolean("verbose", Some('v'))),
            )
            .with_command(CommandSpec::new("help"))
    }

    #[test]
    fn test_occurrences_record_every_write() {
        let spec = spec();
        let parsed = parse(&["app", "-x", "1", "--value=2", "-v"], &spec).unwrap();

        assert_eq!(
            parsed.occurrences(),
            &[FlagId::global(2), FlagId::global(2), FlagId::global(1)]
        );
        assert_eq!(parsed.value(FlagId::global(2)), Some(FlagValue::I64(2)));
    }

    #[test]
    fn test_failed_write_is_not_an_occurrence() {
        let spec = spec();
        let parsed = parse(&["app", "--value=abc"], &spec).unwrap();

        assert!(parsed.occurrences().is_empty());
        assert!(!parsed.is_set(FlagId::global(2)));
    }

    #[test]
    fn test_diagnostic_indexes_point_at_flag_token() {
        let spec = spec();
        let parsed = parse(&["app", "-v", "--nope", "--value"], &spec).unwrap();

        let indexes: Vec<usize> = parsed.diagnostics().iter().map(|d| d.index).collect();
        assert_eq!(indexes, vec![2, 3]);
        assert_eq!(
            parsed.diagnostics()[1].error,
            ParseError::MissingValue("--value".to_string())
        );
    }

    #[test]
    fn test_unknown_flag_does_not_consume_next_token() {
        let spec = spec();
        let parsed = parse(&["app", "--nope", "download"], &spec).unwrap();

        assert_eq!(parsed.selected_command_index(), Some(0));
    }

    #[test]
    fn test_inline_value_never_consumes_next_token() {
        let spec = spec();
        let parsed = parse(&["app", "--name=a", "download", "-h", "yes"], &spec).unwrap();

        assert_eq!(parsed.value(FlagId::global(3)), Some(FlagValue::Str("a")));
        assert_eq!(parsed.selected_command_index(), Some(0));
        // `-h` is unknown in the download scope and leaves `yes` alone.
        assert_eq!(
            parsed.diagnostics()[0].error,
            ParseError::UnknownFlag("-h".to_string())
        );
        assert_eq!(parsed.diagnostics().len(), 1);
    }

    #[test]
    fn test_later_command_token_replaces_selection() {
        let spec = spec();
        let parsed = parse(&["app", "download", "-u=x", "help"], &spec).unwrap();

        assert_eq!(parsed.selected_command().map(|c| c.name.as_str()), Some("help"));
        assert_eq!(parsed.explicit_value(FlagId::command(0, 0)), Some(FlagValue::Str("x")));
    }

    #[test]
    fn test_long_program_path_is_truncated_not_fatal() {
        let spec = spec();
        let long_path = "a".repeat(5000);
        let args = [long_path.as_str(), "--help"];
        let parsed = parse(&args, &spec).unwrap();

        assert_eq!(parsed.program_path().len(), MAX_PROGRAM_PATH_LEN);
        assert_eq!(parsed.value(FlagId::global(0)), Some(FlagValue::Bool(true)));
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_program_path_truncates_on_char_boundary() {
        // 'é' is two bytes, so the limit falls inside the last character.
        let path = format!("{}é", "a".repeat(MAX_PROGRAM_PATH_LEN - 1));

        let bounded = bounded_program_path(&path);
        assert_eq!(bounded.len(), MAX_PROGRAM_PATH_LEN - 1);
        assert!(bounded.chars().all(|c| c == 'a'));
        assert_eq!(bounded_program_path("/bin/app"), "/bin/app");
    }

    #[test]
    fn test_accepts_owned_strings() {
        let spec = spec();
        let args: Vec<String> = vec!["app".into(), "--name".into(), "Bob".into()];
        let parsed = parse(&args, &spec).unwrap();

        assert_eq!(parsed.program_path(), "app");
        assert_eq!(parsed.value(FlagId::global(3)), Some(FlagValue::Str("Bob")));
    }

    #[test]
    fn test_flags_iterates_declaration_order() {
        let spec = spec();
        let parsed = parse(&["app", "download", "--url", "u"], &spec).unwrap();

        let names: Vec<&str> = parsed
            .flags(Scope::Command(0))
            .map(|(_, flag, _)| flag.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["url", "verbose"]);
        assert_eq!(parsed.active_scope(), Scope::Command(0));
        assert_eq!(parsed.flags(Scope::Command(9)).count(), 0);
    }
}
