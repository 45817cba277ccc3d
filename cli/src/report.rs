//! Serializable summary of a parse, printed by `optly parse`.

use optly_core::{FlagId, FlagType, FlagValue, ParsedInvocation, Scope};
use serde::Serialize;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
pub struct ParseReport<'a> {
    pub program_path: &'a str,
    pub command: Option<&'a str>,
    pub flags: Vec<FlagReport<'a>>,
    /// Flags in the order they were written, as `--name` or `command --name`.
    pub occurrences: Vec<String>,
    pub diagnostics: Vec<DiagnosticReport>,
}

#[derive(Debug, Serialize)]
pub struct FlagReport<'a> {
    /// `"global"` or the command name.
    pub scope: &'a str,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub flag_type: FlagType,
    pub value: Option<FlagValue<'a>>,
    /// Whether the value came from the command line rather than a default.
    pub explicit: bool,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub index: usize,
    pub message: String,
}

impl<'a> ParseReport<'a> {
    /// Summarizes the global scope plus the selected command's scope.
    pub fn new(parsed: &ParsedInvocation<'a>) -> Self {
        let mut scopes = vec![Scope::Global];
        if let Some(index) = parsed.selected_command_index() {
            scopes.push(Scope::Command(index));
        }

        let flags = scopes
            .into_iter()
            .flat_map(move |scope| {
                let scope_name = scope_label(parsed, scope);
                parsed.flags(scope).map(move |(id, flag, value)| FlagReport {
                    scope: scope_name,
                    name: flag.full_name.as_str(),
                    flag_type: flag.flag_type,
                    value,
                    explicit: parsed.is_set(id),
                })
            })
            .collect();

        let occurrences = parsed
            .occurrences()
            .iter()
            .map(|&id| occurrence_label(parsed, id))
            .collect();

        let diagnostics = parsed
            .diagnostics()
            .iter()
            .map(|d| DiagnosticReport {
                index: d.index,
                message: d.error.to_string(),
            })
            .collect();

        Self {
            program_path: parsed.program_path(),
            command: parsed.selected_command().map(|c| c.name.as_str()),
            flags,
            occurrences,
            diagnostics,
        }
    }

    pub fn render(&self, format: OutputFormat) -> crate::error::Result<String> {
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
            OutputFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }
}

fn scope_label<'a>(parsed: &ParsedInvocation<'a>, scope: Scope) -> &'a str {
    let spec = parsed.spec();
    match scope {
        Scope::Global => "global",
        Scope::Command(index) => spec
            .commands
            .get(index)
            .map(|c| c.name.as_str())
            .unwrap_or("global"),
    }
}

fn occurrence_label(parsed: &ParsedInvocation<'_>, id: FlagId) -> String {
    let spec = parsed.spec();
    let name = spec.flag(id).map(|f| f.long_form()).unwrap_or_default();
    match id.scope {
        Scope::Global => name,
        Scope::Command(_) => format!("{} {name}", scope_label(parsed, id.scope)),
    }
}

#[cfg(test)]
mod tests {
    use optly_core::{CliSpec, CommandSpec, FlagSpec, parse};

    use super::*;

    #[test]
    fn test_report_lists_global_and_selected_scopes() {
        let spec = CliSpec::new("app")
            .with_global_flag(FlagSpec::boolean("verbose", Some('v')))
            .with_command(CommandSpec::new("idle").with_flag(FlagSpec::boolean("quiet", None)))
            .with_command(
                CommandSpec::new("download")
                    .with_flag(FlagSpec::with_value("url", Some('u'), FlagType::String))
                    .with_flag(FlagSpec::with_value("retries", None, FlagType::Uint8).with_default("3")),
            );
        let parsed = parse(&["app", "--verbose=yes", "download", "-u", "x", "--bogus"], &spec).unwrap();
        let report = ParseReport::new(&parsed);

        assert_eq!(report.command, Some("download"));
        let names: Vec<(&str, &str, bool)> = report
            .flags
            .iter()
            .map(|f| (f.scope, f.name, f.explicit))
            .collect();
        assert_eq!(
            names,
            vec![
                ("global", "verbose", true),
                ("download", "url", true),
                ("download", "retries", false),
            ]
        );
        assert_eq!(report.flags[2].value, Some(FlagValue::U8(3)));
        assert_eq!(report.occurrences, vec!["--verbose", "download --url"]);
        assert_eq!(report.diagnostics[0].index, 5);
        assert_eq!(report.diagnostics[0].message, "unknown flag: --bogus");
    }

    #[test]
    fn test_report_renders_json_values_untagged() {
        let spec = CliSpec::new("app")
            .with_global_flag(FlagSpec::with_value("value", Some('x'), FlagType::Int64));
        let parsed = parse(&["app", "-x", "42"], &spec).unwrap();
        let json = ParseReport::new(&parsed).render(OutputFormat::Json).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(doc["flags"][0]["value"], serde_json::json!(42));
        assert_eq!(doc["flags"][0]["type"], serde_json::json!("int64"));
        assert_eq!(doc["command"], serde_json::Value::Null);
    }
}
