//! Usage text rendering.
//!
//! Lists commands and flags in declaration order. Rendering never affects
//! parsing; it only reads the schema.

use std::io::{self, Write};
use std::path::Path;

use crate::{CliSpec, CommandSpec, FlagSpec};

/// Renders the top-level usage block.
///
/// # Examples
///
/// ```
/// use optly_core::*;
///
/// let spec = CliSpec::new("app")
///     .with_global_flag(FlagSpec::with_value("value", Some('v'), FlagType::Uint32))
///     .with_global_flag(FlagSpec::boolean("switch", None))
///     .with_command(CommandSpec::new("download"));
///
/// let usage = render_usage("/usr/local/bin/app", &spec);
/// assert_eq!(
///     usage,
///     "app [FLAGS] <COMMAND> [COMMAND FLAGS]\n\
///      COMMANDS\n  download\n\
///      FLAGS\n  -v --value\n     --switch\n"
/// );
/// ```
pub fn render_usage(program_path: &str, spec: &CliSpec) -> String {
    render_to_string(|out| write_usage(out, program_path, spec))
}

/// Renders the usage block for one command.
///
/// # Examples
///
/// ```
/// use optly_core::*;
///
/// let download = CommandSpec::new("download")
///     .with_flag(FlagSpec::with_value("url", Some('u'), FlagType::String).with_description("Source URL"));
///
/// assert_eq!(
///     render_command_usage("app", &download),
///     "app [FLAGS] download [COMMAND FLAGS]\nFLAGS\n  -u --url  Source URL\n"
/// );
/// ```
pub fn render_command_usage(program_path: &str, command: &CommandSpec) -> String {
    render_to_string(|out| write_command_usage(out, program_path, command))
}

fn render_to_string(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
    let mut out = Vec::new();
    // Writes into a Vec cannot fail.
    let _ = write(&mut out);
    String::from_utf8_lossy(&out).into_owned()
}

/// Writes the top-level usage block.
pub fn write_usage<W: Write>(out: &mut W, program_path: &str, spec: &CliSpec) -> io::Result<()> {
    let program = program_name(program_path);
    if spec.commands.is_empty() {
        writeln!(out, "{program} [FLAGS]")?;
    } else {
        writeln!(out, "{program} [FLAGS] <COMMAND> [COMMAND FLAGS]")?;
        writeln!(out, "COMMANDS")?;
        let rows: Vec<(String, Option<&str>)> = spec
            .commands
            .iter()
            .map(|c| (c.name.clone(), c.description.as_deref()))
            .collect();
        write_rows(out, &rows)?;
    }
    write_flags(out, &spec.global_flags)
}

/// Writes the usage block for one command.
pub fn write_command_usage<W: Write>(
    out: &mut W,
    program_path: &str,
    command: &CommandSpec,
) -> io::Result<()> {
    let program = program_name(program_path);
    writeln!(out, "{program} [FLAGS] {} [COMMAND FLAGS]", command.name)?;
    write_flags(out, &command.flags)
}

fn write_flags<W: Write>(out: &mut W, flags: &[FlagSpec]) -> io::Result<()> {
    if flags.is_empty() {
        return Ok(());
    }
    writeln!(out, "FLAGS")?;
    let rows: Vec<(String, Option<&str>)> = flags
        .iter()
        .map(|f| (flag_label(f), f.description.as_deref()))
        .collect();
    write_rows(out, &rows)
}

/// Writes indented rows, aligning descriptions into one column.
fn write_rows<W: Write>(out: &mut W, rows: &[(String, Option<&str>)]) -> io::Result<()> {
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, description) in rows {
        match description {
            Some(desc) => writeln!(out, "  {label:<width$}  {desc}")?,
            None => writeln!(out, "  {label}")?,
        }
    }
    Ok(())
}

fn flag_label(flag: &FlagSpec) -> String {
    match flag.short_name {
        Some(short) => format!("-{short} --{}", flag.full_name),
        None => format!("   --{}", flag.full_name),
    }
}

/// Base name of the program path, like `basename(3)`.
fn program_name(program_path: &str) -> &str {
    Path::new(program_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlagType;

    #[test]
    fn test_usage_without_commands() {
        let spec = CliSpec::new("tool").with_global_flag(FlagSpec::boolean("help", Some('h')));

        assert_eq!(render_usage("tool", &spec), "tool [FLAGS]\nFLAGS\n  -h --help\n");
    }

    #[test]
    fn test_usage_aligns_descriptions() {
        let spec = CliSpec::new("tool")
            .with_global_flag(FlagSpec::boolean("help", Some('h')).with_description("Print help"))
            .with_global_flag(
                FlagSpec::with_value("output", None, FlagType::String).with_description("Output file"),
            );

        let usage = render_usage("./tool", &spec);
        assert_eq!(
            usage,
            "tool [FLAGS]\nFLAGS\n  -h --help    Print help\n     --output  Output file\n"
        );
    }

    #[test]
    fn test_usage_lists_commands_in_declaration_order() {
        let spec = CliSpec::new("tool")
            .with_command(CommandSpec::new("zeta"))
            .with_command(CommandSpec::new("alpha").with_description("First letter"));

        let usage = render_usage("tool", &spec);
        assert_eq!(
            usage,
            "tool [FLAGS] <COMMAND> [COMMAND FLAGS]\nCOMMANDS\n  zeta\n  alpha  First letter\n"
        );
    }

    #[test]
    fn test_program_name_falls_back_to_raw_path() {
        assert_eq!(program_name("/opt/bin/app"), "app");
        assert_eq!(program_name(""), "");
        assert_eq!(program_name("/"), "/");
    }

    #[test]
    fn test_write_command_usage_without_flags() {
        let mut out = Vec::new();
        write_command_usage(&mut out, "app", &CommandSpec::new("help")).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "app [FLAGS] help [COMMAND FLAGS]\n");
    }

    #[test]
    fn test_render_matches_written_output() {
        let download = CommandSpec::new("download")
            .with_flag(FlagSpec::with_value("url", Some('u'), FlagType::String));
        let spec = CliSpec::new("app")
            .with_global_flag(FlagSpec::boolean("help", Some('h')))
            .with_command(download.clone());

        let mut top = Vec::new();
        write_usage(&mut top, "/bin/app", &spec).unwrap();
        assert_eq!(render_usage("/bin/app", &spec).as_bytes(), top.as_slice());

        let mut command = Vec::new();
        write_command_usage(&mut command, "/bin/app", &download).unwrap();
        assert_eq!(render_command_usage("/bin/app", &download).as_bytes(), command.as_slice());
    }
}
