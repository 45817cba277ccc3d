//! Minimal end-to-end example.
//!
//! Declares two global flags and a `download` command, parses the process
//! arguments, and prints what was bound.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p optly-demos --example simple -- -v=12 download --url https://example.com -s
//! cargo run -p optly-demos --example simple -- help
//! ```

use optly_core::{
    CliSpec, CommandSpec, FlagId, FlagSpec, FlagType, ParsedInvocation, parse,
    render_command_usage, render_usage,
};

const VALUE: FlagId = FlagId::global(0);
const SWITCH: FlagId = FlagId::global(1);
const HELP: usize = 0;
const DOWNLOAD: usize = 1;
const DOWNLOAD_URL: FlagId = FlagId::command(DOWNLOAD, 0);
const DOWNLOAD_SWITCH: FlagId = FlagId::command(DOWNLOAD, 1);

fn build_spec() -> CliSpec {
    CliSpec::new("simple")
        .with_global_flag(
            FlagSpec::with_value("value", Some('v'), FlagType::Uint32)
                .with_default("0")
                .with_description("A number to echo back"),
        )
        .with_global_flag(FlagSpec::boolean("switch", Some('s')))
        .with_command(CommandSpec::new("help").with_description("Print usage"))
        .with_command(
            CommandSpec::new("download")
                .with_description("Pretend to fetch a URL")
                .with_flag(
                    FlagSpec::with_value("url", Some('u'), FlagType::String)
                        .with_description("Resource to fetch"),
                )
                .with_flag(FlagSpec::boolean("switch", Some('s'))),
        )
}

fn main() {
    let spec = build_spec();
    let argv: Vec<String> = std::env::args().collect();

    let parsed = match parse(&argv, &spec) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    for diagnostic in parsed.diagnostics() {
        eprintln!("warning: {diagnostic}");
    }

    if parsed.selected_command_index() == Some(HELP) {
        print!("{}", render_usage(parsed.program_path(), &spec));
        return;
    }

    print_summary(&parsed);

    if parsed.selected_command_index() == Some(DOWNLOAD) && !parsed.is_set(DOWNLOAD_URL) {
        eprintln!();
        eprint!("{}", render_command_usage(parsed.program_path(), &spec.commands[DOWNLOAD]));
    }
}

fn print_summary(parsed: &ParsedInvocation<'_>) {
    println!("Binary: {}", parsed.program_path());
    if let Some(command) = parsed.selected_command() {
        println!("Command: {}", command.name);
    }

    let show = |id| parsed.value(id).map(|v| v.to_string()).unwrap_or_else(|| "-".into());
    println!("Value  = {}", show(VALUE));
    println!("Switch = {}", show(SWITCH));
    println!();
    println!("Download url    = {}", show(DOWNLOAD_URL));
    println!("Download switch = {}", show(DOWNLOAD_SWITCH));
}
