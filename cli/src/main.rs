mod error;
mod report;
mod spec_file;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use optly_core::{parse, render_command_usage, render_usage, validate_spec};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};
use crate::report::{OutputFormat, ParseReport};
use crate::spec_file::{load_spec, load_validated_spec};

#[derive(Debug, Parser)]
#[command(name = "optly")]
#[command(about = "Parse argument vectors against a declarative CLI schema")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an argument vector and print the bound flag values.
    Parse(ParseArgs),
    /// Print the usage block for a schema or one of its commands.
    Usage(UsageArgs),
    /// Validate one or more schema files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema file (.json, .yaml or .yml).
    #[arg(long)]
    spec: PathBuf,
    /// Report format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Exit with an error when the parse produced diagnostics.
    #[arg(long)]
    strict: bool,
    /// Argument vector to parse; the first element is the program path.
    #[arg(last = true, required = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Schema file (.json, .yaml or .yml).
    #[arg(long)]
    spec: PathBuf,
    /// Print usage for this command instead of the top level.
    #[arg(long)]
    command: Option<String>,
    /// Program path shown in the invocation line (default: schema name).
    #[arg(long)]
    program: Option<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files to check.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Usage(args) => run_usage(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let spec = load_validated_spec(&args.spec)?;
    let parsed = parse(&args.argv, &spec)?;
    let report = ParseReport::new(&parsed);
    println!("{}", report.render(args.format)?);

    let diagnostics = parsed.diagnostics().len();
    if args.strict && diagnostics > 0 {
        return Err(CliError::Diagnostics(diagnostics));
    }
    Ok(())
}

fn run_usage(args: UsageArgs) -> Result<()> {
    let spec = load_validated_spec(&args.spec)?;
    let program = args.program.as_deref().unwrap_or(&spec.name);

    let usage = match args.command {
        Some(name) => {
            let command = spec
                .commands
                .iter()
                .find(|c| c.name == name)
                .ok_or(CliError::UnknownCommand(name))?;
            render_command_usage(program, command)
        }
        None => render_usage(program, &spec),
    };
    print!("{usage}");
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<()> {
    let mut failures = Vec::new();
    for path in &args.inputs {
        let spec = load_spec(path)?;
        let errors = validate_spec(&spec);
        if errors.is_empty() {
            info!(path = %path.display(), "schema is valid");
        } else {
            failures.push(CliError::InvalidSpec {
                path: path.clone(),
                errors,
            });
        }
    }

    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("error: {failure}");
        }
        return Err(CliError::InvalidSchemas(failures.len()));
    }
    println!("Validated {} schema file(s).", args.inputs.len());
    Ok(())
}
