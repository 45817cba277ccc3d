//! Loading a schema from JSON.
//!
//! Deserializes a [`CliSpec`] with `serde_json`, validates it, and parses a
//! few fixed argument vectors to show value binding and diagnostics.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p optly-demos --example json_schema
//! ```

use optly_core::{CliSpec, Scope, parse, validate_spec};

const SCHEMA: &str = r#"{
  "name": "fetch",
  "description": "Download things",
  "global_flags": [
    { "full_name": "verbose", "short_name": "v", "type": "bool" },
    { "full_name": "jobs", "short_name": "j", "type": "uint8", "default": "4" }
  ],
  "commands": [
    {
      "name": "get",
      "flags": [
        { "full_name": "url", "short_name": "u", "type": "string" },
        { "full_name": "timeout", "type": "double", "default": "2.5" }
      ]
    }
  ]
}"#;

fn main() {
    let spec: CliSpec = match serde_json::from_str(SCHEMA) {
        Ok(spec) => spec,
        Err(err) => {
            eprintln!("error: bad schema: {err}");
            std::process::exit(1);
        }
    };

    let errors = validate_spec(&spec);
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }

    let runs: [&[&str]; 3] = [
        &["fetch", "-v", "get", "-u", "https://example.com"],
        &["fetch", "--jobs=300", "get", "--timeout", "0.5"],
        &["fetch", "-vj", "get", "--nope"],
    ];

    for argv in runs {
        println!("$ {}", argv.join(" "));
        let parsed = match parse(argv, &spec) {
            Ok(parsed) => parsed,
            Err(err) => {
                eprintln!("error: {err}");
                continue;
            }
        };

        let mut scopes = vec![Scope::Global];
        if parsed.active_scope() != Scope::Global {
            scopes.push(parsed.active_scope());
        }
        for scope in scopes {
            for (_, flag, value) in parsed.flags(scope) {
                let shown = value.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
                println!("  {:<10} {shown}", flag.long_form());
            }
        }
        for diagnostic in parsed.diagnostics() {
            println!("  ! {diagnostic}");
        }
        println!();
    }
}
