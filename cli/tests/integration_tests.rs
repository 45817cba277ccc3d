use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const SPEC_JSON: &str = r#"{
  "name": "app",
  "global_flags": [
    { "full_name": "value", "short_name": "v", "type": "uint32", "default": "7" },
    { "full_name": "switch", "short_name": "s", "type": "bool" }
  ],
  "commands": [
    { "name": "help", "description": "Show help" },
    {
      "name": "download",
      "description": "Fetch a resource",
      "flags": [
        { "full_name": "url", "short_name": "u", "type": "string", "description": "Source URL" }
      ]
    }
  ]
}"#;

fn write_spec(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write schema");
    path
}

fn optly(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_optly"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run optly")
}

fn parse_json(spec: &Path, argv: &[&str]) -> serde_json::Value {
    let mut args = vec!["parse", "--spec", spec.to_str().unwrap(), "--"];
    args.extend_from_slice(argv);
    let out = optly(&args);
    assert!(
        out.status.success(),
        "parse failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("report should be JSON")
}

#[test]
fn parse_reports_command_and_typed_values() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "app.json", SPEC_JSON);

    let report = parse_json(&spec, &["/bin/app", "-s=1", "download", "--url=https://example.com"]);

    assert_eq!(report["program_path"], "/bin/app");
    assert_eq!(report["command"], "download");
    assert_eq!(report["flags"][0]["name"], "value");
    assert_eq!(report["flags"][0]["value"], 7);
    assert_eq!(report["flags"][0]["explicit"], false);
    assert_eq!(report["flags"][1]["value"], true);
    assert_eq!(report["flags"][2]["scope"], "download");
    assert_eq!(report["flags"][2]["value"], "https://example.com");
    assert_eq!(report["occurrences"], serde_json::json!(["--switch", "download --url"]));
    assert_eq!(report["diagnostics"], serde_json::json!([]));
}

#[test]
fn parse_collects_diagnostics_without_failing() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "app.json", SPEC_JSON);

    let report = parse_json(&spec, &["app", "--bogus", "--value=abc"]);

    let diagnostics = report["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0]["index"], 1);
    assert_eq!(diagnostics[0]["message"], "unknown flag: --bogus");
    assert_eq!(diagnostics[1]["index"], 2);
    assert_eq!(report["flags"][0]["value"], 7);
}

#[test]
fn strict_parse_fails_on_diagnostics() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "app.json", SPEC_JSON);

    let out = optly(&["parse", "--strict", "--spec", spec.to_str().unwrap(), "--", "app", "--bogus"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("1 diagnostic(s)"));
    // The report is still printed before failing.
    assert!(!out.stdout.is_empty());
}

#[test]
fn parse_accepts_yaml_schema_and_output() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(
        &dir,
        "app.yml",
        "name: app\nglobal_flags:\n  - { full_name: level, short_name: l, type: int8 }\n",
    );

    let out = optly(&[
        "parse",
        "--format",
        "yaml",
        "--spec",
        spec.to_str().unwrap(),
        "--",
        "app",
        "-l=-5",
    ]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("name: level"), "unexpected report:\n{stdout}");
    assert!(stdout.contains("value: -5"), "unexpected report:\n{stdout}");
}

#[test]
fn usage_prints_top_level_and_command_blocks() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "app.json", SPEC_JSON);
    let spec = spec.to_str().unwrap();

    let out = optly(&["usage", "--spec", spec, "--program", "/usr/bin/tool"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "tool [FLAGS] <COMMAND> [COMMAND FLAGS]\n\
         COMMANDS\n  help      Show help\n  download  Fetch a resource\n\
         FLAGS\n  -v --value\n  -s --switch\n"
    );

    let out = optly(&["usage", "--spec", spec, "--command", "download"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "app [FLAGS] download [COMMAND FLAGS]\nFLAGS\n  -u --url  Source URL\n"
    );
}

#[test]
fn usage_rejects_unknown_command() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "app.json", SPEC_JSON);

    let out = optly(&["usage", "--spec", spec.to_str().unwrap(), "--command", "upload"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown command: upload"));
}

#[test]
fn validate_accepts_good_and_rejects_duplicate_flags() {
    let dir = TempDir::new().unwrap();
    let good = write_spec(&dir, "good.json", SPEC_JSON);
    let bad = write_spec(
        &dir,
        "bad.yaml",
        "name: app\nglobal_flags:\n  - { full_name: value, type: bool }\n  - { full_name: value, type: bool }\n",
    );

    let out = optly(&["validate", good.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Validated 1 schema file(s)."));

    let out = optly(&["validate", good.to_str().unwrap(), bad.to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("bad.yaml"), "unexpected stderr:\n{stderr}");
    assert!(stderr.contains("1 schema file(s) failed validation"));
}

#[test]
fn parse_refuses_invalid_schema() {
    let dir = TempDir::new().unwrap();
    let spec = write_spec(&dir, "bad.json", r#"{"name":"app","commands":[{"name":""}]}"#);

    let out = optly(&["parse", "--spec", spec.to_str().unwrap(), "--", "app"]);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid schema"));
}
