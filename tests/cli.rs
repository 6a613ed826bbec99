//! End-to-end tests that run the built binary and check what lands on
//! stdout, stderr and the exit status.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

const USAGE_LINE: &str = "airport_radius [FLAGS] [OPTIONS] <latitude> <longitude> <radius-km>";

const AIRPORTS: &str = r#"{
    "AAA": {"lat": 0, "lon": 0, "name": "Origin"},
    "BBB": {"lat": 0, "lon": 1},
    "CCC": {"lat": "0.5"}
}"#;

/// Run the binary with `dir` as its working directory.
fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_airport_radius"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute airport_radius")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn workspace_with_airports() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("airports.json"), AIRPORTS).unwrap();
    dir
}

#[test]
fn two_positionals_print_usage_on_stdout_and_exit_1() {
    let dir = workspace_with_airports();
    let output = run_cli(dir.path(), &["51.4", "-0.4"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("USAGE"), "stdout: {}", stdout);
    assert!(stdout.contains(USAGE_LINE), "stdout: {}", stdout);
    assert!(stderr_of(&output).is_empty(), "stderr: {}", stderr_of(&output));
}

#[test]
fn four_positionals_print_usage_and_exit_1() {
    let dir = workspace_with_airports();
    let output = run_cli(dir.path(), &["1", "2", "3", "4"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains(USAGE_LINE));
}

#[test]
fn non_numeric_argument_prints_usage_and_exits_1() {
    let dir = workspace_with_airports();
    let output = run_cli(dir.path(), &["north", "0", "10"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("USAGE"));
}

#[test]
fn oversized_indent_is_a_usage_error() {
    let dir = workspace_with_airports();
    let output = run_cli(dir.path(), &["0", "0", "10", "--indent", "18446744073709551615"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("USAGE"));
}

#[test]
fn help_exits_0() {
    let dir = workspace_with_airports();
    let output = run_cli(dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains(USAGE_LINE));
}

#[test]
fn missing_input_is_reported_on_stderr_with_exit_1() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["0", "0", "10"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty(), "stdout: {}", stdout_of(&output));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("airports.json"), "stderr: {}", stderr);
}

#[test]
fn malformed_input_names_the_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{not json").unwrap();
    let output = run_cli(dir.path(), &["0", "0", "10", "-i", "broken.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("broken.json"), "stderr: {}", stderr_of(&output));
}

#[test]
fn filtered_json_goes_to_stdout() {
    let dir = workspace_with_airports();
    let output = run_cli(dir.path(), &["0", "0", "100"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let printed: Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(printed, json!({"AAA": {"lat": 0, "lon": 0, "name": "Origin"}}));
}

#[test]
fn script_flag_writes_module_file() {
    let dir = workspace_with_airports();
    let output = run_cli(dir.path(), &["0", "0", "200", "--script", "--indent", "2"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).is_empty());
    let script = fs::read_to_string(dir.path().join("airports-data.js")).unwrap();
    assert!(script.starts_with("const airportsData = {\n  \"AAA\": {"), "{}", script);
    assert!(script.contains("\"BBB\""));
    assert!(script.ends_with("module.exports = airportsData;\n\n"));
}
