//! Integration tests for the `codescope` binary: file collection under a
//! real directory tree, config discovery, JSON output and exit codes.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::create_dir_all(dir.path().join("src")).expect("failed to create src");
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_codescope"))
        .args(args)
        .current_dir(dir.path())
        .output()
        .expect("failed to execute codescope")
}

fn parse_stdout(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout is not valid JSON")
}

#[test]
fn json_report_covers_collected_files() {
    let dir = workspace();
    fs::write(
        dir.path().join("src/app.ts"),
        "export function main() {\n  return 0;\n}\n",
    )
    .expect("failed to write app.ts");
    fs::write(dir.path().join("src/util.ts"), "export const N = 1;\n")
        .expect("failed to write util.ts");

    let output = run(&dir, [".", "--format", "json"].as_ref());
    assert!(output.status.success(), "clean project should exit 0");

    let value = parse_stdout(&output);
    assert_eq!(value["fileCount"], 2);
    assert_eq!(value["status"], "complete");
    assert!(value["structure"]["functions"].is_array());
    assert!(value["dependencies"]["nodes"].is_array());
}

#[test]
fn vendor_and_test_paths_are_not_collected() {
    let dir = workspace();
    fs::create_dir_all(dir.path().join("node_modules/lib")).expect("mkdir");
    fs::create_dir_all(dir.path().join("dist")).expect("mkdir");
    fs::write(dir.path().join("node_modules/lib/index.js"), "x()\n").expect("write");
    fs::write(dir.path().join("dist/bundle.js"), "y()\n").expect("write");
    fs::write(dir.path().join("src/app.test.ts"), "it('x', () => {})\n").expect("write");
    // A segment containing "dist" as a prefix must survive the exclusion.
    fs::write(dir.path().join("src/distance.ts"), "export const D = 1;\n").expect("write");

    let output = run(&dir, [".", "--format", "json"].as_ref());
    let value = parse_stdout(&output);
    assert_eq!(value["fileCount"], 1);
    let ids: Vec<&str> = value["dependencies"]["nodes"]
        .as_array()
        .map(|a| a.iter().filter_map(|n| n["id"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(ids, ["src/distance"], "src/distance.ts was not analyzed");
}

#[test]
fn local_toml_config_is_discovered() {
    let dir = workspace();
    fs::write(dir.path().join("codescope.toml"), "[graph]\nenabled = false\n")
        .expect("failed to write codescope.toml");
    fs::write(
        dir.path().join("src/a.ts"),
        "import './b';\nexport function a() {}\n",
    )
    .expect("write");
    fs::write(dir.path().join("src/b.ts"), "export function b() {}\n").expect("write");

    let output = run(&dir, [".", "--format", "json"].as_ref());
    let value = parse_stdout(&output);
    let nodes = value["dependencies"]["nodes"].as_array().expect("nodes array");
    assert!(nodes.is_empty(), "graph should be disabled by local config");
    assert_eq!(value["structure"]["functions"].as_array().map(Vec::len), Some(2));
}

#[test]
fn critical_security_issue_exits_nonzero() {
    let dir = workspace();
    fs::write(
        dir.path().join("src/risky.ts"),
        "export function run(input: string) {\n  return eval(input);\n}\n",
    )
    .expect("failed to write risky.ts");

    let output = run(&dir, [".", "--format", "json"].as_ref());
    assert!(!output.status.success(), "critical finding should exit non-zero");
    let value = parse_stdout(&output);
    assert!(value["securitySummary"]["critical"].as_u64().unwrap_or(0) >= 1);
}

#[test]
fn init_writes_starter_config_once() {
    let dir = workspace();
    let first = run(&dir, ["--init"].as_ref());
    assert!(first.status.success());
    let written = fs::read_to_string(dir.path().join("codescope.toml"))
        .expect("codescope.toml should exist after --init");
    assert!(written.contains("[complexity]"));

    fs::write(dir.path().join("codescope.toml"), "[limits]\n").expect("write");
    let second = run(&dir, ["--init"].as_ref());
    assert!(second.status.success());
    let kept = fs::read_to_string(dir.path().join("codescope.toml")).expect("read");
    assert_eq!(kept, "[limits]\n", "--init must not overwrite an existing config");
}
