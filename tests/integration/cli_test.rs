//! Tests driving the `hookmock` binary.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn project(extra_config: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for rel in ["src/component.ts", "src/use-theme.ts", "src/use-theme.mock.ts"] {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, "").expect("write");
    }

    let config = format!(
        "[resolver]\nroot = \"{}\"\n\n[logging]\nlevel = \"error\"\n\n{}",
        dir.path().display(),
        extra_config
    );
    std::fs::write(dir.path().join("hookmock.toml"), config).expect("write config");
    dir
}

fn hookmock(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hookmock"))
        .arg("--config")
        .arg(dir.join("hookmock.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run hookmock")
}

fn json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_resolve_json_reports_mock() {
    let dir = project("");
    let importer = dir.path().join("src/component.ts");

    let output = hookmock(
        dir.path(),
        &[
            "--format",
            "json",
            "resolve",
            "./use-theme",
            "--importer",
            importer.to_str().expect("utf-8 path"),
        ],
    );

    assert!(output.status.success());
    let rows = json(&output);
    let row = &rows[0];
    assert_eq!(
        row["id"],
        dir.path().join("src/use-theme.mock.ts").display().to_string()
    );
    assert_eq!(row["resolved_by"], "use-hook-mock");
    assert_eq!(row["external"], false);
}

#[test]
fn test_resolve_with_plugin_disabled_uses_real_module() {
    let dir = project("[use_hook_mock]\nenabled = false\n");
    let importer = dir.path().join("src/component.ts");

    let output = hookmock(
        dir.path(),
        &[
            "-f",
            "json",
            "resolve",
            "./use-theme",
            "-i",
            importer.to_str().expect("utf-8 path"),
        ],
    );

    assert!(output.status.success());
    assert_eq!(
        json(&output)[0]["id"],
        dir.path().join("src/use-theme.ts").display().to_string()
    );
}

#[test]
fn test_resolve_unresolvable_exits_with_error() {
    let dir = project("");
    let importer = dir.path().join("src/component.ts");

    let output = hookmock(
        dir.path(),
        &[
            "resolve",
            "./use-missing",
            "--importer",
            importer.to_str().expect("utf-8 path"),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot resolve './use-missing'"));
}

#[test]
fn test_explain_json() {
    let dir = project("[use_hook_mock]\nextensions = [\".js\", \".ts\"]\n");
    let importer = dir.path().join("src/component.ts");

    let output = hookmock(
        dir.path(),
        &[
            "--format",
            "json",
            "explain",
            "./use-theme#section",
            "--importer",
            importer.to_str().expect("utf-8 path"),
        ],
    );

    assert!(output.status.success());
    let report = json(&output);
    assert_eq!(report["kind"], "eligible");
    assert_eq!(report["clean"], "./use-theme");
    assert_eq!(report["pattern_matched"], true);

    let candidates = report["candidates"].as_array().expect("candidates");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0]["exists"], false);
    assert_eq!(candidates[1]["exists"], true);
}

#[test]
fn test_config_validate_rejects_bad_pattern() {
    let dir = project("[use_hook_mock]\nhook_pattern = \"(use-\"\n");

    let output = hookmock(dir.path(), &["config", "validate"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid hook pattern"));
}

#[test]
fn test_config_show_json_includes_plugin_section() {
    let dir = project("");

    let output = hookmock(dir.path(), &["-f", "json", "config", "show"]);

    assert!(output.status.success());
    let config = json(&output);
    assert_eq!(config["logging"]["level"], "error");
    assert_eq!(config["use_hook_mock"]["enabled"], true);
    assert_eq!(config["plugins"]["hook_timeout_seconds"], 30);
}
