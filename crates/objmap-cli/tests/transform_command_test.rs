use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn cargo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_objmap"))
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "objmap-cli-{name}-{}-{counter}.{extension}",
        std::process::id()
    );
    env::temp_dir().join(filename)
}

fn run(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run objmap")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn transform_prints_employee_json() -> Result<()> {
    let output = run(&["transform"]);
    assert_success(&output);

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["email"], "jane.doe@acme.com");
    assert_eq!(parsed["company"]["name"], "Acme Corporation Intl");
    assert_eq!(
        parsed["company"]["address"]["city"],
        "HeadquarterCity"
    );
    assert_eq!(parsed["extra_fields"]["addresses"][0]["city"], "MergeCity");
    assert!(parsed.get("work_email").is_none());
    Ok(())
}

#[test]
fn transform_compact_is_single_line() -> Result<()> {
    let output = run(&["transform", "--compact"]);
    assert_success(&output);

    let payload = String::from_utf8(output.stdout)?;
    assert_eq!(payload.trim_end().lines().count(), 1);
    Ok(())
}

#[test]
fn transform_writes_output_file() -> Result<()> {
    let output_path = unique_temp_path("transform", "json");
    let output = run(&["transform", "-o", output_path.to_string_lossy().as_ref()]);
    assert_success(&output);
    assert!(output.stdout.is_empty(), "stdout should stay empty");

    let written = fs::read_to_string(&output_path)?;
    let parsed: serde_json::Value = serde_json::from_str(&written)?;
    assert_eq!(parsed["id"], "EMP-1");

    let _ = fs::remove_file(&output_path);
    Ok(())
}

#[test]
fn transform_honours_config_overrides() -> Result<()> {
    let config_path = unique_temp_path("identity-employee", "yaml");
    fs::write(
        &config_path,
        r"
shapes:
  Employee: {}
  Company:
    name: legal_name
",
    )?;

    let output = run(&[
        "transform",
        "--compact",
        "--config",
        config_path.to_string_lossy().as_ref(),
    ]);
    assert_success(&output);

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["email"], serde_json::Value::Null);
    assert_eq!(parsed["extra_fields"]["work_email"], "jane.doe@acme.com");
    assert_eq!(parsed["company"]["address"], serde_json::Value::Null);

    let _ = fs::remove_file(&config_path);
    Ok(())
}

#[test]
fn transform_rejects_invalid_config() -> Result<()> {
    let config_path = unique_temp_path("zero-depth", "yaml");
    fs::write(&config_path, "engine:\n  max_depth: 0\n")?;

    let output = run(&["transform", "--config", config_path.to_string_lossy().as_ref()]);

    assert!(!output.status.success(), "expected invalid config to fail");
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("max_depth"),
        "expected error to mention max_depth; stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let _ = fs::remove_file(&config_path);
    Ok(())
}

#[test]
fn transform_selects_leftover_value() -> Result<()> {
    let output = run(&["transform", "--select", "extra_fields/groups[0]/type"]);
    assert_success(&output);

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed, "TEAM");
    Ok(())
}

#[test]
fn transform_reports_missing_selection() {
    let output = run(&["transform", "--select", "extra_fields/addresses[5]"]);

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("extra_fields/addresses[5]"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn transform_rejects_unknown_config_extension() {
    let output = run(&["transform", "--config", "mapper.toml"]);

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Unsupported table file format"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
