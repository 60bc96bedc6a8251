// crates/accessctl-config/tests/config_loading.rs
// =============================================================================
// Module: Config Loading Tests
// Description: Defaults, range validation, and audit sink construction.
// Purpose: Ensure configuration fails closed on invalid input.
// =============================================================================

//! Config loading and validation tests for accessctl-config.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::time::Duration;

use accessctl_config::AccessControlConfig;
use accessctl_config::AuditSinkKind;
use accessctl_config::ConfigError;
use accessctl_core::AccessAuditEvent;
use accessctl_core::AuditDetail;

type TestResult = Result<(), String>;

fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn empty_config_uses_defaults() -> TestResult {
    let config = AccessControlConfig::from_toml("").map_err(|err| err.to_string())?;
    assert!(config.access_control.enabled);
    assert_eq!(config.store.timeout_ms, 5_000);
    assert_eq!(config.audit.sink, AuditSinkKind::Stderr);

    let settings = config.settings();
    assert!(settings.enabled);
    assert_eq!(settings.store_timeout, Some(Duration::from_millis(5_000)));
    Ok(())
}

#[test]
fn disabled_flag_flows_into_settings() -> TestResult {
    let config = AccessControlConfig::from_toml("[access_control]\nenabled = false\n")
        .map_err(|err| err.to_string())?;
    assert!(!config.settings().enabled);
    Ok(())
}

#[test]
fn store_timeout_is_range_checked() -> TestResult {
    assert_invalid(AccessControlConfig::from_toml("[store]\ntimeout_ms = 50\n"), "store.timeout_ms")?;
    assert_invalid(
        AccessControlConfig::from_toml("[store]\ntimeout_ms = 30001\n"),
        "store.timeout_ms",
    )?;
    let config = AccessControlConfig::from_toml("[store]\ntimeout_ms = 100\n")
        .map_err(|err| err.to_string())?;
    assert_eq!(config.settings().store_timeout, Some(Duration::from_millis(100)));
    Ok(())
}

#[test]
fn file_sink_requires_path() -> TestResult {
    assert_invalid(AccessControlConfig::from_toml("[audit]\nsink = \"file\"\n"), "audit.path")?;
    assert_invalid(
        AccessControlConfig::from_toml("[audit]\nsink = \"none\"\npath = \"x.log\"\n"),
        "only valid for the file sink",
    )?;
    assert_invalid(
        AccessControlConfig::from_toml("[audit]\nsink = \"file\"\npath = \"   \"\n"),
        "non-empty",
    )
}

#[test]
fn unknown_sink_is_a_parse_error() {
    let result = AccessControlConfig::from_toml("[audit]\nsink = \"syslog\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn load_reads_file_and_builds_file_sink() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let log_path = dir.path().join("audit.log");
    let config_path = dir.path().join("accessctl.toml");
    let body = format!(
        "[access_control]\nenabled = true\n\n[store]\ntimeout_ms = 750\n\n[audit]\nsink = \"file\"\npath = {:?}\n",
        log_path.to_string_lossy()
    );
    fs::write(&config_path, body).map_err(|err| err.to_string())?;

    let config = AccessControlConfig::load(Some(&config_path)).map_err(|err| err.to_string())?;
    assert_eq!(config.store.timeout_ms, 750);

    let sink = config.build_audit_sink().map_err(|err| err.to_string())?;
    sink.record(&AccessAuditEvent::new(AuditDetail::DeclarationRejected {
        role: "custom:a".to_string(),
        reason: "missing prefix".to_string(),
    }));
    let written = fs::read_to_string(&log_path).map_err(|err| err.to_string())?;
    assert!(written.contains("\"kind\":\"declaration_rejected\""));
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = AccessControlConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn oversized_path_component_is_rejected() -> TestResult {
    let long = "a".repeat(300);
    assert_invalid(
        AccessControlConfig::load(Some(std::path::Path::new(&long))),
        "component too long",
    )
}
