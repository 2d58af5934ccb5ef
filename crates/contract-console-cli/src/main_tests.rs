// crates/contract-console-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and console loading helpers.
// Purpose: Ensure source selection and audit wiring fail closed.
// Dependencies: contract-console-cli main helpers
// ============================================================================

//! ## Overview
//! Validates locale resolution, source argument conflicts, ad-hoc console
//! naming, and audit sink selection for the CLI entry point.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use clap::Parser;
use contract_console_cli::i18n::Locale;
use contract_console_config::ContractConsoleConfig;
use contract_console_core::InvocationAuditEvent;
use contract_console_core::InvocationAuditEventParams;
use contract_console_core::InvocationError;
use contract_console_core::InvocationOutcome;
use contract_console_core::MethodName;
use contract_console_core::Mutability;

use super::Cli;
use super::Commands;
use super::LangArg;
use super::SourceArgs;
use super::adhoc_console_name;
use super::audit_sink;
use super::open_console;
use super::resolve_locale;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn shipped_abi(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../consoles/abi").join(format!("{name}.json"))
}

fn abi_source(path: &Path) -> SourceArgs {
    SourceArgs {
        console: None,
        abi: Some(path.to_path_buf()),
        config: None,
    }
}

// ============================================================================
// SECTION: Locale
// ============================================================================

#[test]
fn resolve_locale_prefers_flag_then_env() {
    assert_eq!(resolve_locale(Some(LangArg::Ca), Some("en")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, Some("ca-ES")).unwrap(), Locale::Ca);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
}

#[test]
fn resolve_locale_rejects_unknown_env_value() {
    let err = resolve_locale(None, Some("de")).unwrap_err();
    assert!(err.to_string().contains("CONTRACT_CONSOLE_LANG"));
}

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

#[test]
fn source_requires_exactly_one_of_console_or_abi() {
    assert!(Cli::try_parse_from(["contract-console", "surface"]).is_err());
    assert!(
        Cli::try_parse_from(["contract-console", "surface", "--console", "a", "--abi", "a.json"])
            .is_err()
    );
    assert!(
        Cli::try_parse_from(["contract-console", "surface", "--abi", "a.json", "--config", "c"])
            .is_err()
    );
    assert!(Cli::try_parse_from(["contract-console", "surface", "--abi", "a.json"]).is_ok());
}

#[test]
fn invoke_collects_ordered_arguments() {
    let cli = Cli::try_parse_from([
        "contract-console",
        "invoke",
        "--abi",
        "a.json",
        "--method",
        "transfer",
        "--arg",
        "0x01",
        "--arg",
        "",
        "--arg",
        "-5",
    ])
    .unwrap();
    let Some(Commands::Invoke(command)) = cli.command else {
        panic!("expected invoke command");
    };
    assert_eq!(command.method, "transfer");
    assert_eq!(command.args, vec!["0x01".to_string(), String::new(), "-5".to_string()]);
    assert!(command.index.is_none());
}

// ============================================================================
// SECTION: Console Loading
// ============================================================================

#[test]
fn adhoc_console_is_named_after_file_stem() {
    assert_eq!(adhoc_console_name(Path::new("abi/oracle.json")).as_str(), "oracle");
    assert_eq!(adhoc_console_name(Path::new("/")).as_str(), "adhoc");
}

#[test]
fn open_console_loads_abi_document() {
    let console = open_console(&abi_source(&shipped_abi("unified-oracle-drone"))).unwrap();
    assert_eq!(console.name().as_str(), "unified-oracle-drone");
    assert_eq!(console.descriptors().len(), 33);
}

#[test]
fn open_console_reports_malformed_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, b"{\"abi\": 1}").unwrap();
    let err = open_console(&abi_source(&path)).err().unwrap();
    assert!(err.to_string().contains("malformed descriptor"));
}

#[test]
fn enabled_audit_with_path_appends_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("contract-console.toml");
    fs::write(&config_path, "[audit]\nenabled = true\npath = \"audit.jsonl\"\n").unwrap();
    let config = ContractConsoleConfig::load(Some(&config_path)).unwrap();

    let sink = audit_sink(&config).unwrap();
    let outcome = InvocationOutcome::Failed(InvocationError::NotConnected);
    sink.record_invocation(&InvocationAuditEvent::new(InvocationAuditEventParams {
        console: "oracle".into(),
        method: MethodName::new("getPrice"),
        mutability: Mutability::Read,
        sequence: 1,
        argument_count: 0,
        outcome: &outcome,
    }));

    let log = fs::read_to_string(dir.path().join("audit.jsonl")).unwrap();
    assert!(log.contains("\"error_kind\":\"not_connected\""));
}
