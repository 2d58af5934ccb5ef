// crates/contract-console-core/tests/console.rs
// ============================================================================
// Module: Console Session Tests
// Description: Loading, editing, dispatch snapshots, and outcome ordering.
// Purpose: Ensure the console facade keeps state consistent under reloads,
//          reconnects, and overlapping invocations.
// ============================================================================

//! Console session integration tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::sync::Arc;

use contract_console_core::ArgumentValue;
use contract_console_core::AuditOutcome;
use contract_console_core::ConnectionGate;
use contract_console_core::ConsoleError;
use contract_console_core::ContractConsole;
use contract_console_core::InvocationError;
use contract_console_core::InvocationOutcome;
use contract_console_core::MAX_ARGUMENT_POSITION;
use contract_console_core::MethodIndex;
use contract_console_core::MethodName;
use contract_console_core::Mutability;
use contract_console_core::ResultValue;
use serde_json::json;
use tokio::sync::Notify;

use crate::common::CollectingAuditSink;
use crate::common::ScriptedChannel;
use crate::common::method_entry;
use crate::common::price_document;

fn console_with_audit() -> (ContractConsole, Arc<ConnectionGate>, Arc<CollectingAuditSink>) {
    let gate = Arc::new(ConnectionGate::new());
    let audit = Arc::new(CollectingAuditSink::default());
    let mut console =
        ContractConsole::new("oracle", Arc::clone(&gate)).with_audit(audit.clone());
    console.load_descriptors(&price_document()).unwrap();
    (console, gate, audit)
}

// ============================================================================
// SECTION: Loading
// ============================================================================

#[test]
fn successful_reload_replaces_descriptors_and_clears_arguments() {
    let (mut console, _, audit) = console_with_audit();
    let get_price = MethodName::new("getPrice");
    console.set_argument(&get_price, 0, "ETH").unwrap();

    let count = console.load_descriptors(&json!([method_entry("ping", &[], "view")])).unwrap();
    assert_eq!(count, 1);
    assert!(console.descriptors().lookup(&get_price).is_none());
    assert!(console.get_arguments(&get_price).is_empty());

    let events = audit.descriptors.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].method_count, 1);
    assert_eq!(events[1].outcome, AuditOutcome::Ok);
}

#[test]
fn failed_reload_keeps_previous_state() {
    let (mut console, _, audit) = console_with_audit();
    let get_price = MethodName::new("getPrice");
    console.set_argument(&get_price, 0, "ETH").unwrap();

    let err = console.load_descriptors(&json!({ "not": "an array" })).unwrap_err();
    assert!(err.to_string().starts_with("malformed descriptor"));
    assert_eq!(console.descriptors().len(), 2);
    assert_eq!(console.get_arguments(&get_price), vec!["ETH".to_string()]);
    assert!(console.load_descriptor_slice(b"not json").is_err());
    assert_eq!(console.descriptors().len(), 2);

    let events = audit.descriptors.lock().unwrap();
    assert_eq!(events.last().map(|event| event.outcome), Some(AuditOutcome::Error));
}

#[test]
fn forms_reflect_descriptors_and_pending_values() {
    let (mut console, _, _) = console_with_audit();
    console.set_argument(&MethodName::new("transfer"), 1, "5").unwrap();
    let forms = console.forms();
    assert_eq!(forms.len(), 2);
    assert_eq!(forms[0].action, "Fetch");
    assert_eq!(forms[0].fields[0].placeholder, "asset (bytes32)");
    assert_eq!(forms[1].action, "Execute");
    assert_eq!(forms[1].mutability, Mutability::Write);
    assert_eq!(forms[1].fields[0].value, "");
    assert_eq!(forms[1].fields[1].placeholder, "amount (uint256)");
    assert_eq!(forms[1].fields[1].value, "5");
}

#[test]
fn client_surface_uses_loaded_descriptors() {
    let (console, _, _) = console_with_audit();
    let surface = console.generate_client_surface();
    assert_eq!(surface.lines().count(), 4);
    assert!(surface.contains("  getPrice(asset: bytes32): Promise<any>;"));
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

#[tokio::test]
async fn invoking_without_connection_is_not_connected() {
    let (mut console, _, audit) = console_with_audit();
    let get_price = MethodName::new("getPrice");
    console.set_argument(&get_price, 0, "ETH").unwrap();
    let outcome = console.invoke(&get_price).await.unwrap();
    assert_eq!(outcome, InvocationOutcome::Failed(InvocationError::NotConnected));
    assert_eq!(console.last_outcome(), Some(outcome));

    let events = audit.invocations.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].error_kind, Some("not_connected"));
    assert_eq!(events[0].mutability, Mutability::Read);
}

#[tokio::test]
async fn unknown_method_is_a_caller_error() {
    let (mut console, _, _) = console_with_audit();
    let missing = MethodName::new("missing");
    assert_eq!(console.invoke(&missing).await, Err(ConsoleError::UnknownMethod(missing)));
    assert_eq!(
        console.invoke_instance(MethodIndex::new(9)).await,
        Err(ConsoleError::UnknownIndex(9))
    );
    assert!(console.last_outcome().is_none());
}

#[tokio::test]
async fn confirmed_write_is_audited_with_transaction_id() {
    let (mut console, gate, audit) = console_with_audit();
    gate.connect(Arc::new(ScriptedChannel::reading(true)));
    let transfer = MethodName::new("transfer");
    console.set_argument(&transfer, 0, "0x01").unwrap();
    console.set_argument(&transfer, 1, "5").unwrap();
    let outcome = console.invoke(&transfer).await.unwrap();
    assert!(outcome.is_success());

    let events = audit.invocations.lock().unwrap();
    assert_eq!(events[0].transaction_id.as_deref(), Some("0xabc"));
    assert_eq!(events[0].argument_count, 2);
    let line = serde_json::to_string(&events[0]).unwrap();
    assert!(line.contains(r#""event":"contract_invocation""#));
    assert!(!line.contains("0x01"));
}

#[tokio::test]
async fn surplus_arguments_fail_locally() {
    let (mut console, gate, _) = console_with_audit();
    let channel = Arc::new(ScriptedChannel::reading(true));
    gate.connect(channel.clone());
    let get_price = MethodName::new("getPrice");
    console.set_argument(&get_price, 0, "ETH").unwrap();
    console.set_argument(&get_price, MAX_ARGUMENT_POSITION, "extra").unwrap();
    let outcome = console.invoke(&get_price).await.unwrap();
    assert_eq!(outcome.error().map(InvocationError::kind), Some("remote_rejected"));
    assert!(channel.calls().is_empty());
}

#[tokio::test]
async fn duplicate_names_dispatch_last_by_name_and_any_by_index() {
    let gate = Arc::new(ConnectionGate::new());
    let channel = Arc::new(ScriptedChannel::reading(true));
    gate.connect(channel.clone());
    let mut console = ContractConsole::new("mesh", Arc::clone(&gate));
    console
        .load_descriptors(&json!([
            method_entry("safeTransferFrom", &[("from", "address")], "nonpayable"),
            method_entry(
                "safeTransferFrom",
                &[("from", "address"), ("data", "bytes")],
                "nonpayable"
            ),
        ]))
        .unwrap();

    console.invoke(&MethodName::new("safeTransferFrom")).await.unwrap();
    console.invoke_instance(MethodIndex::new(0)).await.unwrap();

    let calls = channel.calls();
    assert_eq!(calls[0].arguments.len(), 2);
    assert_eq!(calls[1].arguments.len(), 1);
}

// ============================================================================
// SECTION: Snapshots
// ============================================================================

#[tokio::test]
async fn prepared_invocation_keeps_captured_channel_and_arguments() {
    let (mut console, gate, _) = console_with_audit();
    let first = Arc::new(ScriptedChannel::reading("first"));
    let second = Arc::new(ScriptedChannel::reading("second"));
    gate.connect(first.clone());

    let get_price = MethodName::new("getPrice");
    console.set_argument(&get_price, 0, "ETH").unwrap();
    let prepared = console.prepare(&get_price).unwrap();
    console.set_argument(&get_price, 0, "BTC").unwrap();
    gate.connect(second.clone());

    let outcome = prepared.run().await;
    assert_eq!(outcome, InvocationOutcome::Fetched(ResultValue::from("first")));
    assert!(second.calls().is_empty());
    let calls = first.calls();
    assert_eq!(calls[0].arguments[0].value, ArgumentValue::Provided("ETH".to_string()));

    let outcome = console.invoke(&get_price).await.unwrap();
    assert_eq!(outcome, InvocationOutcome::Fetched(ResultValue::from("second")));
    assert_eq!(second.calls()[0].arguments[0].value, ArgumentValue::Provided("BTC".to_string()));
}

#[tokio::test]
async fn stale_outcome_never_overwrites_newer_dispatch() {
    let (mut console, gate, _) = console_with_audit();
    let get_price = MethodName::new("getPrice");
    gate.connect(Arc::new(ScriptedChannel::reading("older")));
    let older = console.prepare(&get_price).unwrap();
    gate.connect(Arc::new(ScriptedChannel::reading("newer")));
    let newer = console.prepare(&get_price).unwrap();
    assert!(newer.sequence() > older.sequence());

    newer.run().await;
    let stale = older.run().await;
    assert_eq!(stale, InvocationOutcome::Fetched(ResultValue::from("older")));
    let newer = InvocationOutcome::Fetched(ResultValue::from("newer"));
    assert_eq!(console.last_outcome(), Some(newer));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn overlapping_invocations_conclude_independently() {
    let (mut console, gate, audit) = console_with_audit();
    let latch = Arc::new(Notify::new());
    gate.connect(Arc::new(ScriptedChannel::reading("slow").with_latch(Arc::clone(&latch))));
    let slow = console.prepare(&MethodName::new("getPrice")).unwrap();
    let slow = tokio::spawn(slow.run());

    gate.connect(Arc::new(ScriptedChannel::reading("fast")));
    let fast = console.invoke(&MethodName::new("getPrice")).await.unwrap();
    assert_eq!(fast, InvocationOutcome::Fetched(ResultValue::from("fast")));

    latch.notify_one();
    let slow = slow.await.unwrap();
    assert_eq!(slow, InvocationOutcome::Fetched(ResultValue::from("slow")));
    assert_eq!(console.last_outcome(), Some(fast));
    assert_eq!(audit.invocations.lock().unwrap().len(), 2);
}
