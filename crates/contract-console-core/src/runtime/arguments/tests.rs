// crates/contract-console-core/src/runtime/arguments/tests.rs
// ============================================================================
// Module: Argument Store Unit Tests
// Description: Arena behavior for sparse, out-of-order argument edits.
// Purpose: Ensure positional integrity and per-method isolation.
// Dependencies: crate::runtime::arguments
// ============================================================================

//! ## Overview
//! Exercises the `(method, position)` arena directly, including the sparse
//! helpers the dispatcher relies on.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions favor clarity over error propagation."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::ArgumentError;
use super::ArgumentStore;
use super::MAX_ARGUMENT_POSITION;
use crate::core::MethodName;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn unedited_method_reads_back_empty() {
    let store = ArgumentStore::new();
    assert!(store.get_arguments(&MethodName::from("getPrice")).is_empty());
    assert_eq!(store.argument(&MethodName::from("getPrice"), 3), "");
}

#[test]
fn out_of_order_edits_pad_with_empty_strings() {
    let mut store = ArgumentStore::new();
    let method = MethodName::from("assignTask");
    store.set_argument(&method, 2, "payload").unwrap();
    store.set_argument(&method, 0, "7").unwrap();
    assert_eq!(store.get_arguments(&method), vec!["7", "", "payload"]);
}

#[test]
fn later_write_overwrites_position() {
    let mut store = ArgumentStore::new();
    let method = MethodName::from("submitData");
    store.set_argument(&method, 1, "100").unwrap();
    store.set_argument(&method, 1, "250").unwrap();
    assert_eq!(store.get_arguments(&method), vec!["", "250"]);
}

#[test]
fn methods_do_not_share_lists() {
    let mut store = ArgumentStore::new();
    let alpha = MethodName::from("alpha");
    let alphabet = MethodName::from("alphabet");
    store.set_argument(&alpha, 0, "a").unwrap();
    store.set_argument(&alphabet, 1, "b").unwrap();
    assert_eq!(store.get_arguments(&alpha), vec!["a"]);
    assert_eq!(store.get_arguments(&alphabet), vec!["", "b"]);
}

#[test]
fn leading_pads_to_arity() {
    let mut store = ArgumentStore::new();
    let method = MethodName::from("grantRole");
    store.set_argument(&method, 1, "0xabc").unwrap();
    assert_eq!(store.leading(&method, 2), vec!["", "0xabc"]);
    assert_eq!(store.leading(&method, 0), Vec::<String>::new());
}

#[test]
fn overflow_ignores_empty_trailing_positions() {
    let mut store = ArgumentStore::new();
    let method = MethodName::from("completeTask");
    store.set_argument(&method, 0, "1").unwrap();
    store.set_argument(&method, 4, "").unwrap();
    assert_eq!(store.overflow(&method, 1), None);
    store.set_argument(&method, 3, "extra").unwrap();
    assert_eq!(store.overflow(&method, 1), Some(3));
}

#[test]
fn clear_drops_everything() {
    let mut store = ArgumentStore::new();
    store.set_argument(&MethodName::from("wallet"), 0, "x").unwrap();
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn position_past_limit_is_rejected_and_store_unchanged() {
    let mut store = ArgumentStore::new();
    let method = MethodName::from("getPrice");
    store.set_argument(&method, 1, "ETH").unwrap();

    let err = store.set_argument(&method, usize::MAX, "x").unwrap_err();
    assert_eq!(
        err,
        ArgumentError::PositionOutOfRange {
            index: usize::MAX,
            max: MAX_ARGUMENT_POSITION,
        }
    );
    assert!(store.set_argument(&method, MAX_ARGUMENT_POSITION + 1, "x").is_err());
    assert_eq!(store.get_arguments(&method), vec!["", "ETH"]);
}

#[test]
fn position_at_limit_bounds_the_dense_list() {
    let mut store = ArgumentStore::new();
    let method = MethodName::from("getPrice");
    store.set_argument(&method, MAX_ARGUMENT_POSITION, "last").unwrap();
    let values = store.get_arguments(&method);
    assert_eq!(values.len(), MAX_ARGUMENT_POSITION + 1);
    assert_eq!(values.last().map(String::as_str), Some("last"));
}
