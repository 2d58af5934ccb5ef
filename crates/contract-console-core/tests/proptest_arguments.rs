// crates/contract-console-core/tests/proptest_arguments.rs
// ============================================================================
// Module: Argument Store Property-Based Tests
// Description: Property tests for last-write-wins positional storage.
// Purpose: Detect positional drift across arbitrary edit sequences.
// ============================================================================

//! Property-based tests for argument store invariants.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeMap;

use contract_console_core::ArgumentStore;
use contract_console_core::MethodName;
use proptest::prelude::*;

fn edit_strategy() -> impl Strategy<Value = (u8, usize, String)> {
    (0u8 .. 3, 0usize .. 12, "[a-z0-9]{0,4}")
}

proptest! {
    #[test]
    fn reflects_last_write_per_position(edits in prop::collection::vec(edit_strategy(), 0 .. 40)) {
        let methods = [MethodName::new("alpha"), MethodName::new("beta"), MethodName::new("gamma")];
        let mut store = ArgumentStore::new();
        let mut model: BTreeMap<(u8, usize), String> = BTreeMap::new();
        for (method, index, raw) in &edits {
            store.set_argument(&methods[usize::from(*method)], *index, raw.clone()).unwrap();
            model.insert((*method, *index), raw.clone());
        }

        for (slot, method) in methods.iter().enumerate() {
            let slot = u8::try_from(slot).unwrap();
            let written: Vec<(usize, &String)> = model
                .iter()
                .filter(|((owner, _), _)| *owner == slot)
                .map(|((_, index), raw)| (*index, raw))
                .collect();
            let expected_len = written.iter().map(|(index, _)| index + 1).max().unwrap_or(0);
            let mut expected = vec![String::new(); expected_len];
            for (index, raw) in written {
                expected[index] = raw.clone();
            }
            prop_assert_eq!(store.get_arguments(method), expected);
        }
    }
}
