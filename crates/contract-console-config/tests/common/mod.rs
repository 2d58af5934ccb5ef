// crates/contract-console-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for contract-console-config.
// =============================================================================

#![allow(
    dead_code,
    clippy::panic,
    reason = "Test helpers are selectively used across suites."
)]

use contract_console_config::ConsoleConfig;
use contract_console_config::ContractConsoleConfig;

/// Valid contract address used across tests.
pub const ADDRESS: &str = "0xC4858Be910794946580e5270B0CCF49aeD9541EF";

/// Parses a TOML string into a `ContractConsoleConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<ContractConsoleConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a valid console entry.
pub fn console(name: &str) -> ConsoleConfig {
    ConsoleConfig {
        name: name.to_string(),
        title: Some(format!("Console {name}")),
        contract_address: ADDRESS.to_string(),
        abi_path: format!("abi/{name}.json"),
        interface_name: None,
    }
}

/// Returns a config holding the given consoles.
pub fn config_with(consoles: Vec<ConsoleConfig>) -> ContractConsoleConfig {
    ContractConsoleConfig {
        consoles,
        ..ContractConsoleConfig::default()
    }
}

/// Asserts that validation fails with a message containing `needle`.
pub fn assert_invalid(config: &ContractConsoleConfig, needle: &str) {
    match config.validate() {
        Err(err) => {
            let message = err.to_string();
            assert!(message.contains(needle), "expected '{needle}' in '{message}'");
        }
        Ok(()) => panic!("expected validation to fail with '{needle}'"),
    }
}
