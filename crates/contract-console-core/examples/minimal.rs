// crates/contract-console-core/examples/minimal.rs
// ============================================================================
// Module: Contract Console Minimal Example
// Description: Minimal console session using an in-memory channel.
// Purpose: Demonstrate loading, rendering, argument editing, and dispatch.
// Dependencies: contract-console-core, serde_json, tokio
// ============================================================================

//! ## Overview
//! Loads a two-method interface document, renders its client surface, and
//! invokes a read and a write through an in-memory channel.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use contract_console_core::CallArgument;
use contract_console_core::ChannelError;
use contract_console_core::ConnectionGate;
use contract_console_core::ContractChannel;
use contract_console_core::ContractConsole;
use contract_console_core::MethodDescriptor;
use contract_console_core::MethodName;
use contract_console_core::PendingWrite;
use contract_console_core::ResultValue;
use contract_console_core::WriteReceipt;
use num_bigint::BigInt;
use serde_json::json;

/// Channel answering reads with a wide integer and confirming every write.
struct InMemoryChannel;

#[async_trait]
impl ContractChannel for InMemoryChannel {
    async fn call(
        &self,
        _method: &MethodDescriptor,
        _arguments: &[CallArgument],
    ) -> Result<ResultValue, ChannelError> {
        Ok(ResultValue::BigInt(BigInt::from(10u8).pow(30)))
    }

    async fn send(
        &self,
        _method: &MethodDescriptor,
        _arguments: &[CallArgument],
    ) -> Result<Box<dyn PendingWrite>, ChannelError> {
        Ok(Box::new(InMemoryPending))
    }
}

/// Pending write that confirms immediately.
struct InMemoryPending;

#[async_trait]
impl PendingWrite for InMemoryPending {
    fn transaction_id(&self) -> &str {
        "0xexample"
    }

    async fn confirm(self: Box<Self>) -> Result<WriteReceipt, ChannelError> {
        Ok(WriteReceipt {
            transaction_id: self.transaction_id().to_string(),
            block_number: Some(1),
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let document = json!([
        {
            "type": "function",
            "name": "getPrice",
            "inputs": [{ "name": "asset", "type": "bytes32" }],
            "outputs": [{ "name": "", "type": "uint256" }],
            "stateMutability": "view"
        },
        {
            "type": "function",
            "name": "updatePrice",
            "inputs": [{ "name": "price", "type": "uint256" }],
            "outputs": [],
            "stateMutability": "nonpayable"
        }
    ]);

    let gate = Arc::new(ConnectionGate::new());
    let mut console = ContractConsole::new("minimal", Arc::clone(&gate));
    console.load_descriptors(&document)?;

    let mut out = std::io::stdout();
    write!(out, "{}", console.generate_client_surface())?;

    gate.connect(Arc::new(InMemoryChannel));
    let get_price = MethodName::new("getPrice");
    console.set_argument(&get_price, 0, "0x01")?;
    let fetched = console.invoke(&get_price).await?;
    writeln!(out, "{}", fetched.display_message())?;

    let update_price = MethodName::new("updatePrice");
    console.set_argument(&update_price, 0, "42")?;
    let confirmed = console.invoke(&update_price).await?;
    writeln!(out, "{}", confirmed.display_message())?;
    Ok(())
}
