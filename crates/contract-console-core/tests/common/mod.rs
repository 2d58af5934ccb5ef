// crates/contract-console-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared channels, sinks, and documents for console tests.
// Purpose: Provide scripted collaborators for dispatcher and console tests.
// Dependencies: contract-console-core, async-trait, serde_json, tokio
// ============================================================================

//! ## Overview
//! Provides a scripted [`ContractChannel`] that records every call, a
//! collecting audit sink, and small interface documents.

#![allow(
    dead_code,
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test helpers are selectively used across suites."
)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use contract_console_core::AuditSink;
use contract_console_core::CallArgument;
use contract_console_core::ChannelError;
use contract_console_core::ContractChannel;
use contract_console_core::DescriptorAuditEvent;
use contract_console_core::InvocationAuditEvent;
use contract_console_core::MethodDescriptor;
use contract_console_core::PendingWrite;
use contract_console_core::ResultValue;
use contract_console_core::WriteReceipt;
use serde_json::Value;
use serde_json::json;
use tokio::sync::Notify;

// ============================================================================
// SECTION: Scripted Channel
// ============================================================================

/// Channel operation observed by the scripted channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Read call.
    Call,
    /// Write submission.
    Send,
}

/// One observed channel operation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Operation kind.
    pub kind: CallKind,
    /// Method name.
    pub method: String,
    /// Arguments as received.
    pub arguments: Vec<CallArgument>,
}

/// Channel answering with fixed, scripted results.
pub struct ScriptedChannel {
    /// Result returned by `call`.
    read: Result<ResultValue, ChannelError>,
    /// Result of `send`; `Ok` carries the transaction id.
    send: Result<String, ChannelError>,
    /// Result of `confirm`.
    confirm: Result<Option<u64>, ChannelError>,
    /// Optional latch every operation waits on before answering.
    latch: Option<Arc<Notify>>,
    /// Observed operations.
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedChannel {
    /// Channel whose reads return `value` and whose writes confirm.
    pub fn reading(value: impl Into<ResultValue>) -> Self {
        Self {
            read: Ok(value.into()),
            send: Ok("0xabc".to_string()),
            confirm: Ok(Some(7)),
            latch: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the read result with a failure.
    pub fn with_read_error(mut self, error: ChannelError) -> Self {
        self.read = Err(error);
        self
    }

    /// Replaces the send result with a failure.
    pub fn with_send_error(mut self, error: ChannelError) -> Self {
        self.send = Err(error);
        self
    }

    /// Replaces the confirmation result with a failure.
    pub fn with_confirm_error(mut self, error: ChannelError) -> Self {
        self.confirm = Err(error);
        self
    }

    /// Makes every operation wait for the latch before answering.
    pub fn with_latch(mut self, latch: Arc<Notify>) -> Self {
        self.latch = Some(latch);
        self
    }

    /// Returns the observed operations.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Records an operation and waits on the latch when configured.
    async fn observe(&self, kind: CallKind, method: &MethodDescriptor, arguments: &[CallArgument]) {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            method: method.name.to_string(),
            arguments: arguments.to_vec(),
        });
        if let Some(latch) = &self.latch {
            latch.notified().await;
        }
    }
}

#[async_trait]
impl ContractChannel for ScriptedChannel {
    async fn call(
        &self,
        method: &MethodDescriptor,
        arguments: &[CallArgument],
    ) -> Result<ResultValue, ChannelError> {
        self.observe(CallKind::Call, method, arguments).await;
        self.read.clone()
    }

    async fn send(
        &self,
        method: &MethodDescriptor,
        arguments: &[CallArgument],
    ) -> Result<Box<dyn PendingWrite>, ChannelError> {
        self.observe(CallKind::Send, method, arguments).await;
        let transaction_id = self.send.clone()?;
        Ok(Box::new(ScriptedPending {
            transaction_id,
            confirm: self.confirm.clone(),
        }))
    }
}

/// Pending write produced by the scripted channel.
struct ScriptedPending {
    /// Transaction identifier.
    transaction_id: String,
    /// Scripted confirmation result.
    confirm: Result<Option<u64>, ChannelError>,
}

#[async_trait]
impl PendingWrite for ScriptedPending {
    fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    async fn confirm(self: Box<Self>) -> Result<WriteReceipt, ChannelError> {
        let block_number = self.confirm?;
        Ok(WriteReceipt {
            transaction_id: self.transaction_id,
            block_number,
        })
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink collecting events in memory.
#[derive(Default)]
pub struct CollectingAuditSink {
    /// Invocation events.
    pub invocations: Mutex<Vec<InvocationAuditEvent>>,
    /// Descriptor load events.
    pub descriptors: Mutex<Vec<DescriptorAuditEvent>>,
}

impl AuditSink for CollectingAuditSink {
    fn record_invocation(&self, event: &InvocationAuditEvent) {
        self.invocations.lock().unwrap().push(event.clone());
    }

    fn record_descriptor(&self, event: &DescriptorAuditEvent) {
        self.descriptors.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Builds a method entry.
pub fn method_entry(name: &str, inputs: &[(&str, &str)], state_mutability: &str) -> Value {
    let inputs: Vec<Value> =
        inputs.iter().map(|(name, kind)| json!({ "name": name, "type": kind })).collect();
    json!({
        "type": "function",
        "name": name,
        "inputs": inputs,
        "outputs": [],
        "stateMutability": state_mutability
    })
}

/// Two-method document: one read with one argument, one write with two.
pub fn price_document() -> Value {
    json!([
        method_entry("getPrice", &[("asset", "bytes32")], "view"),
        method_entry("transfer", &[("to", "address"), ("amount", "uint256")], "nonpayable"),
        { "type": "event", "name": "Transfer", "inputs": [] }
    ])
}

/// Returns the path of a shipped console interface document.
pub fn shipped_abi(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../consoles/abi")
        .join(format!("{name}.json"))
}
