// crates/contract-console-core/src/audit.rs
// ============================================================================
// Module: Invocation Audit
// Description: Structured audit events for descriptor loads and invocations.
// Purpose: Emit redacted JSON-line records without a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Each concluded invocation and each descriptor load produces one audit
//! event. Events carry labels and counts only: raw argument values and
//! result payloads are never recorded. Sinks decide where the JSON lines go.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::ConsoleName;
use crate::core::InvocationOutcome;
use crate::core::MethodName;
use crate::core::Mutability;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome label shared by audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// The operation succeeded.
    Ok,
    /// The operation failed.
    Error,
}

/// Invocation audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Console that dispatched the invocation.
    pub console: ConsoleName,
    /// Invoked method name.
    pub method: MethodName,
    /// Read/write classification of the method.
    pub mutability: Mutability,
    /// Dispatch sequence number within the console.
    pub sequence: u64,
    /// Invocation outcome.
    pub outcome: AuditOutcome,
    /// Stable error kind label when the invocation failed.
    pub error_kind: Option<&'static str>,
    /// Number of declared arguments sent.
    pub argument_count: usize,
    /// Transaction identifier for confirmed writes.
    pub transaction_id: Option<String>,
}

/// Inputs required to construct an invocation audit event.
pub struct InvocationAuditEventParams<'a> {
    /// Console that dispatched the invocation.
    pub console: ConsoleName,
    /// Invoked method name.
    pub method: MethodName,
    /// Read/write classification of the method.
    pub mutability: Mutability,
    /// Dispatch sequence number within the console.
    pub sequence: u64,
    /// Number of declared arguments sent.
    pub argument_count: usize,
    /// Concluded outcome.
    pub outcome: &'a InvocationOutcome,
}

impl InvocationAuditEvent {
    /// Creates a new invocation audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: InvocationAuditEventParams<'_>) -> Self {
        let (outcome, error_kind, transaction_id) = match params.outcome {
            InvocationOutcome::Fetched(_) => (AuditOutcome::Ok, None, None),
            InvocationOutcome::Confirmed(receipt) => {
                (AuditOutcome::Ok, None, Some(receipt.transaction_id.clone()))
            }
            InvocationOutcome::Failed(error) => (AuditOutcome::Error, Some(error.kind()), None),
        };
        Self {
            event: "contract_invocation",
            timestamp_ms: now_ms(),
            console: params.console,
            method: params.method,
            mutability: params.mutability,
            sequence: params.sequence,
            outcome,
            error_kind,
            argument_count: params.argument_count,
            transaction_id,
        }
    }
}

/// Descriptor load audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Console that loaded the document.
    pub console: ConsoleName,
    /// Number of method descriptors loaded (zero on failure).
    pub method_count: usize,
    /// Load outcome.
    pub outcome: AuditOutcome,
    /// Failure message when the document was rejected.
    pub error: Option<String>,
}

impl DescriptorAuditEvent {
    /// Creates an event for a successful load.
    #[must_use]
    pub fn loaded(console: ConsoleName, method_count: usize) -> Self {
        Self {
            event: "descriptor_load",
            timestamp_ms: now_ms(),
            console,
            method_count,
            outcome: AuditOutcome::Ok,
            error: None,
        }
    }

    /// Creates an event for a rejected document.
    #[must_use]
    pub fn rejected(console: ConsoleName, error: String) -> Self {
        Self {
            event: "descriptor_load",
            timestamp_ms: now_ms(),
            console,
            method_count: 0,
            outcome: AuditOutcome::Error,
            error: Some(error),
        }
    }
}

/// Returns the current time in milliseconds since the epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for console events.
pub trait AuditSink: Send + Sync {
    /// Record an invocation audit event.
    fn record_invocation(&self, event: &InvocationAuditEvent);

    /// Record a descriptor load audit event.
    fn record_descriptor(&self, _event: &DescriptorAuditEvent) {}
}

/// Audit sink that discards events.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_invocation(&self, _event: &InvocationAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl StderrAuditSink {
    /// Writes one serialized event to stderr.
    fn emit<T: Serialize>(event: &T) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

impl AuditSink for StderrAuditSink {
    fn record_invocation(&self, event: &InvocationAuditEvent) {
        Self::emit(event);
    }

    fn record_descriptor(&self, event: &DescriptorAuditEvent) {
        Self::emit(event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event.
    fn emit<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_invocation(&self, event: &InvocationAuditEvent) {
        self.emit(event);
    }

    fn record_descriptor(&self, event: &DescriptorAuditEvent) {
        self.emit(event);
    }
}
