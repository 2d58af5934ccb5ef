// crates/contract-console-core/src/core/outcome.rs
// ============================================================================
// Module: Invocation Outcomes
// Description: Call arguments, write receipts, and the tagged invocation outcome.
// Purpose: Model dispatch results as explicit values rather than control flow.
// Dependencies: serde, thiserror, crate::core
// ============================================================================

//! ## Overview
//! Every dispatch concludes with exactly one [`InvocationOutcome`]: a
//! normalized value for reads, a [`WriteReceipt`] for confirmed writes, or an
//! [`InvocationError`]. Failure is an expected result here, so it is carried
//! as data and never raised past the dispatcher.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::core::descriptor::ParamType;
use crate::core::value::ResultValue;

// ============================================================================
// SECTION: Call Arguments
// ============================================================================

/// Raw argument value handed to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgumentValue {
    /// The caller left the field empty.
    Omitted,
    /// Raw, unparsed text entered by the caller.
    Provided(String),
}

impl ArgumentValue {
    /// Builds an argument from raw text; empty text means omitted.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() { Self::Omitted } else { Self::Provided(raw.to_string()) }
    }

    /// Returns the raw text when provided.
    #[must_use]
    pub fn as_provided(&self) -> Option<&str> {
        match self {
            Self::Omitted => None,
            Self::Provided(raw) => Some(raw),
        }
    }
}

/// Positional argument aligned with its declared parameter.
///
/// # Invariants
/// - Arguments reach the channel in declaration order.
/// - Type coercion is left to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallArgument {
    /// Declared parameter name (may be empty).
    pub name: String,
    /// Declared parameter type.
    pub param_type: ParamType,
    /// Raw value for this position.
    pub value: ArgumentValue,
}

// ============================================================================
// SECTION: Write Receipt
// ============================================================================

/// Durable confirmation of an accepted write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReceipt {
    /// Opaque transaction identifier assigned by the remote system.
    pub transaction_id: String,
    /// Block (or equivalent) in which the write was confirmed, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

// ============================================================================
// SECTION: Invocation Errors
// ============================================================================

/// Failure kinds surfaced by a dispatch.
///
/// # Invariants
/// - Variants are stable for programmatic handling and audit labels.
/// - Remote messages are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// No channel was installed when the invocation was dispatched.
    #[error("not connected: connect a wallet before invoking methods")]
    NotConnected,
    /// The channel refused the call (bad arguments, reverted execution).
    #[error("{0}")]
    RemoteRejected(String),
    /// The channel itself failed (network or transport fault).
    #[error("{0}")]
    RemoteUnavailable(String),
}

impl InvocationError {
    /// Returns a stable label for the failure kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotConnected => "not_connected",
            Self::RemoteRejected(_) => "remote_rejected",
            Self::RemoteUnavailable(_) => "remote_unavailable",
        }
    }
}

// ============================================================================
// SECTION: Invocation Outcome
// ============================================================================

/// Concluded result of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    /// A read resolved; the value is already normalized.
    Fetched(ResultValue),
    /// A write was durably confirmed.
    Confirmed(WriteReceipt),
    /// The invocation failed.
    Failed(InvocationError),
}

impl InvocationOutcome {
    /// Returns true for successful outcomes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&InvocationError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Fetched(_) | Self::Confirmed(_) => None,
        }
    }

    /// Returns the user-facing status line for the outcome.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Fetched(value) => format!("Fetched: {}", value.display_json()),
            Self::Confirmed(_) => "Transaction successful".to_string(),
            Self::Failed(error) => format!("Error: {error}"),
        }
    }
}
