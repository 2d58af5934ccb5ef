// crates/contract-console-core/src/interfaces/mod.rs
// ============================================================================
// Module: Contract Console Interfaces
// Description: Backend-agnostic channel interfaces for reads and writes.
// Purpose: Define the connection gate boundary used by the dispatcher.
// Dependencies: async-trait, thiserror, crate::core
// ============================================================================

//! ## Overview
//! A [`ContractChannel`] is the authenticated capability an external wallet
//! integration installs before anything can be dispatched. The engine never
//! establishes one itself: wallet linkage, account selection, signing, and
//! transport all live behind this trait.
//!
//! Implementations must report refusals (bad arguments, reverted execution)
//! as [`ChannelError::Rejected`] and transport faults as
//! [`ChannelError::Unavailable`]. Neither is retried by the engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::core::CallArgument;
use crate::core::InvocationError;
use crate::core::MethodDescriptor;
use crate::core::ResultValue;
use crate::core::WriteReceipt;

// ============================================================================
// SECTION: Channel Errors
// ============================================================================

/// Errors reported by channel implementations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The remote refused the call or transaction.
    #[error("{0}")]
    Rejected(String),
    /// The channel could not reach the remote.
    #[error("{0}")]
    Unavailable(String),
}

impl ChannelError {
    /// Prefixes the message while keeping the failure kind.
    #[must_use]
    pub fn context(self, prefix: &str) -> Self {
        match self {
            Self::Rejected(message) => Self::Rejected(format!("{prefix}: {message}")),
            Self::Unavailable(message) => Self::Unavailable(format!("{prefix}: {message}")),
        }
    }
}

impl From<ChannelError> for InvocationError {
    fn from(error: ChannelError) -> Self {
        match error {
            ChannelError::Rejected(message) => Self::RemoteRejected(message),
            ChannelError::Unavailable(message) => Self::RemoteUnavailable(message),
        }
    }
}

// ============================================================================
// SECTION: Channel
// ============================================================================

/// Authenticated call/transaction capability for one contract.
#[async_trait]
pub trait ContractChannel: Send + Sync {
    /// Executes a side-effect-free call and returns its raw result.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the call is refused or the transport fails.
    async fn call(
        &self,
        method: &MethodDescriptor,
        arguments: &[CallArgument],
    ) -> Result<ResultValue, ChannelError>;

    /// Submits a state-changing request and returns a handle once accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the request is refused before acceptance
    /// or the transport fails.
    async fn send(
        &self,
        method: &MethodDescriptor,
        arguments: &[CallArgument],
    ) -> Result<Box<dyn PendingWrite>, ChannelError>;
}

/// Handle to an accepted write awaiting durable confirmation.
#[async_trait]
pub trait PendingWrite: Send {
    /// Returns the identifier assigned on acceptance.
    fn transaction_id(&self) -> &str;

    /// Waits until the write is durably confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when confirmation fails.
    async fn confirm(self: Box<Self>) -> Result<WriteReceipt, ChannelError>;
}
