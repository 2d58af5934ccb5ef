// crates/contract-console-core/src/runtime/gate.rs
// ============================================================================
// Module: Connection Gate
// Description: Slot holding the channel installed by the wallet integration.
// Purpose: Let reconnects swap channels without disturbing in-flight calls.
// Dependencies: std::sync, crate::interfaces
// ============================================================================

//! ## Overview
//! The gate is the only place a channel lives. The external wallet
//! integration installs a fresh channel on connect or account switch; each
//! dispatch takes a snapshot of whatever is installed at that moment and
//! keeps using it until it concludes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::interfaces::ContractChannel;

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Shared slot for the authenticated channel.
///
/// # Invariants
/// - Installing a channel never affects invocations already dispatched.
#[derive(Default)]
pub struct ConnectionGate {
    /// Currently installed channel, if any.
    channel: RwLock<Option<Arc<dyn ContractChannel>>>,
}

impl ConnectionGate {
    /// Creates a gate with no channel installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a channel, replacing any previous one.
    pub fn connect(&self, channel: Arc<dyn ContractChannel>) {
        *self.channel.write().unwrap_or_else(PoisonError::into_inner) = Some(channel);
    }

    /// Removes the installed channel.
    pub fn disconnect(&self) {
        *self.channel.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns a snapshot of the installed channel.
    #[must_use]
    pub fn current(&self) -> Option<Arc<dyn ContractChannel>> {
        self.channel.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns true when a channel is installed.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.channel.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}
