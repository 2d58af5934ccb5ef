// crates/contract-console-core/src/runtime/console.rs
// ============================================================================
// Module: Console Session
// Description: Caller-facing facade over one contract's descriptors and state.
// Purpose: Tie loading, rendering, argument editing, and dispatch together.
// Dependencies: serde_json, thiserror, crate::audit, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! A [`ContractConsole`] owns one descriptor set, one argument store, a
//! handle to the shared [`ConnectionGate`], and the most recent outcome.
//!
//! Dispatch is split in two so argument edits and reconnects never race an
//! in-flight call:
//! - [`ContractConsole::prepare`] snapshots the descriptor, arguments,
//!   channel, and a sequence number synchronously.
//! - [`PreparedInvocation::run`] is the suspended part. Its outcome replaces
//!   the console's recorded outcome only if no newer dispatch has reported.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use serde_json::Value;
use thiserror::Error;

use crate::audit::AuditSink;
use crate::audit::DescriptorAuditEvent;
use crate::audit::InvocationAuditEvent;
use crate::audit::InvocationAuditEventParams;
use crate::audit::NoopAuditSink;
use crate::core::ConsoleName;
use crate::core::DescriptorSet;
use crate::core::InvocationOutcome;
use crate::core::MethodDescriptor;
use crate::core::MethodIndex;
use crate::core::MethodName;
use crate::interfaces::ContractChannel;
use crate::runtime::arguments::ArgumentError;
use crate::runtime::arguments::ArgumentStore;
use crate::runtime::dispatcher;
use crate::runtime::forms::MethodForm;
use crate::runtime::forms::method_forms;
use crate::runtime::gate::ConnectionGate;
use crate::runtime::loader::DescriptorError;
use crate::runtime::loader::load_descriptor_slice;
use crate::runtime::loader::load_descriptors;
use crate::runtime::surface::SurfaceOptions;
use crate::runtime::surface::generate_client_surface_with;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Caller errors raised before an invocation is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// No descriptor carries the requested name.
    #[error("unknown method: {0}")]
    UnknownMethod(MethodName),
    /// No descriptor exists at the requested position.
    #[error("unknown method index: {0}")]
    UnknownIndex(usize),
}

// ============================================================================
// SECTION: Console
// ============================================================================

/// Most recent outcome, tagged with its dispatch sequence.
type OutcomeSlot = Arc<Mutex<Option<(u64, InvocationOutcome)>>>;

/// Session for one fixed contract.
///
/// # Invariants
/// - The descriptor set is replaced atomically; a failed load changes nothing.
/// - The recorded outcome always belongs to the newest dispatch that concluded
///   without a newer one having concluded first.
pub struct ContractConsole {
    /// Console name used in audit events.
    name: ConsoleName,
    /// Loaded descriptors.
    descriptors: Arc<DescriptorSet>,
    /// Pending raw arguments.
    arguments: ArgumentStore,
    /// Shared connection slot.
    gate: Arc<ConnectionGate>,
    /// Client surface rendering options.
    surface: SurfaceOptions,
    /// Audit sink for loads and invocations.
    audit: Arc<dyn AuditSink>,
    /// Last dispatch sequence handed out.
    sequence: u64,
    /// Most recent outcome.
    outcome: OutcomeSlot,
}

impl ContractConsole {
    /// Creates a console with an empty descriptor set.
    #[must_use]
    pub fn new(name: impl Into<ConsoleName>, gate: Arc<ConnectionGate>) -> Self {
        Self {
            name: name.into(),
            descriptors: Arc::new(DescriptorSet::empty()),
            arguments: ArgumentStore::new(),
            gate,
            surface: SurfaceOptions::default(),
            audit: Arc::new(NoopAuditSink),
            sequence: 0,
            outcome: Arc::new(Mutex::new(None)),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Replaces the client surface options.
    #[must_use]
    pub fn with_surface_options(mut self, surface: SurfaceOptions) -> Self {
        self.surface = surface;
        self
    }

    /// Returns the console name.
    #[must_use]
    pub const fn name(&self) -> &ConsoleName {
        &self.name
    }

    /// Returns the loaded descriptor set.
    #[must_use]
    pub fn descriptors(&self) -> &DescriptorSet {
        &self.descriptors
    }

    /// Returns the shared connection gate.
    #[must_use]
    pub const fn gate(&self) -> &Arc<ConnectionGate> {
        &self.gate
    }

    /// Returns the pending argument store.
    #[must_use]
    pub const fn arguments(&self) -> &ArgumentStore {
        &self.arguments
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Loads descriptors from a parsed interface document.
    ///
    /// On success the previous set is replaced and pending arguments are
    /// cleared. Returns the number of descriptors loaded.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when the document is malformed; the
    /// console keeps its previous descriptors and arguments.
    pub fn load_descriptors(&mut self, document: &Value) -> Result<usize, DescriptorError> {
        let loaded = load_descriptors(document);
        self.install(loaded)
    }

    /// Loads descriptors from raw interface document bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when the bytes are oversized or malformed.
    pub fn load_descriptor_slice(&mut self, bytes: &[u8]) -> Result<usize, DescriptorError> {
        let loaded = load_descriptor_slice(bytes);
        self.install(loaded)
    }

    /// Installs a load result and records its audit event.
    fn install(
        &mut self,
        loaded: Result<DescriptorSet, DescriptorError>,
    ) -> Result<usize, DescriptorError> {
        match loaded {
            Ok(set) => {
                let count = set.len();
                self.descriptors = Arc::new(set);
                self.arguments.clear();
                self.audit
                    .record_descriptor(&DescriptorAuditEvent::loaded(self.name.clone(), count));
                Ok(count)
            }
            Err(error) => {
                self.audit.record_descriptor(&DescriptorAuditEvent::rejected(
                    self.name.clone(),
                    error.to_string(),
                ));
                Err(error)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Renders the client surface for the loaded descriptors.
    #[must_use]
    pub fn generate_client_surface(&self) -> String {
        generate_client_surface_with(&self.descriptors, &self.surface)
    }

    /// Returns the form layout of every descriptor.
    #[must_use]
    pub fn forms(&self) -> Vec<MethodForm> {
        method_forms(&self.descriptors, &self.arguments)
    }

    // ------------------------------------------------------------------------
    // Arguments
    // ------------------------------------------------------------------------

    /// Writes a raw argument value for a method.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when `index` exceeds the store's position limit.
    pub fn set_argument(
        &mut self,
        method: &MethodName,
        index: usize,
        raw: impl Into<String>,
    ) -> Result<(), ArgumentError> {
        self.arguments.set_argument(method, index, raw)
    }

    /// Returns the dense pending argument list for a method.
    #[must_use]
    pub fn get_arguments(&self, method: &MethodName) -> Vec<String> {
        self.arguments.get_arguments(method)
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Snapshots an invocation of the named method.
    ///
    /// Duplicate names resolve to the last descriptor in the document.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UnknownMethod`] when no descriptor has the name.
    pub fn prepare(&mut self, method: &MethodName) -> Result<PreparedInvocation, ConsoleError> {
        let (_, descriptor) = self
            .descriptors
            .lookup(method)
            .ok_or_else(|| ConsoleError::UnknownMethod(method.clone()))?;
        let descriptor = descriptor.clone();
        Ok(self.snapshot(descriptor))
    }

    /// Snapshots an invocation of the descriptor at a specific position.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UnknownIndex`] when the position is out of range.
    pub fn prepare_instance(
        &mut self,
        index: MethodIndex,
    ) -> Result<PreparedInvocation, ConsoleError> {
        let descriptor = self
            .descriptors
            .get(index)
            .cloned()
            .ok_or(ConsoleError::UnknownIndex(index.get()))?;
        Ok(self.snapshot(descriptor))
    }

    /// Invokes the named method and waits for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] when the method is unknown. Remote failures
    /// are reported inside the returned outcome.
    pub async fn invoke(&mut self, method: &MethodName) -> Result<InvocationOutcome, ConsoleError> {
        let prepared = self.prepare(method)?;
        Ok(prepared.run().await)
    }

    /// Invokes the descriptor at a specific position and waits for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] when the position is out of range.
    pub async fn invoke_instance(
        &mut self,
        index: MethodIndex,
    ) -> Result<InvocationOutcome, ConsoleError> {
        let prepared = self.prepare_instance(index)?;
        Ok(prepared.run().await)
    }

    /// Returns the most recently recorded outcome.
    #[must_use]
    pub fn last_outcome(&self) -> Option<InvocationOutcome> {
        self.outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, outcome)| outcome.clone())
    }

    /// Captures everything a dispatch needs into an owned value.
    fn snapshot(&mut self, descriptor: MethodDescriptor) -> PreparedInvocation {
        self.sequence += 1;
        let arity = descriptor.arity();
        PreparedInvocation {
            console: self.name.clone(),
            sequence: self.sequence,
            arguments: self.arguments.leading(&descriptor.name, arity),
            overflow: self.arguments.overflow(&descriptor.name, arity),
            descriptor,
            channel: self.gate.current(),
            audit: Arc::clone(&self.audit),
            outcome: Arc::clone(&self.outcome),
        }
    }
}

// ============================================================================
// SECTION: Prepared Invocation
// ============================================================================

/// Owned snapshot of one dispatch, independent of later console edits.
pub struct PreparedInvocation {
    /// Console name for audit events.
    console: ConsoleName,
    /// Dispatch sequence number.
    sequence: u64,
    /// Descriptor being invoked.
    descriptor: MethodDescriptor,
    /// Raw arguments up to the descriptor's arity.
    arguments: Vec<String>,
    /// Highest non-empty position beyond the arity, if any.
    overflow: Option<usize>,
    /// Channel captured at dispatch time.
    channel: Option<Arc<dyn ContractChannel>>,
    /// Audit sink.
    audit: Arc<dyn AuditSink>,
    /// Console outcome slot.
    outcome: OutcomeSlot,
}

impl PreparedInvocation {
    /// Returns the dispatch sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the descriptor being invoked.
    #[must_use]
    pub const fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    /// Runs the invocation to its outcome and records it on the console.
    pub async fn run(self) -> InvocationOutcome {
        let outcome = match (self.channel.as_deref(), self.overflow) {
            (Some(_), Some(last)) => InvocationOutcome::Failed(dispatcher::too_many_arguments(
                &self.descriptor,
                last + 1,
            )),
            (channel, _) => dispatcher::invoke(&self.descriptor, &self.arguments, channel).await,
        };
        self.audit.record_invocation(&InvocationAuditEvent::new(InvocationAuditEventParams {
            console: self.console,
            method: self.descriptor.name.clone(),
            mutability: self.descriptor.mutability,
            sequence: self.sequence,
            argument_count: self.descriptor.arity(),
            outcome: &outcome,
        }));
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        let newer_recorded = slot.as_ref().is_some_and(|(sequence, _)| *sequence > self.sequence);
        if !newer_recorded {
            *slot = Some((self.sequence, outcome.clone()));
        }
        outcome
    }
}
