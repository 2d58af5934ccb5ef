// crates/contract-console-core/src/lib.rs
// ============================================================================
// Module: Contract Console Core Library
// Description: Public API surface for the contract console engine.
// Purpose: Expose descriptor types, channel interfaces, and runtime helpers.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Contract console core turns a contract interface document into a set of
//! invocable method descriptors, renders a typed client surface for them,
//! collects raw arguments, and dispatches reads and writes through an
//! externally supplied channel. Results are normalized so wide integers never
//! lose precision. Wallet linkage and transport stay behind
//! [`ContractChannel`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use audit::AuditOutcome;
pub use audit::AuditSink;
pub use audit::DescriptorAuditEvent;
pub use audit::FileAuditSink;
pub use audit::InvocationAuditEvent;
pub use audit::InvocationAuditEventParams;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use interfaces::ChannelError;
pub use interfaces::ContractChannel;
pub use interfaces::PendingWrite;
pub use runtime::ArgumentError;
pub use runtime::ArgumentStore;
pub use runtime::ConnectionGate;
pub use runtime::ConsoleError;
pub use runtime::ContractConsole;
pub use runtime::DescriptorError;
pub use runtime::MAX_ARGUMENT_POSITION;
pub use runtime::MethodForm;
pub use runtime::PreparedInvocation;
pub use runtime::SurfaceOptions;
pub use runtime::generate_client_surface;
pub use runtime::load_descriptor_slice;
pub use runtime::load_descriptors;
