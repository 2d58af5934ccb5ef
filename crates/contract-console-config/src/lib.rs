// crates/contract-console-config/src/lib.rs
// ============================================================================
// Module: Contract Console Config Library
// Description: Canonical config model, validation, and bounded document reads.
// Purpose: Single source of truth for contract-console.toml semantics.
// Dependencies: contract-console-core, serde, toml
// ============================================================================

//! ## Overview
//! `contract-console-config` defines the configuration model for the
//! contract console tooling. It provides strict, fail-closed validation and
//! size-bounded reads of the interface documents each console points at.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
