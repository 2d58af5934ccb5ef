// crates/contract-console-cli/src/lib.rs
// ============================================================================
// Module: Contract Console CLI Library
// Description: Shared helpers for the contract console command-line interface.
// Purpose: Provide reusable components (i18n) for the CLI binary and tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! This library module houses shared CLI utilities, including the internationalized
//! message catalog. The binary entry point (`src/main.rs`) imports these helpers
//! to keep all user-facing output consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
