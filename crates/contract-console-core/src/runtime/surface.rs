// crates/contract-console-core/src/runtime/surface.rs
// ============================================================================
// Module: Typed Client Generator
// Description: Renders a typed client surface for a descriptor set.
// Purpose: Give operators a readable summary of what a contract exposes.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The client surface is a TypeScript-style interface with one asynchronous
//! signature per descriptor, in document order:
//!
//! ```text
//! interface ContractInterface {
//!   getPrice(asset: bytes32): Promise<any>;
//! }
//! ```
//!
//! The output is documentation only and is never evaluated. Rendering is
//! total and deterministic: the same descriptor set always yields the same
//! text, duplicates included. Control characters in names and type labels
//! are escaped, so each descriptor occupies exactly one line.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DescriptorSet;
use crate::core::MethodDescriptor;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Default name of the rendered interface.
pub const DEFAULT_INTERFACE_NAME: &str = "ContractInterface";

/// Rendering options for the client surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Name of the rendered interface.
    pub interface_name: String,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            interface_name: DEFAULT_INTERFACE_NAME.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the client surface with default options.
#[must_use]
pub fn generate_client_surface(descriptors: &DescriptorSet) -> String {
    generate_client_surface_with(descriptors, &SurfaceOptions::default())
}

/// Renders the client surface with explicit options.
#[must_use]
pub fn generate_client_surface_with(
    descriptors: &DescriptorSet,
    options: &SurfaceOptions,
) -> String {
    let mut out = String::new();
    out.push_str("interface ");
    out.push_str(&options.interface_name);
    out.push_str(" {\n");
    for descriptor in descriptors.iter() {
        out.push_str("  ");
        out.push_str(&render_signature(descriptor));
        out.push_str(": Promise<any>;\n");
    }
    out.push_str("}\n");
    out
}

/// Renders `name(param: type, ...)` for one descriptor.
#[must_use]
pub fn render_signature(descriptor: &MethodDescriptor) -> String {
    let params: Vec<String> = descriptor
        .parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| {
            format!("{}: {}", parameter.display_name(position), parameter.param_type.display())
        })
        .collect();
    escape_control(&format!("{}({})", descriptor.name, params.join(", ")))
}

/// Escapes control characters so a signature never spans lines.
fn escape_control(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    out
}
