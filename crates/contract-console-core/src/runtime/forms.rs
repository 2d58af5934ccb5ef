// crates/contract-console-core/src/runtime/forms.rs
// ============================================================================
// Module: Method Forms
// Description: Per-descriptor form layout derived from a descriptor set.
// Purpose: Describe the input fields and action each method exposes.
// Dependencies: serde, crate::core, crate::runtime::arguments
// ============================================================================

//! ## Overview
//! One [`MethodForm`] is produced per descriptor, duplicates included, in
//! document order. Each field shows its placeholder as `name (type)` along
//! with whatever raw value the argument store currently holds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::DescriptorSet;
use crate::core::MethodDescriptor;
use crate::core::MethodIndex;
use crate::core::MethodName;
use crate::core::Mutability;
use crate::runtime::arguments::ArgumentStore;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Action button label for read methods.
pub const READ_ACTION_LABEL: &str = "Fetch";
/// Action button label for write methods.
pub const WRITE_ACTION_LABEL: &str = "Execute";

/// Input field for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// Zero-based parameter position.
    pub position: usize,
    /// Placeholder text, `name (type)`.
    pub placeholder: String,
    /// Current raw value from the argument store.
    pub value: String,
}

/// Form layout for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodForm {
    /// Method name.
    pub name: MethodName,
    /// Position of the descriptor within its set.
    pub index: MethodIndex,
    /// Read/write classification.
    pub mutability: Mutability,
    /// Action label (`Fetch` or `Execute`).
    pub action: &'static str,
    /// Input fields in parameter order.
    pub fields: Vec<FormField>,
}

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Returns the action label for a classification.
#[must_use]
pub const fn action_label(mutability: Mutability) -> &'static str {
    match mutability {
        Mutability::Read => READ_ACTION_LABEL,
        Mutability::Write => WRITE_ACTION_LABEL,
    }
}

/// Builds the form for one descriptor.
#[must_use]
pub fn method_form(
    index: MethodIndex,
    descriptor: &MethodDescriptor,
    arguments: &ArgumentStore,
) -> MethodForm {
    let fields = descriptor
        .parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| FormField {
            position,
            placeholder: format!(
                "{} ({})",
                parameter.display_name(position),
                parameter.param_type.display()
            ),
            value: arguments.argument(&descriptor.name, position).to_string(),
        })
        .collect();
    MethodForm {
        name: descriptor.name.clone(),
        index,
        mutability: descriptor.mutability,
        action: action_label(descriptor.mutability),
        fields,
    }
}

/// Builds forms for every descriptor in document order.
#[must_use]
pub fn method_forms(descriptors: &DescriptorSet, arguments: &ArgumentStore) -> Vec<MethodForm> {
    descriptors
        .iter()
        .enumerate()
        .map(|(position, descriptor)| {
            method_form(MethodIndex::new(position), descriptor, arguments)
        })
        .collect()
}
