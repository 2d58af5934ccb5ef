// crates/contract-console-core/src/core/descriptor.rs
// ============================================================================
// Module: Interface Descriptors
// Description: Schema of remote callable methods and the loaded descriptor set.
// Purpose: Give the dispatcher and generator one immutable, indexed view of a contract.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! An [`MethodDescriptor`] captures everything the engine needs to render and
//! dispatch one remote method: its name, ordered typed parameters, the
//! read/write classification, and an optional return shape used only for
//! documentation.
//!
//! A [`DescriptorSet`] is immutable once built. Name lookup is resolved at
//! construction into an index where the *last* descriptor with a given name
//! wins; per-instance access stays available through [`MethodIndex`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::identifiers::MethodName;

// ============================================================================
// SECTION: Mutability
// ============================================================================

/// Read/write classification of a remote method.
///
/// # Invariants
/// - `Read` methods never alter remote state and resolve with a value.
/// - `Write` methods alter remote state and complete only after confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutability {
    /// Side-effect-free call answered immediately.
    Read,
    /// State-changing request that must be durably confirmed.
    Write,
}

impl Mutability {
    /// Classifies a method from its raw `stateMutability` label and the
    /// legacy `constant` flag.
    ///
    /// `view` and `pure` are reads; `nonpayable`, `payable`, and any other
    /// label are writes. Without a label, `constant: true` marks a read.
    #[must_use]
    pub fn classify(state_mutability: Option<&str>, constant: Option<bool>) -> Self {
        match state_mutability {
            Some("view" | "pure") => Self::Read,
            Some(_) => Self::Write,
            None if constant == Some(true) => Self::Read,
            None => Self::Write,
        }
    }

    /// Returns a stable label for the classification.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }

    /// Returns true for read classifications.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read)
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Declared type of a parameter or return value.
///
/// # Invariants
/// - `declared` is kept exactly as written in the interface document.
/// - `components` is non-empty only for tuple types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamType {
    /// Type label as declared (for example `uint256` or `tuple[]`).
    pub declared: String,
    /// Tuple members, in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Parameter>,
}

impl ParamType {
    /// Creates a scalar type without tuple components.
    #[must_use]
    pub fn scalar(declared: impl Into<String>) -> Self {
        Self {
            declared: declared.into(),
            components: Vec::new(),
        }
    }

    /// Returns the display form of the type.
    ///
    /// Tuple types render their component types in place of the `tuple`
    /// keyword while keeping any array suffix, so `tuple[]` with members
    /// `address` and `uint256` renders as `(address,uint256)[]`.
    #[must_use]
    pub fn display(&self) -> String {
        let Some(suffix) = self.declared.strip_prefix("tuple") else {
            return self.declared.clone();
        };
        if self.components.is_empty() {
            return self.declared.clone();
        }
        let members: Vec<String> =
            self.components.iter().map(|component| component.param_type.display()).collect();
        format!("({}){suffix}", members.join(","))
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Named, typed parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Parameter name; may be empty for unnamed parameters.
    pub name: String,
    /// Declared parameter type.
    #[serde(rename = "type")]
    pub param_type: ParamType,
}

impl Parameter {
    /// Creates a scalar parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, declared: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::scalar(declared),
        }
    }

    /// Returns the name used for display, substituting `arg{position}` for
    /// unnamed parameters.
    #[must_use]
    pub fn display_name(&self, position: usize) -> String {
        if self.name.is_empty() { format!("arg{position}") } else { self.name.clone() }
    }
}

/// Expected structure of a method result.
///
/// Used for documentation only; results are never checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReturnShape {
    /// Output values in declaration order.
    pub outputs: Vec<Parameter>,
}

impl ReturnShape {
    /// Renders the shape as a parenthesized type list, e.g. `(uint256,bool)`.
    #[must_use]
    pub fn display(&self) -> String {
        let types: Vec<String> =
            self.outputs.iter().map(|output| output.param_type.display()).collect();
        format!("({})", types.join(","))
    }
}

// ============================================================================
// SECTION: Method Descriptor
// ============================================================================

/// Schema of one remote callable method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    /// Method name (not necessarily unique within a set).
    pub name: MethodName,
    /// Ordered parameters; order is preserved through dispatch.
    pub parameters: Vec<Parameter>,
    /// Read/write classification.
    pub mutability: Mutability,
    /// Raw mutability label as declared, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    /// Whether the method accepts attached value.
    pub payable: bool,
    /// Documented return shape, when the document declares outputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_shape: Option<ReturnShape>,
}

impl MethodDescriptor {
    /// Creates a descriptor without return shape or raw mutability label.
    #[must_use]
    pub fn new(
        name: impl Into<MethodName>,
        parameters: Vec<Parameter>,
        mutability: Mutability,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            mutability,
            state_mutability: None,
            payable: false,
            return_shape: None,
        }
    }

    /// Returns the number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Returns the canonical signature, e.g. `transfer(address,uint256)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let types: Vec<String> =
            self.parameters.iter().map(|parameter| parameter.param_type.display()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

// ============================================================================
// SECTION: Descriptor Set
// ============================================================================

/// Position of a descriptor within its set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MethodIndex(usize);

impl MethodIndex {
    /// Creates an index from a raw position.
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Returns the raw position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Immutable, ordered set of method descriptors.
///
/// # Invariants
/// - Descriptor order matches the interface document.
/// - Name lookup resolves to the last descriptor carrying that name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescriptorSet {
    /// Descriptors in encounter order.
    descriptors: Vec<MethodDescriptor>,
    /// Name index; later descriptors overwrite earlier ones.
    by_name: BTreeMap<MethodName, MethodIndex>,
}

impl DescriptorSet {
    /// Builds a set from descriptors in encounter order.
    #[must_use]
    pub fn new(descriptors: Vec<MethodDescriptor>) -> Self {
        let by_name = descriptors
            .iter()
            .enumerate()
            .map(|(position, descriptor)| (descriptor.name.clone(), MethodIndex::new(position)))
            .collect();
        Self {
            descriptors,
            by_name,
        }
    }

    /// Returns an empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of descriptors, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true when the set holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Iterates descriptors in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &MethodDescriptor> {
        self.descriptors.iter()
    }

    /// Returns the descriptor at a specific position.
    #[must_use]
    pub fn get(&self, index: MethodIndex) -> Option<&MethodDescriptor> {
        self.descriptors.get(index.get())
    }

    /// Resolves a name to its authoritative (last) descriptor.
    #[must_use]
    pub fn lookup(&self, name: &MethodName) -> Option<(MethodIndex, &MethodDescriptor)> {
        let index = *self.by_name.get(name)?;
        self.get(index).map(|descriptor| (index, descriptor))
    }

    /// Returns every position carrying the given name, in encounter order.
    #[must_use]
    pub fn instances(&self, name: &MethodName) -> Vec<MethodIndex> {
        self.descriptors
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| &descriptor.name == name)
            .map(|(position, _)| MethodIndex::new(position))
            .collect()
    }

    /// Returns the number of distinct method names.
    #[must_use]
    pub fn distinct_names(&self) -> usize {
        self.by_name.len()
    }
}
