// crates/contract-console-core/src/runtime/loader.rs
// ============================================================================
// Module: Descriptor Loader
// Description: Parses interface documents into descriptor sets.
// Purpose: Keep callable-method entries and reject structurally bad documents.
// Dependencies: serde, serde_json, thiserror, crate::core
// ============================================================================

//! ## Overview
//! An interface document is a JSON array of entries tagged by `type`. Only
//! `function` entries become [`MethodDescriptor`] values; constructors,
//! events, errors, and fallback declarations are discarded. Loading is
//! all-or-nothing: a single malformed entry fails the whole document and no
//! partial set is returned.
//!
//! Documents are treated as untrusted input. Byte input is bounded by
//! [`MAX_DOCUMENT_BYTES`] and the loader keeps no reference to the raw
//! document once the set is built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::DescriptorSet;
use crate::core::MethodDescriptor;
use crate::core::Mutability;
use crate::core::ParamType;
use crate::core::Parameter;
use crate::core::ReturnShape;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Entry tag marking a callable method.
pub const METHOD_ENTRY_TYPE: &str = "function";

/// Maximum interface document size accepted by [`load_descriptor_slice`].
pub const MAX_DOCUMENT_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading an interface document.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The document is not a structurally valid interface description.
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(String),
}

impl DescriptorError {
    /// Builds an error pointing at a specific document entry.
    fn at_entry(index: usize, reason: impl std::fmt::Display) -> Self {
        Self::MalformedDescriptor(format!("entry {index}: {reason}"))
    }
}

// ============================================================================
// SECTION: Raw Entry Model
// ============================================================================

/// Method entry fields the loader reads; other fields are ignored.
#[derive(Debug, Deserialize)]
struct RawMethodEntry {
    /// Method name.
    name: Option<String>,
    /// Ordered parameters.
    #[serde(default)]
    inputs: Vec<RawParameter>,
    /// Declared outputs, when present.
    outputs: Option<Vec<RawParameter>>,
    /// Mutability label.
    #[serde(rename = "stateMutability")]
    state_mutability: Option<String>,
    /// Legacy read-only flag.
    constant: Option<bool>,
    /// Legacy payable flag.
    payable: Option<bool>,
}

/// Parameter entry fields the loader reads.
#[derive(Debug, Deserialize)]
struct RawParameter {
    /// Parameter name; unnamed parameters are allowed.
    #[serde(default)]
    name: String,
    /// Declared type label.
    #[serde(rename = "type")]
    param_type: String,
    /// Tuple members.
    #[serde(default)]
    components: Vec<Self>,
}

impl RawParameter {
    /// Converts the raw parameter into its descriptor form.
    fn into_parameter(self) -> Result<Parameter, String> {
        reject_control_characters("parameter name", &self.name)?;
        reject_control_characters("parameter type", &self.param_type)?;
        Ok(Parameter {
            name: self.name,
            param_type: ParamType {
                declared: self.param_type,
                components: convert_parameters(self.components)?,
            },
        })
    }
}

/// Converts a raw parameter list, failing on the first malformed member.
fn convert_parameters(raw: Vec<RawParameter>) -> Result<Vec<Parameter>, String> {
    raw.into_iter().map(RawParameter::into_parameter).collect()
}

/// Rejects names and type labels that would break line-oriented rendering.
fn reject_control_characters(field: &str, value: &str) -> Result<(), String> {
    if value.chars().any(char::is_control) {
        return Err(format!("{field} contains control characters"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads a descriptor set from a parsed interface document.
///
/// # Errors
///
/// Returns [`DescriptorError::MalformedDescriptor`] when the document is not
/// an array, when an entry is not an object with a string `type`, or when a
/// method entry lacks a name, carries malformed parameters, or has a name or
/// type label containing control characters.
pub fn load_descriptors(document: &Value) -> Result<DescriptorSet, DescriptorError> {
    let Value::Array(entries) = document else {
        return Err(DescriptorError::MalformedDescriptor(
            "interface document must be an array of entries".to_string(),
        ));
    };
    let mut descriptors = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(fields) = entry else {
            return Err(DescriptorError::at_entry(index, "entry must be an object"));
        };
        let Some(entry_type) = fields.get("type").and_then(Value::as_str) else {
            return Err(DescriptorError::at_entry(index, "entry is missing a string type"));
        };
        if entry_type != METHOD_ENTRY_TYPE {
            continue;
        }
        descriptors.push(parse_method(index, entry)?);
    }
    Ok(DescriptorSet::new(descriptors))
}

/// Loads a descriptor set from raw JSON bytes.
///
/// # Errors
///
/// Returns [`DescriptorError::MalformedDescriptor`] when the input exceeds
/// [`MAX_DOCUMENT_BYTES`], is not valid JSON, or fails [`load_descriptors`].
pub fn load_descriptor_slice(bytes: &[u8]) -> Result<DescriptorSet, DescriptorError> {
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(DescriptorError::MalformedDescriptor(format!(
            "interface document exceeds {MAX_DOCUMENT_BYTES} bytes"
        )));
    }
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|err| DescriptorError::MalformedDescriptor(err.to_string()))?;
    load_descriptors(&document)
}

/// Parses one `function` entry.
fn parse_method(index: usize, entry: &Value) -> Result<MethodDescriptor, DescriptorError> {
    let raw =
        RawMethodEntry::deserialize(entry).map_err(|err| DescriptorError::at_entry(index, err))?;
    let name = match raw.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(DescriptorError::at_entry(index, "method entry is missing a name")),
    };
    reject_control_characters("method name", &name)
        .map_err(|reason| DescriptorError::at_entry(index, reason))?;
    let parameters =
        convert_parameters(raw.inputs).map_err(|reason| DescriptorError::at_entry(index, reason))?;
    let return_shape = raw
        .outputs
        .map(convert_parameters)
        .transpose()
        .map_err(|reason| DescriptorError::at_entry(index, reason))?
        .map(|outputs| ReturnShape {
            outputs,
        });
    let mutability = Mutability::classify(raw.state_mutability.as_deref(), raw.constant);
    let payable = raw.state_mutability.as_deref() == Some("payable") || raw.payable == Some(true);
    Ok(MethodDescriptor {
        name: name.into(),
        parameters,
        mutability,
        state_mutability: raw.state_mutability,
        payable,
        return_shape,
    })
}
