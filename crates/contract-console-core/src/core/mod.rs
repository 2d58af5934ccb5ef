// crates/contract-console-core/src/core/mod.rs
// ============================================================================
// Module: Contract Console Core Types
// Description: Descriptor, identifier, value, and outcome models.
// Purpose: Group the data types shared by the runtime and interfaces.
// Dependencies: crate::core::*
// ============================================================================

//! ## Overview
//! Core types are plain data: they hold no channels and perform no I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod descriptor;
pub mod identifiers;
pub mod outcome;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::DescriptorSet;
pub use descriptor::MethodDescriptor;
pub use descriptor::MethodIndex;
pub use descriptor::Mutability;
pub use descriptor::ParamType;
pub use descriptor::Parameter;
pub use descriptor::ReturnShape;
pub use identifiers::ConsoleName;
pub use identifiers::MethodName;
pub use outcome::ArgumentValue;
pub use outcome::CallArgument;
pub use outcome::InvocationError;
pub use outcome::InvocationOutcome;
pub use outcome::WriteReceipt;
pub use value::MAX_SAFE_INTEGER;
pub use value::ResultValue;
pub use value::normalize;
