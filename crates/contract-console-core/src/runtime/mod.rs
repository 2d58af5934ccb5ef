// crates/contract-console-core/src/runtime/mod.rs
// ============================================================================
// Module: Contract Console Runtime
// Description: Loader, generator, argument store, dispatcher, and console session.
// Purpose: Turn interface documents into invocable, observable method calls.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the invocation pipeline. The console session is
//! the single caller-facing entry point; the other modules stay usable on
//! their own for tooling that only needs to parse or render documents.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod arguments;
pub mod console;
pub mod dispatcher;
pub mod forms;
pub mod gate;
pub mod loader;
pub mod surface;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use arguments::ArgumentError;
pub use arguments::ArgumentStore;
pub use arguments::MAX_ARGUMENT_POSITION;
pub use console::ConsoleError;
pub use console::ContractConsole;
pub use console::PreparedInvocation;
pub use dispatcher::align_arguments;
pub use dispatcher::invoke;
pub use forms::FormField;
pub use forms::MethodForm;
pub use forms::method_forms;
pub use gate::ConnectionGate;
pub use loader::DescriptorError;
pub use loader::MAX_DOCUMENT_BYTES;
pub use loader::METHOD_ENTRY_TYPE;
pub use loader::load_descriptor_slice;
pub use loader::load_descriptors;
pub use surface::DEFAULT_INTERFACE_NAME;
pub use surface::SurfaceOptions;
pub use surface::generate_client_surface;
pub use surface::generate_client_surface_with;
pub use surface::render_signature;
