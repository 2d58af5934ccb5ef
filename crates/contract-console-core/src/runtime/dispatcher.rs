// crates/contract-console-core/src/runtime/dispatcher.rs
// ============================================================================
// Module: Invocation Dispatcher
// Description: Drives one read or write invocation to a concluded outcome.
// Purpose: Branch on mutability and convert every failure into data.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`invoke`] is a two-state machine: pending until the channel answers, then
//! concluded with exactly one [`InvocationOutcome`].
//! - Reads call the channel once and normalize the result.
//! - Writes send the request, then wait for durable confirmation. A request
//!   accepted but not confirmed is a failure.
//!
//! Nothing is retried. Remote messages are surfaced verbatim; confirmation
//! failures carry a `confirmation failed:` prefix.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::ArgumentValue;
use crate::core::CallArgument;
use crate::core::InvocationError;
use crate::core::InvocationOutcome;
use crate::core::MethodDescriptor;
use crate::core::Mutability;
use crate::core::normalize;
use crate::interfaces::ContractChannel;

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Dispatches one invocation and returns its outcome.
///
/// `arguments` are raw positional values; empty strings are treated as
/// omitted. A missing channel yields [`InvocationError::NotConnected`]
/// without any remote contact.
pub async fn invoke(
    descriptor: &MethodDescriptor,
    arguments: &[String],
    connection: Option<&dyn ContractChannel>,
) -> InvocationOutcome {
    let Some(channel) = connection else {
        return InvocationOutcome::Failed(InvocationError::NotConnected);
    };
    let call_arguments = match align_arguments(descriptor, arguments) {
        Ok(call_arguments) => call_arguments,
        Err(error) => return InvocationOutcome::Failed(error),
    };
    match descriptor.mutability {
        Mutability::Read => dispatch_read(channel, descriptor, &call_arguments).await,
        Mutability::Write => dispatch_write(channel, descriptor, &call_arguments).await,
    }
}

/// Executes the read path.
async fn dispatch_read(
    channel: &dyn ContractChannel,
    descriptor: &MethodDescriptor,
    arguments: &[CallArgument],
) -> InvocationOutcome {
    match channel.call(descriptor, arguments).await {
        Ok(value) => InvocationOutcome::Fetched(normalize(&value)),
        Err(error) => InvocationOutcome::Failed(error.into()),
    }
}

/// Executes the write path: send, then wait for confirmation.
async fn dispatch_write(
    channel: &dyn ContractChannel,
    descriptor: &MethodDescriptor,
    arguments: &[CallArgument],
) -> InvocationOutcome {
    let pending = match channel.send(descriptor, arguments).await {
        Ok(pending) => pending,
        Err(error) => return InvocationOutcome::Failed(error.into()),
    };
    match pending.confirm().await {
        Ok(receipt) => InvocationOutcome::Confirmed(receipt),
        Err(error) => InvocationOutcome::Failed(error.context("confirmation failed").into()),
    }
}

// ============================================================================
// SECTION: Argument Alignment
// ============================================================================

/// Aligns raw values with the descriptor's parameters.
///
/// Missing positions become [`ArgumentValue::Omitted`]. Trailing empty
/// values beyond the arity are dropped.
///
/// # Errors
///
/// Returns [`InvocationError::RemoteRejected`] when a non-empty value sits
/// beyond the descriptor's arity.
pub fn align_arguments(
    descriptor: &MethodDescriptor,
    arguments: &[String],
) -> Result<Vec<CallArgument>, InvocationError> {
    if let Some(last) = arguments.iter().rposition(|raw| !raw.is_empty())
        && last >= descriptor.arity()
    {
        return Err(too_many_arguments(descriptor, last + 1));
    }
    Ok(descriptor
        .parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| CallArgument {
            name: parameter.name.clone(),
            param_type: parameter.param_type.clone(),
            value: arguments
                .get(position)
                .map_or(ArgumentValue::Omitted, |raw| ArgumentValue::from_raw(raw)),
        })
        .collect())
}

/// Builds the local rejection for surplus arguments.
#[must_use]
pub fn too_many_arguments(descriptor: &MethodDescriptor, supplied: usize) -> InvocationError {
    InvocationError::RemoteRejected(format!(
        "too many arguments for {}: expected {}, got {supplied}",
        descriptor.name,
        descriptor.arity()
    ))
}
