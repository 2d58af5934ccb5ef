// crates/contract-console-core/src/runtime/arguments.rs
// ============================================================================
// Module: Argument State Store
// Description: Per-method raw argument values collected before dispatch.
// Purpose: Preserve positional integrity while fields are edited out of order.
// Dependencies: thiserror, crate::core
// ============================================================================

//! ## Overview
//! The store is an arena keyed by `(method, position)`. Editing any position
//! implicitly extends that method's list; positions never written read back
//! as empty strings. Values are raw text: the store never looks at parameter
//! types, and an empty string means "argument omitted" to the dispatcher.
//!
//! Positions are bounded by [`MAX_ARGUMENT_POSITION`]; a write beyond it is
//! rejected and leaves the store unchanged, so a dense read never allocates
//! more than that many slots.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::MethodName;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Highest argument position accepted by [`ArgumentStore::set_argument`].
pub const MAX_ARGUMENT_POSITION: usize = 1023;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Argument edits rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The position exceeds [`MAX_ARGUMENT_POSITION`].
    #[error("argument position {index} exceeds the maximum of {max}")]
    PositionOutOfRange {
        /// Rejected position.
        index: usize,
        /// Highest accepted position.
        max: usize,
    },
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Arena key for one argument position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ArgumentSlot {
    /// Method owning the position.
    method: MethodName,
    /// Zero-based parameter position.
    position: usize,
}

impl ArgumentSlot {
    /// Returns the first slot of a method.
    fn first(method: &MethodName) -> Self {
        Self {
            method: method.clone(),
            position: 0,
        }
    }

    /// Returns the last accepted slot of a method.
    fn last(method: &MethodName) -> Self {
        Self {
            method: method.clone(),
            position: MAX_ARGUMENT_POSITION,
        }
    }
}

/// Pending raw arguments for every edited method.
///
/// # Invariants
/// - Each method's list is independent of every other method's list.
/// - A list's length is one past the highest position ever written.
/// - No written position exceeds [`MAX_ARGUMENT_POSITION`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentStore {
    /// Written values keyed by method and position.
    slots: BTreeMap<ArgumentSlot, String>,
}

impl ArgumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the raw value at `index` for `method`, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::PositionOutOfRange`] when `index` exceeds
    /// [`MAX_ARGUMENT_POSITION`]; the store is left unchanged.
    pub fn set_argument(
        &mut self,
        method: &MethodName,
        index: usize,
        raw: impl Into<String>,
    ) -> Result<(), ArgumentError> {
        if index > MAX_ARGUMENT_POSITION {
            return Err(ArgumentError::PositionOutOfRange {
                index,
                max: MAX_ARGUMENT_POSITION,
            });
        }
        self.slots.insert(
            ArgumentSlot {
                method: method.clone(),
                position: index,
            },
            raw.into(),
        );
        Ok(())
    }

    /// Returns the dense argument list for `method`.
    ///
    /// Unwritten positions below the highest written one are empty strings;
    /// a method never edited yields an empty list.
    #[must_use]
    pub fn get_arguments(&self, method: &MethodName) -> Vec<String> {
        let mut values = Vec::new();
        for (slot, raw) in self.method_slots(method) {
            values.resize(slot.position, String::new());
            values.push(raw.clone());
        }
        values
    }

    /// Returns the raw value at one position, or `""` when unwritten.
    #[must_use]
    pub fn argument(&self, method: &MethodName, index: usize) -> &str {
        self.slots
            .get(&ArgumentSlot {
                method: method.clone(),
                position: index,
            })
            .map_or("", String::as_str)
    }

    /// Returns the first `arity` positions, padding unwritten ones with `""`.
    #[must_use]
    pub fn leading(&self, method: &MethodName, arity: usize) -> Vec<String> {
        (0..arity).map(|index| self.argument(method, index).to_string()).collect()
    }

    /// Returns the highest position at or beyond `arity` holding a non-empty value.
    #[must_use]
    pub fn overflow(&self, method: &MethodName, arity: usize) -> Option<usize> {
        self.method_slots(method)
            .filter(|(slot, raw)| slot.position >= arity && !raw.is_empty())
            .map(|(slot, _)| slot.position)
            .last()
    }

    /// Returns true when no method has been edited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops every pending argument.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Iterates the written slots of one method in position order.
    fn method_slots(&self, method: &MethodName) -> impl Iterator<Item = (&ArgumentSlot, &String)> {
        self.slots.range(ArgumentSlot::first(method)..=ArgumentSlot::last(method))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
