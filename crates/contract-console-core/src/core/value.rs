// crates/contract-console-core/src/core/value.rs
// ============================================================================
// Module: Result Values
// Description: Raw result model returned by channels and its normalization.
// Purpose: Convert heterogeneous results into a lossless displayable form.
// Dependencies: num-bigint, serde, serde_json, hex
// ============================================================================

//! ## Overview
//! Channels answer reads with a [`ResultValue`]. Remote numeric results
//! routinely exceed what an `f64` or a machine integer can carry, so every
//! display or serialization path goes through [`normalize`] first:
//! - wide integers ([`ResultValue::BigInt`]) become exact decimal strings,
//! - ordinary numbers outside `±(2^53 - 1)` become exact decimal strings,
//! - sequences are normalized element-wise,
//! - everything else is returned unchanged.
//!
//! Normalization is total, pure, and idempotent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use num_bigint::BigInt;
use serde::Serialize;
use serde::Serializer;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Largest integer magnitude an IEEE-754 double represents exactly.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

// ============================================================================
// SECTION: Result Value
// ============================================================================

/// Raw result produced by a read call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Ordinary JSON number.
    Number(Number),
    /// Arbitrary-precision integer (the remote's wide integer type).
    BigInt(BigInt),
    /// Text value.
    Text(String),
    /// Raw bytes, rendered as `0x`-prefixed lowercase hex.
    Bytes(Vec<u8>),
    /// Heterogeneous sequence.
    List(Vec<Self>),
    /// Opaque structured value.
    Json(Value),
}

impl ResultValue {
    /// Converts the value into JSON without normalizing it first.
    ///
    /// Wide integers are still rendered as decimal strings so the conversion
    /// never loses precision.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(value) => Value::Number(value.clone()),
            Self::BigInt(value) => Value::String(value.to_string()),
            Self::Text(value) => Value::String(value.clone()),
            Self::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Json(value) => value.clone(),
        }
    }

    /// Returns the compact JSON text of the normalized value.
    #[must_use]
    pub fn display_json(&self) -> String {
        normalize(self).to_json().to_string()
    }
}

impl Serialize for ResultValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<bool> for ResultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ResultValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<u64> for ResultValue {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<BigInt> for ResultValue {
    fn from(value: BigInt) -> Self {
        Self::BigInt(value)
    }
}

impl From<&str> for ResultValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ResultValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for ResultValue {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl From<Value> for ResultValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes a raw result into its canonical displayable form.
#[must_use]
pub fn normalize(value: &ResultValue) -> ResultValue {
    match value {
        ResultValue::List(items) => ResultValue::List(items.iter().map(normalize).collect()),
        ResultValue::BigInt(value) => ResultValue::Text(value.to_string()),
        ResultValue::Number(number) if !is_safe_number(number) => {
            ResultValue::Text(number.to_string())
        }
        ResultValue::Json(json) => ResultValue::Json(normalize_json(json)),
        other => other.clone(),
    }
}

/// Applies the numeric precision rule to structured JSON.
fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Number(number) if !is_safe_number(number) => Value::String(number.to_string()),
        Value::Array(items) => Value::Array(items.iter().map(normalize_json).collect()),
        Value::Object(map) => Value::Object(
            map.iter().map(|(key, item)| (key.clone(), normalize_json(item))).collect(),
        ),
        other => other.clone(),
    }
}

/// Returns true when the number survives a round trip through an `f64`.
///
/// Floating-point numbers are already doubles and always count as safe.
fn is_safe_number(number: &Number) -> bool {
    if let Some(value) = number.as_u64() {
        return value <= MAX_SAFE_INTEGER;
    }
    if let Some(value) = number.as_i64() {
        return value.unsigned_abs() <= MAX_SAFE_INTEGER;
    }
    true
}
