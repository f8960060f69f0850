//! Body serialization for wrapped-endpoint calls.
//!
//! Reproduces the wire convention of the backend framework exactly: a single
//! body parameter is sent as the bare body, never nested under its parameter
//! name, while two or more body parameters are nested. This asymmetry is
//! observable on the wire and must not be "simplified".

use indexmap::IndexMap;
use serde_json::Value;

use super::args::ArgValue;

/// Serializes the body-classified arguments of one call.
///
/// Returns `None` when there is no body argument, the single unwrapped value
/// when there is exactly one, and a name → value object otherwise. Model
/// values get their explicit-absence (`null`) top-level fields stripped;
/// plain values pass through unchanged.
pub(super) fn serialize_body(body_values: IndexMap<String, ArgValue>) -> Option<Value> {
    let mut serialized: Vec<(String, Value)> = Vec::with_capacity(body_values.len());
    for (name, value) in body_values {
        let value = match value {
            ArgValue::Model(value) => strip_absent_fields(value),
            ArgValue::Scalar(value) => value,
        };
        serialized.push((name, value));
    }

    match serialized.len() {
        0 => None,
        1 => serialized.pop().map(|(_, value)| value),
        _ => Some(Value::Object(serialized.into_iter().collect())),
    }
}

// Top-level nulls are "explicitly set to absent"; unset fields never reach
// the JSON value at all when the model uses skip_serializing_if.
fn strip_absent_fields(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .filter(|(_, field)| !field.is_null())
                .collect(),
        ),
        other => other,
    }
}
