//! Non-finite value scrubbing for strict JSON output.
//!
//! Two layers: [`finite`] is the producer-side scalar rule applied where
//! statistics are computed, and [`sanitize`] is the final recursive pass over
//! the assembled report. JSON objects keep insertion order through the walk.

use serde_json::Value;

/// Scalar rule: keep finite floats, drop NaN and ±Inf to the missing marker.
#[inline]
pub fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Recursively scrub a JSON tree of non-finite numbers.
///
/// Sequences keep their order and length, mappings keep their keys and
/// insertion order, all other scalars pass through unchanged. Idempotent:
/// applying it twice yields the same tree.
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if !f.is_finite() => Value::Null,
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, sanitize(v))).collect()),
        other => other,
    }
}
