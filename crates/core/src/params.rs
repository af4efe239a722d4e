//! Helpers for reading typed knobs out of a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key, and a default. A missing key or a
//! value of the wrong type yields the default; the helpers never fail.

use serde_json::Value;

/// Reads an `f64` from `params[name]`. Integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads a count from `params[name]`.
///
/// Negative integers clamp to 0 rather than falling back to the default, so
/// a request for "-5 particles" yields an empty simulation.
pub fn param_count(params: &Value, name: &str, default: usize) -> usize {
    match params.get(name) {
        Some(v) => match (v.as_u64(), v.as_i64()) {
            (Some(n), _) => usize::try_from(n).unwrap_or(usize::MAX),
            (None, Some(_)) => 0,
            (None, None) => default,
        },
        None => default,
    }
}

/// Reads a `String` from `params[name]`.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}
