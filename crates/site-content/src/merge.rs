//! Deep merge of an override document onto a base document
//!
//! - Objects: deep-merge by key (recursive)
//! - Arrays: REPLACE (the override array wins entirely)
//! - Scalars and mismatched types: override wins
//! - Falsy overlay (`null`, `""`, `0`, `false`): absent, the base value is kept

use serde_json::Value;

/// Merge `overlay` onto `base` without touching either input.
///
/// A missing or falsy overlay yields a copy of `base`.
pub fn merge(base: &Value, overlay: Option<&Value>) -> Value {
    match overlay {
        Some(overlay) => deep_merge(base, overlay),
        None => base.clone(),
    }
}

/// Whether `value` counts as "not set" in an overlay.
///
/// Matches JavaScript truthiness for JSON values: `null`, `""`, `0` and
/// `false`. Empty arrays and objects are set.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Deep merge two JSON values by reference.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (_, overlay) if is_falsy(overlay) => base.clone(),

        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut out = base_map.clone();
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.get(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None if is_falsy(overlay_value) => continue,
                    None => overlay_value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Object(out)
        }

        // Arrays: REPLACE (no element-wise merge)
        (Value::Array(_), Value::Array(_)) => overlay.clone(),

        _ => overlay.clone(),
    }
}

/// Deep merge two owned JSON values, reusing the base allocation.
pub fn merge_owned(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (base, overlay) if is_falsy(&overlay) => base,

        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => merge_owned(base_value, overlay_value),
                    None if is_falsy(&overlay_value) => continue,
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        (_, overlay) => overlay,
    }
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, merge_owned)
}
