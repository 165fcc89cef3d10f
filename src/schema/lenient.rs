//! Deserializers that never fail on content shape.
//!
//! Content may be hand-edited, so a field holding the wrong JSON type
//! degrades to an empty value instead of rejecting the whole document.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render a scalar as text; containers and null become empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(value_text(&value)).filter(|s| !s.is_empty()))
}

/// A sequence of strings; anything else is empty.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().map(value_text).collect(),
        _ => Vec::new(),
    })
}

/// A sequence of records; malformed records become defaults.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| T::deserialize(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// A key to text lookup table.
pub fn table<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), value_text(v))).collect(),
        _ => BTreeMap::new(),
    })
}

/// A key to record table; malformed records become defaults.
pub fn record_table<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, T::deserialize(v).unwrap_or_default()))
            .collect(),
        _ => BTreeMap::new(),
    })
}

/// Any nested record; a malformed one becomes its default.
pub fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// A number, accepting numeric strings.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("a")), "a");
        assert_eq!(value_text(&json!(5)), "5");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(["a"])), "");
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "text")]
        title: String,
        #[serde(deserialize_with = "strings")]
        bullets: Vec<String>,
        #[serde(deserialize_with = "table")]
        icons: BTreeMap<String, String>,
        #[serde(deserialize_with = "opt_number")]
        minutes: Option<f64>,
    }

    #[test]
    fn test_wrong_types_degrade() {
        let sample: Sample = serde_json::from_value(json!({
            "title": {"nested": true},
            "bullets": "not a list",
            "icons": [1, 2],
            "minutes": "30"
        }))
        .unwrap();

        assert_eq!(sample.title, "");
        assert!(sample.bullets.is_empty());
        assert!(sample.icons.is_empty());
        assert_eq!(sample.minutes, Some(30.0));
    }
}
