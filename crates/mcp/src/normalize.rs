// Tool call arguments arrive either JSON-encoded in a string or as an object

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ToolFault;

/// Call arguments as received on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawArguments {
    /// A JSON document inside a string.
    Encoded(String),
    /// Anything else, including `null` for absent arguments.
    Structured(Value),
}

impl Default for RawArguments {
    fn default() -> Self {
        Self::Structured(Value::Null)
    }
}

impl From<Value> for RawArguments {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Encoded(s),
            other => Self::Structured(other),
        }
    }
}

/// Resolve raw arguments into one JSON object.
///
/// Absent or `null` arguments become an empty object. Anything that does not
/// resolve to an object is a client fault.
pub fn normalize(raw: RawArguments) -> Result<Map<String, Value>, ToolFault> {
    match raw {
        RawArguments::Encoded(text) => {
            if text.trim().is_empty() {
                return Ok(Map::new());
            }
            let decoded: Value = serde_json::from_str(&text).map_err(|e| {
                ToolFault::invalid_arguments(format!("Invalid JSON arguments: {}", e))
            })?;
            into_object(decoded)
        }
        RawArguments::Structured(value) => into_object(value),
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, ToolFault> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ToolFault::invalid_arguments(format!(
            "Tool arguments must be an object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_object_passes_through() {
        let args = json!({"to": "a@example.com", "nested": {"k": [1, 2]}});
        let map = normalize(RawArguments::Structured(args.clone())).unwrap();
        assert_eq!(Value::Object(map), args);
    }

    #[test]
    fn test_encoded_object_is_decoded() {
        let map = normalize(RawArguments::Encoded(r#"{"subject":"hi"}"#.to_string())).unwrap();
        assert_eq!(map["subject"], "hi");
    }

    #[test]
    fn test_absent_arguments_become_empty_object() {
        assert!(normalize(RawArguments::default()).unwrap().is_empty());
        assert!(normalize(RawArguments::Encoded(String::new())).unwrap().is_empty());
        assert!(normalize(RawArguments::Encoded("null".to_string())).unwrap().is_empty());
    }

    #[test]
    fn test_bad_json_is_invalid_arguments() {
        let err = normalize(RawArguments::Encoded("{bad json".to_string())).unwrap_err();
        assert!(matches!(err, ToolFault::InvalidArguments(_)));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = normalize(RawArguments::Encoded("[1,2]".to_string())).unwrap_err();
        assert_eq!(
            err,
            ToolFault::InvalidArguments("Tool arguments must be an object, got an array".to_string())
        );

        let err = normalize(RawArguments::Structured(json!(42))).unwrap_err();
        assert!(matches!(err, ToolFault::InvalidArguments(_)));
    }

    #[test]
    fn test_from_value_picks_variant() {
        assert!(matches!(RawArguments::from(json!("{}")), RawArguments::Encoded(_)));
        assert!(matches!(RawArguments::from(json!({})), RawArguments::Structured(_)));
    }
}
