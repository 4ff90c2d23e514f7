use serde_json::{Map, Value};

/// Untyped per-message metadata. Values are closed JSON variants so every
/// consumer has to handle each shape explicitly.
pub type Metadata = Map<String, Value>;

pub const PAYLOAD_KEY: &str = "payload";
pub const MENTION_KEY: &str = "AL_MEMBER_MENTION";

pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns `metadata[key]` as a string, or `None` for any other shape.
pub fn string_entry<'a>(metadata: &'a Metadata, key: &str) -> Option<&'a str> {
    metadata.get(key).and_then(Value::as_str)
}
