use serde_json::{Map, Value};
use tracing::debug;

use crate::message::metadata::{self, Metadata, PAYLOAD_KEY};

/// Decodes the JSON-encoded array stored under `metadata["payload"]`.
///
/// Quick replies, buttons and templates describe their options this way.
/// Anything other than a string holding an array of objects yields `None`.
pub fn extract_payload_array(metadata: &Metadata) -> Option<Vec<Map<String, Value>>> {
    let Some(raw) = metadata::string_entry(metadata, PAYLOAD_KEY) else {
        if let Some(value) = metadata.get(PAYLOAD_KEY) {
            debug!(
                found = metadata::value_kind(value),
                "payload metadata entry is not a string"
            );
        }
        return None;
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "payload metadata entry is not valid JSON");
            return None;
        }
    };

    let Value::Array(items) = parsed else {
        debug!(
            found = metadata::value_kind(&parsed),
            "payload metadata entry is not a JSON array"
        );
        return None;
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(object) => Some(object),
            _ => None,
        })
        .collect()
}

/// Encodes `items` into the `payload` entry, replacing any previous value.
pub fn insert_payload_array(metadata: &mut Metadata, items: &[Map<String, Value>]) {
    let encoded = Value::Array(items.iter().cloned().map(Value::Object).collect()).to_string();
    metadata.insert(PAYLOAD_KEY.to_string(), Value::String(encoded));
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{extract_payload_array, insert_payload_array};
    use crate::message::Metadata;

    fn metadata(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn quick_reply_payload_round_trips() {
        let replies = vec![
            metadata(json!({ "title": "Yes", "message": "yes please" })),
            metadata(json!({ "title": "No", "replyMetadata": { "k": 1 } })),
        ];
        let mut meta = Metadata::new();
        insert_payload_array(&mut meta, &replies);

        assert!(meta["payload"].is_string());
        assert_eq!(extract_payload_array(&meta), Some(replies));
    }

    #[test]
    fn missing_or_malformed_payload_is_absent() {
        assert_eq!(extract_payload_array(&Metadata::new()), None);

        let object_payload = metadata(json!({ "payload": "{\"title\":\"Yes\"}" }));
        assert_eq!(extract_payload_array(&object_payload), None);

        let not_a_string = metadata(json!({ "payload": [{ "title": "Yes" }] }));
        assert_eq!(extract_payload_array(&not_a_string), None);

        let broken = metadata(json!({ "payload": "[{\"title\":" }));
        assert_eq!(extract_payload_array(&broken), None);

        let mixed = metadata(json!({ "payload": "[{\"title\":\"Yes\"}, 3]" }));
        assert_eq!(extract_payload_array(&mixed), None);
    }

    #[test]
    fn empty_array_is_present() {
        let meta = metadata(json!({ "payload": "[]" }));
        assert_eq!(extract_payload_array(&meta), Some(Vec::new()));
    }
}
