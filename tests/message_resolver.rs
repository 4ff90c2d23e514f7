use std::collections::{HashMap, HashSet};

use chat_message_model::config::Config;
use chat_message_model::message::{MessageKind, MessageModel, MessageViewModel, Metadata};
use chat_message_model::resolver::{
    self, MessageResolver, MessageStatus, NameCache, extract_payload_array, insert_payload_array,
};
use serde_json::{Value, json};

fn object(value: Value) -> Metadata {
    value.as_object().cloned().expect("fixture should be an object")
}

fn inbound_group_message() -> MessageModel {
    serde_json::from_value(json!({
        "identifier": "5-4b1f",
        "text": "Hello @U1 and @U2, see @U3",
        "kind": "Text",
        "contentType": 0,
        "isSent": true,
        "isAllReceived": true,
        "senderId": "U9",
        "displayName": "Nina",
        "channelId": 1204,
        "conversationId": 77,
        "metadata": {
            "AL_MEMBER_MENTION": "[{\"userId\":\"U1\",\"indices\":[6,9]},{\"userId\":\"U2\",\"indices\":[14,17]},{\"userId\":\"U3\",\"indices\":[23,26]}]"
        },
        "source": 1
    }))
    .expect("message fixture should decode")
}

#[test]
fn group_message_status_and_mentions() {
    let message = inbound_group_message();

    assert_eq!(resolver::derive_status(&message), MessageStatus::Delivered);
    assert!(resolver::contains_mentions(&message));

    let parsed = resolver::parse_mentions(
        message.text().unwrap_or_default(),
        message.metadata().expect("metadata present"),
    );
    let expected: HashSet<String> = ["U1", "U2", "U3"].iter().map(|id| id.to_string()).collect();
    assert_eq!(parsed.mentioned_user_ids, expected);
}

#[test]
fn one_to_one_message_never_has_mentions() {
    let mut message = inbound_group_message();
    message.channel_id = None;
    assert!(!resolver::contains_mentions(&message));

    let names = NameCache::new(HashMap::from([("U1".to_string(), "Alice".to_string())]));
    assert!(resolver::render_with_mentions(&message, &"plain", &"bold", &names).is_none());
}

#[test]
fn renders_names_from_cache() {
    let message = inbound_group_message();
    let mut names = NameCache::default();
    names.insert("U1", "Alice");
    names.insert("U3", "Carol");

    let styled = resolver::render_with_mentions(&message, &"plain", &"bold", &names)
        .expect("two mentions are resolvable");
    assert_eq!(styled.text, "Hello @Alice and @U2, see @Carol");

    let mentioned: Vec<(&str, Option<&str>)> = styled
        .mention_spans()
        .map(|span| (&styled.text[span.range.clone()], span.mention_of.as_deref()))
        .collect();
    assert_eq!(
        mentioned,
        vec![("@Alice", Some("U1")), ("@Carol", Some("U3"))]
    );
    assert!(styled.spans.iter().all(|span| !span.range.is_empty()));
    assert_eq!(styled.spans.last().map(|span| span.range.end), Some(styled.text.len()));
}

#[test]
fn empty_name_map_yields_plain_fallback() {
    let message = inbound_group_message();
    let resolver = |_: &HashSet<String>| Some(HashMap::<String, String>::new());
    assert!(resolver::render_with_mentions(&message, &0, &1, &resolver).is_none());
}

#[test]
fn quick_reply_payload_round_trip() {
    let options = vec![
        object(json!({ "title": "Book a demo", "message": "demo" })),
        object(json!({ "title": "Talk to sales", "replyMetadata": { "team": "sales" } })),
    ];
    let mut message = MessageModel::new("qr-1");
    message.kind = MessageKind::QuickReply;
    let mut metadata = Metadata::new();
    insert_payload_array(&mut metadata, &options);
    message.metadata = Some(metadata);

    let encoded = serde_json::to_string(&message).expect("message should encode");
    let decoded: MessageModel = serde_json::from_str(&encoded).expect("message should decode");
    assert!(decoded.kind.is_rich());
    assert_eq!(
        extract_payload_array(decoded.metadata().expect("metadata present")),
        Some(options)
    );
}

#[test]
fn payload_absent_for_missing_key_or_object() {
    assert_eq!(extract_payload_array(&object(json!({ "other": "[]" }))), None);
    assert_eq!(
        extract_payload_array(&object(json!({ "payload": "{\"title\":\"x\"}" }))),
        None
    );
}

#[test]
fn resolver_built_from_config() {
    let config =
        Config::load_from_bytes(b"mention:\n  metadata_key: mentions\n").expect("config loads");
    let resolver = MessageResolver::from_config(&config);

    let mut message = inbound_group_message();
    assert!(!resolver.contains_mentions(&message));

    message.metadata = Some(object(json!({ "mentions": [{ "userId": "U2" }] })));
    assert!(resolver.contains_mentions(&message));
    assert_eq!(resolver.derive_status(&message), MessageStatus::Delivered);
}

#[test]
fn read_flag_overrides_everything() {
    let mut message = MessageModel::outgoing_text("ping");
    message.apply_delivery(false, false, true);
    assert_eq!(resolver::derive_status(&message), MessageStatus::Read);
}
