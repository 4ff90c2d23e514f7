use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::message::kind::{ContentType, MessageKind, PlaybackState};
use crate::message::metadata::Metadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geocode {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Server-side description of an uploaded attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetaInfo {
    pub blob_key: String,
    pub name: String,
    pub content_type: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

/// A single chat message as seen by the conversation UI.
///
/// Identity is the `identifier` alone: two records describing the same
/// message at different points of its delivery or playback compare equal.
/// Delivery flags are private so they can only move forward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageModel {
    pub identifier: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_outgoing: bool,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    is_sent: bool,
    #[serde(default)]
    is_all_received: bool,
    #[serde(default)]
    is_all_read: bool,

    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<Url>,
    #[serde(default)]
    pub remote_url: Option<Url>,
    #[serde(default)]
    pub file_size_bytes: i64,
    #[serde(default)]
    pub aspect_ratio: f64,
    #[serde(default)]
    pub file_meta: Option<FileMetaInfo>,

    #[serde(default, with = "base64_bytes")]
    pub voice_data: Option<Vec<u8>>,
    #[serde(default)]
    pub voice_total_duration: f64,
    #[serde(default)]
    pub voice_current_duration: f64,
    #[serde(default)]
    pub playback_state: PlaybackState,

    #[serde(default)]
    pub location: Option<Geocode>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<Url>,
    #[serde(default)]
    pub channel_id: Option<i64>,
    #[serde(default)]
    pub conversation_id: Option<i64>,
    #[serde(default)]
    pub is_reply_message: bool,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub source: i16,
}

impl MessageModel {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content_type: ContentType::Text,
            text: None,
            is_outgoing: false,
            kind: MessageKind::Text,
            timestamp: Utc::now(),
            time: None,
            is_sent: false,
            is_all_received: false,
            is_all_read: false,
            file_path: None,
            thumbnail_url: None,
            remote_url: None,
            file_size_bytes: 0,
            aspect_ratio: 0.0,
            file_meta: None,
            voice_data: None,
            voice_total_duration: 0.0,
            voice_current_duration: 0.0,
            playback_state: PlaybackState::Stopped,
            location: None,
            sender_id: None,
            receiver_id: None,
            display_name: None,
            avatar_url: None,
            channel_id: None,
            conversation_id: None,
            is_reply_message: false,
            metadata: None,
            source: 0,
        }
    }

    pub fn outgoing_text(text: impl Into<String>) -> Self {
        let mut message = Self::new(uuid::Uuid::new_v4().to_string());
        message.text = Some(text.into());
        message.is_outgoing = true;
        message
    }

    pub fn is_sent(&self) -> bool {
        self.is_sent
    }

    pub fn is_all_received(&self) -> bool {
        self.is_all_received
    }

    pub fn is_all_read(&self) -> bool {
        self.is_all_read
    }

    pub fn mark_sent(&mut self) {
        self.is_sent = true;
    }

    pub fn mark_all_received(&mut self) {
        self.is_all_received = true;
    }

    pub fn mark_all_read(&mut self) {
        self.is_all_read = true;
    }

    /// Applies a delivery report. Flags only ever go from `false` to `true`.
    pub fn apply_delivery(&mut self, sent: bool, all_received: bool, all_read: bool) {
        self.is_sent |= sent;
        self.is_all_received |= all_received;
        self.is_all_read |= all_read;
    }

    pub fn is_group(&self) -> bool {
        self.channel_id.is_some()
    }

    pub fn is_message_empty(&self) -> bool {
        self.text
            .as_deref()
            .map(|text| text.trim().is_empty())
            .unwrap_or(true)
    }

    pub fn voice_progress(&self) -> f64 {
        if self.voice_total_duration <= 0.0 {
            return 0.0;
        }
        (self.voice_current_duration / self.voice_total_duration).clamp(0.0, 1.0)
    }

    pub fn formatted_time(&self, format: &str) -> String {
        self.time
            .clone()
            .unwrap_or_else(|| self.timestamp.format(format).to_string())
    }
}

impl PartialEq for MessageModel {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for MessageModel {}

impl Hash for MessageModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?;
        encoded
            .map(|value| STANDARD.decode(value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
