use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What the message renders as. Wire names are the historical raw values,
/// which is why voice messages serialize as `"Audio"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MessageKind {
    #[default]
    Text,
    Photo,
    #[serde(rename = "Audio")]
    Voice,
    Location,
    Information,
    Video,
    #[serde(rename = "HTML")]
    Html,
    QuickReply,
    Button,
    ListTemplate,
    CardTemplate,
    Email,
    Document,
    #[serde(rename = "FAQTemplate")]
    FaqTemplate,
    ImageMessage,
    AllButtons,
    Form,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "Text",
            MessageKind::Photo => "Photo",
            MessageKind::Voice => "Audio",
            MessageKind::Location => "Location",
            MessageKind::Information => "Information",
            MessageKind::Video => "Video",
            MessageKind::Html => "HTML",
            MessageKind::QuickReply => "QuickReply",
            MessageKind::Button => "Button",
            MessageKind::ListTemplate => "ListTemplate",
            MessageKind::CardTemplate => "CardTemplate",
            MessageKind::Email => "Email",
            MessageKind::Document => "Document",
            MessageKind::FaqTemplate => "FAQTemplate",
            MessageKind::ImageMessage => "ImageMessage",
            MessageKind::AllButtons => "AllButtons",
            MessageKind::Form => "Form",
        }
    }

    /// Kinds whose content is carried by a downloadable attachment.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            MessageKind::Photo | MessageKind::Voice | MessageKind::Video | MessageKind::Document
        )
    }

    /// Kinds whose interactive content lives in the `payload` metadata entry.
    pub fn is_rich(&self) -> bool {
        matches!(
            self,
            MessageKind::QuickReply
                | MessageKind::Button
                | MessageKind::ListTemplate
                | MessageKind::CardTemplate
                | MessageKind::FaqTemplate
                | MessageKind::ImageMessage
                | MessageKind::AllButtons
                | MessageKind::Form
        )
    }
}

/// Payload kind carried as an integer code on the wire. Unknown codes are
/// kept so a record can be re-serialized unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    #[default]
    Text,
    Attachment,
    Location,
    Html,
    Price,
    TextUrl,
    Contact,
    Audio,
    Video,
    Custom,
    Hidden,
    Other(i16),
}

impl ContentType {
    pub fn code(&self) -> i16 {
        match self {
            ContentType::Text => 0,
            ContentType::Attachment => 1,
            ContentType::Location => 2,
            ContentType::Html => 3,
            ContentType::Price => 4,
            ContentType::TextUrl => 5,
            ContentType::Contact => 7,
            ContentType::Audio => 8,
            ContentType::Video => 9,
            ContentType::Custom => 10,
            ContentType::Hidden => 11,
            ContentType::Other(code) => *code,
        }
    }
}

impl From<i16> for ContentType {
    fn from(code: i16) -> Self {
        match code {
            0 => ContentType::Text,
            1 => ContentType::Attachment,
            2 => ContentType::Location,
            3 => ContentType::Html,
            4 => ContentType::Price,
            5 => ContentType::TextUrl,
            7 => ContentType::Contact,
            8 => ContentType::Audio,
            9 => ContentType::Video,
            10 => ContentType::Custom,
            11 => ContentType::Hidden,
            other => ContentType::Other(other),
        }
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i16(self.code())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i16::deserialize(deserializer).map(ContentType::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ContentType, MessageKind};

    #[test]
    fn message_kind_uses_historical_wire_names() {
        assert_eq!(serde_json::to_value(MessageKind::Voice).unwrap(), json!("Audio"));
        assert_eq!(serde_json::to_value(MessageKind::Html).unwrap(), json!("HTML"));
        let kind: MessageKind = serde_json::from_value(json!("FAQTemplate")).unwrap();
        assert_eq!(kind, MessageKind::FaqTemplate);
        assert_eq!(kind.as_str(), "FAQTemplate");
    }

    #[test]
    fn unknown_content_type_code_is_preserved() {
        let content: ContentType = serde_json::from_value(json!(103)).unwrap();
        assert_eq!(content, ContentType::Other(103));
        assert_eq!(serde_json::to_value(content).unwrap(), json!(103));
        assert_eq!(ContentType::from(3), ContentType::Html);
    }

    #[test]
    fn rich_and_media_kinds_are_disjoint() {
        assert!(MessageKind::QuickReply.is_rich());
        assert!(!MessageKind::QuickReply.is_media());
        assert!(MessageKind::Voice.is_media());
        assert!(!MessageKind::Text.is_rich());
    }
}
