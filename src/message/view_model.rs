use chrono::{DateTime, Utc};
use url::Url;

use crate::message::kind::{ContentType, MessageKind, PlaybackState};
use crate::message::metadata::Metadata;
use crate::message::model::{FileMetaInfo, Geocode, MessageModel};

/// Read access to a message's attributes, plus the few fields the owning
/// layer updates in place as a download or voice playback progresses.
///
/// The resolver only depends on this trait, so any message representation
/// can be classified without converting it into a [`MessageModel`].
pub trait MessageViewModel {
    fn identifier(&self) -> &str;
    fn content_type(&self) -> ContentType;
    fn text(&self) -> Option<&str>;
    fn is_outgoing(&self) -> bool;
    fn kind(&self) -> MessageKind;
    fn timestamp(&self) -> DateTime<Utc>;
    fn time(&self) -> Option<&str>;

    fn is_sent(&self) -> bool;
    fn is_all_received(&self) -> bool;
    fn is_all_read(&self) -> bool;

    fn thumbnail_url(&self) -> Option<&Url>;
    fn remote_url(&self) -> Option<&Url>;
    fn file_size_bytes(&self) -> i64;
    fn aspect_ratio(&self) -> f64;
    fn file_meta(&self) -> Option<&FileMetaInfo>;
    fn location(&self) -> Option<&Geocode>;

    fn sender_id(&self) -> Option<&str>;
    fn receiver_id(&self) -> Option<&str>;
    fn display_name(&self) -> Option<&str>;
    fn avatar_url(&self) -> Option<&Url>;
    fn channel_id(&self) -> Option<i64>;
    fn conversation_id(&self) -> Option<i64>;
    fn is_reply_message(&self) -> bool;
    fn metadata(&self) -> Option<&Metadata>;
    fn source(&self) -> i16;

    fn file_path(&self) -> Option<&str>;
    fn set_file_path(&mut self, path: Option<String>);

    fn voice_data(&self) -> Option<&[u8]>;
    fn set_voice_data(&mut self, data: Option<Vec<u8>>);
    fn voice_total_duration(&self) -> f64;
    fn set_voice_total_duration(&mut self, seconds: f64);
    fn voice_current_duration(&self) -> f64;
    fn set_voice_current_duration(&mut self, seconds: f64);
    fn playback_state(&self) -> PlaybackState;
    fn set_playback_state(&mut self, state: PlaybackState);
}

impl MessageViewModel for MessageModel {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn is_outgoing(&self) -> bool {
        self.is_outgoing
    }

    fn kind(&self) -> MessageKind {
        self.kind
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    fn is_sent(&self) -> bool {
        MessageModel::is_sent(self)
    }

    fn is_all_received(&self) -> bool {
        MessageModel::is_all_received(self)
    }

    fn is_all_read(&self) -> bool {
        MessageModel::is_all_read(self)
    }

    fn thumbnail_url(&self) -> Option<&Url> {
        self.thumbnail_url.as_ref()
    }

    fn remote_url(&self) -> Option<&Url> {
        self.remote_url.as_ref()
    }

    fn file_size_bytes(&self) -> i64 {
        self.file_size_bytes
    }

    fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    fn file_meta(&self) -> Option<&FileMetaInfo> {
        self.file_meta.as_ref()
    }

    fn location(&self) -> Option<&Geocode> {
        self.location.as_ref()
    }

    fn sender_id(&self) -> Option<&str> {
        self.sender_id.as_deref()
    }

    fn receiver_id(&self) -> Option<&str> {
        self.receiver_id.as_deref()
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn avatar_url(&self) -> Option<&Url> {
        self.avatar_url.as_ref()
    }

    fn channel_id(&self) -> Option<i64> {
        self.channel_id
    }

    fn conversation_id(&self) -> Option<i64> {
        self.conversation_id
    }

    fn is_reply_message(&self) -> bool {
        self.is_reply_message
    }

    fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    fn source(&self) -> i16 {
        self.source
    }

    fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    fn set_file_path(&mut self, path: Option<String>) {
        self.file_path = path;
    }

    fn voice_data(&self) -> Option<&[u8]> {
        self.voice_data.as_deref()
    }

    fn set_voice_data(&mut self, data: Option<Vec<u8>>) {
        self.voice_data = data;
    }

    fn voice_total_duration(&self) -> f64 {
        self.voice_total_duration
    }

    fn set_voice_total_duration(&mut self, seconds: f64) {
        self.voice_total_duration = seconds;
    }

    fn voice_current_duration(&self) -> f64 {
        self.voice_current_duration
    }

    fn set_voice_current_duration(&mut self, seconds: f64) {
        self.voice_current_duration = seconds;
    }

    fn playback_state(&self) -> PlaybackState {
        self.playback_state
    }

    fn set_playback_state(&mut self, state: PlaybackState) {
        self.playback_state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::MessageViewModel;
    use crate::message::kind::PlaybackState;
    use crate::message::model::MessageModel;

    fn finish_download<M: MessageViewModel>(message: &mut M, path: &str) {
        message.set_file_path(Some(path.to_string()));
    }

    #[test]
    fn owner_updates_fields_through_capability() {
        let mut message = MessageModel::new("photo-1");
        finish_download(&mut message, "/tmp/photo-1.jpg");
        message.set_playback_state(PlaybackState::Playing);
        message.set_voice_current_duration(1.5);

        let view: &dyn MessageViewModel = &message;
        assert_eq!(view.file_path(), Some("/tmp/photo-1.jpg"));
        assert_eq!(view.playback_state(), PlaybackState::Playing);
        assert_eq!(view.voice_current_duration(), 1.5);
    }
}
