pub mod mention;
pub mod payload;
pub mod status;
pub mod styled;

use serde_json::{Map, Value};
use tracing::trace;

pub use mention::{
    DisplayNameResolver, Mention, MentionDecoder, MentionEntry, MentionOptions, NameCache,
    ParsedMentions,
};
pub use payload::{extract_payload_array, insert_payload_array};
pub use status::{MessageStatus, derive_status, status_from_flags};
pub use styled::{StyledSpan, StyledText};

use crate::config::Config;
use crate::message::{Metadata, MessageViewModel};

/// Derives presentation data from a message. Holds only the mention
/// encoding settings, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MessageResolver {
    mention: MentionOptions,
}

impl MessageResolver {
    pub fn new(mention: MentionOptions) -> Self {
        Self { mention }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mention_options())
    }

    pub fn mention_options(&self) -> &MentionOptions {
        &self.mention
    }

    pub fn derive_status<M: MessageViewModel + ?Sized>(&self, message: &M) -> MessageStatus {
        let status = derive_status(message);
        trace!(id = message.identifier(), status = status.as_str(), "derived status");
        status
    }

    /// Mentions only count in group messages that carry both text and
    /// non-empty metadata.
    pub fn contains_mentions<M: MessageViewModel + ?Sized>(&self, message: &M) -> bool {
        self.decoder_for(message)
            .map(|decoder| decoder.contains_mentions())
            .unwrap_or(false)
    }

    pub fn parse_mentions(&self, text: &str, metadata: &Metadata) -> ParsedMentions {
        MentionDecoder::with_options(text, metadata, &self.mention).parsed()
    }

    pub fn render_with_mentions<M, S, R>(
        &self,
        message: &M,
        default_style: &S,
        mention_style: &S,
        resolver: &R,
    ) -> Option<StyledText<S>>
    where
        M: MessageViewModel + ?Sized,
        S: Clone + PartialEq,
        R: DisplayNameResolver + ?Sized,
    {
        let decoder = self.decoder_for(message)?;
        if !decoder.contains_mentions() {
            return None;
        }

        let names = resolver
            .display_names(&decoder.mentioned_user_ids())
            .filter(|names| !names.is_empty())?;
        decoder.message_with_mentions(&names, mention_style, default_style)
    }

    pub fn extract_payload_array(&self, metadata: &Metadata) -> Option<Vec<Map<String, Value>>> {
        extract_payload_array(metadata)
    }

    fn decoder_for<'m, M: MessageViewModel + ?Sized>(
        &self,
        message: &'m M,
    ) -> Option<MentionDecoder<'m>> {
        message.channel_id()?;
        let text = message.text()?;
        let metadata = message.metadata().filter(|metadata| !metadata.is_empty())?;
        Some(MentionDecoder::with_options(text, metadata, &self.mention))
    }
}

pub fn contains_mentions<M: MessageViewModel + ?Sized>(message: &M) -> bool {
    MessageResolver::default().contains_mentions(message)
}

pub fn parse_mentions(text: &str, metadata: &Metadata) -> ParsedMentions {
    MessageResolver::default().parse_mentions(text, metadata)
}

pub fn render_with_mentions<M, S, R>(
    message: &M,
    default_style: &S,
    mention_style: &S,
    resolver: &R,
) -> Option<StyledText<S>>
where
    M: MessageViewModel + ?Sized,
    S: Clone + PartialEq,
    R: DisplayNameResolver + ?Sized,
{
    MessageResolver::default().render_with_mentions(
        message,
        default_style,
        mention_style,
        resolver,
    )
}

/// Payload of a message's metadata, if it has any.
pub fn message_payload<M: MessageViewModel + ?Sized>(
    message: &M,
) -> Option<Vec<Map<String, Value>>> {
    extract_payload_array(message.metadata()?)
}
