use std::collections::{HashMap, HashSet};
use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{MentionDecodeError, MentionResult};
use crate::message::metadata::{self, MENTION_KEY, Metadata};
use crate::resolver::styled::{StyledText, StyledTextBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionOptions {
    /// Metadata key holding the mention list.
    pub metadata_key: String,
    /// Character that introduces a mention in the text.
    pub prefix: char,
}

impl Default for MentionOptions {
    fn default() -> Self {
        Self {
            metadata_key: MENTION_KEY.to_string(),
            prefix: '@',
        }
    }
}

/// One entry of the mention list as it travels in metadata.
///
/// `indices` are `[start, end)` offsets of `@userId` counted in Unicode
/// scalar values (Rust `char`s), not UTF-16 code units. Senders that count
/// UTF-16 units disagree after any astral character such as an emoji, so a
/// declared range is only a hint: it is used when it covers `@userId`
/// exactly, otherwise the mention is searched for in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionEntry {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub user_id: String,
    /// Byte range of the prefixed user id in the message text.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMentions {
    pub mentioned_user_ids: HashSet<String>,
    /// Located mentions ordered by position, never overlapping.
    pub mentions: Vec<Mention>,
}

impl ParsedMentions {
    pub fn has_mentions(&self) -> bool {
        !self.mentioned_user_ids.is_empty()
    }
}

/// Source of display names for mentioned users. Names must already be at
/// hand (a local contact cache, for instance); an id missing from the
/// returned map is rendered unstyled.
pub trait DisplayNameResolver {
    fn display_names(&self, user_ids: &HashSet<String>) -> Option<HashMap<String, String>>;
}

impl<F> DisplayNameResolver for F
where
    F: Fn(&HashSet<String>) -> Option<HashMap<String, String>>,
{
    fn display_names(&self, user_ids: &HashSet<String>) -> Option<HashMap<String, String>> {
        self(user_ids)
    }
}

/// A fixed id → name table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct NameCache {
    names: HashMap<String, String>,
}

impl NameCache {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    pub fn insert(&mut self, user_id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(user_id.into(), name.into());
    }
}

impl DisplayNameResolver for NameCache {
    fn display_names(&self, user_ids: &HashSet<String>) -> Option<HashMap<String, String>> {
        let found: HashMap<String, String> = user_ids
            .iter()
            .filter_map(|id| self.names.get(id).map(|name| (id.clone(), name.clone())))
            .collect();
        if found.is_empty() { None } else { Some(found) }
    }
}

pub struct MentionDecoder<'a> {
    text: &'a str,
    prefix: char,
    mentions: Vec<Mention>,
}

impl<'a> MentionDecoder<'a> {
    pub fn new(text: &'a str, metadata: &Metadata) -> Self {
        Self::with_options(text, metadata, &MentionOptions::default())
    }

    /// Never fails: an absent or malformed mention list decodes to no
    /// mentions, since a message must stay renderable as plain text.
    pub fn with_options(text: &'a str, metadata: &Metadata, options: &MentionOptions) -> Self {
        let mentions = match decode_entries(metadata, &options.metadata_key) {
            Ok(entries) => locate_mentions(text, &entries, options.prefix),
            Err(MentionDecodeError::MissingKey(_)) => Vec::new(),
            Err(err) => {
                debug!(error = %err, "ignoring undecodable mention metadata");
                Vec::new()
            }
        };

        Self {
            text,
            prefix: options.prefix,
            mentions,
        }
    }

    pub fn contains_mentions(&self) -> bool {
        !self.mentions.is_empty()
    }

    pub fn mentioned_user_ids(&self) -> HashSet<String> {
        self.mentions
            .iter()
            .map(|mention| mention.user_id.clone())
            .collect()
    }

    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    pub fn parsed(&self) -> ParsedMentions {
        ParsedMentions {
            mentioned_user_ids: self.mentioned_user_ids(),
            mentions: self.mentions.clone(),
        }
    }

    /// Rewrites each `@userId` with a known name to `@Name` in
    /// `mention_style`. Returns `None` when no mention could be named.
    pub fn message_with_mentions<S: Clone + PartialEq>(
        &self,
        display_names: &HashMap<String, String>,
        mention_style: &S,
        default_style: &S,
    ) -> Option<StyledText<S>> {
        let mut builder = StyledTextBuilder::new();
        let mut cursor = 0;
        let mut named = 0;

        for mention in &self.mentions {
            builder.push_plain(&self.text[cursor..mention.range.start], default_style);
            let original = &self.text[mention.range.clone()];

            match display_names
                .get(&mention.user_id)
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
            {
                Some(name) => {
                    let rendered = format!("{}{}", self.prefix, name);
                    builder.push_mention(&rendered, mention_style, &mention.user_id);
                    named += 1;
                }
                None => builder.push_plain(original, default_style),
            }
            cursor = mention.range.end;
        }
        builder.push_plain(&self.text[cursor..], default_style);

        if named == 0 {
            return None;
        }
        Some(builder.finish())
    }
}

fn decode_entries(metadata: &Metadata, key: &str) -> MentionResult<Vec<MentionEntry>> {
    let value = metadata
        .get(key)
        .ok_or_else(|| MentionDecodeError::MissingKey(key.to_string()))?;

    match value {
        Value::String(raw) => Ok(serde_json::from_str(raw)?),
        Value::Array(_) => Ok(serde_json::from_value(value.clone())?),
        other => Err(MentionDecodeError::UnexpectedShape {
            key: key.to_string(),
            found: metadata::value_kind(other),
        }),
    }
}

fn locate_mentions(text: &str, entries: &[MentionEntry], prefix: char) -> Vec<Mention> {
    let char_starts: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let mut mentions: Vec<Mention> = Vec::new();

    for entry in entries {
        let user_id = entry.user_id.trim();
        if user_id.is_empty() {
            continue;
        }
        let needle = format!("{prefix}{user_id}");

        let declared = entry
            .indices
            .as_deref()
            .and_then(|indices| declared_range(&char_starts, indices))
            .filter(|range| text.get(range.clone()) == Some(needle.as_str()))
            .filter(|range| starts_at_boundary(text, range.start))
            .filter(|range| !overlaps(&mentions, range));

        let located = declared.or_else(|| {
            let pattern = mention_pattern(prefix, user_id)?;
            pattern
                .captures_iter(text)
                .filter_map(|captures| captures.get(1))
                .map(|found| found.range())
                .find(|range| !overlaps(&mentions, range))
        });

        match located {
            Some(range) => mentions.push(Mention {
                user_id: user_id.to_string(),
                range,
            }),
            None => debug!(user_id, "mentioned user not found in message text"),
        }
    }

    mentions.sort_by_key(|mention| mention.range.start);
    mentions
}

fn declared_range(char_starts: &[usize], indices: &[usize]) -> Option<Range<usize>> {
    let [start, end] = indices else {
        return None;
    };
    if start >= end {
        return None;
    }
    Some(*char_starts.get(*start)?..*char_starts.get(*end)?)
}

fn overlaps(mentions: &[Mention], range: &Range<usize>) -> bool {
    mentions
        .iter()
        .any(|mention| mention.range.start < range.end && range.start < mention.range.end)
}

/// Matches `@userId` that is neither glued to a preceding word (as in
/// `bob@U1`) nor followed by more word characters (as in `@U10`). The
/// mention itself is capture group 1.
fn mention_pattern(prefix: char, user_id: &str) -> Option<Regex> {
    let ends_in_word = user_id
        .chars()
        .last()
        .map(|last| last.is_alphanumeric() || last == '_')
        .unwrap_or(false);
    let trailing = if ends_in_word { r"\b" } else { "" };
    let source = format!(
        r"(?:^|[^\w])({}{}){}",
        regex::escape(&prefix.to_string()),
        regex::escape(user_id),
        trailing
    );

    match Regex::new(&source) {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            debug!(user_id, error = %err, "cannot build mention pattern");
            None
        }
    }
}

fn starts_at_boundary(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .map(|previous| !(previous.is_alphanumeric() || previous == '_'))
        .unwrap_or(true)
}
