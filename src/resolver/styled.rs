use std::ops::Range;

/// Text with every byte covered by exactly one span, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledText<S> {
    pub text: String,
    pub spans: Vec<StyledSpan<S>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledSpan<S> {
    /// Byte range into [`StyledText::text`].
    pub range: Range<usize>,
    pub style: S,
    /// Set when the span renders a mention of this user.
    pub mention_of: Option<String>,
}

impl<S> StyledText<S> {
    pub fn segments(&self) -> impl Iterator<Item = (&str, &StyledSpan<S>)> {
        self.spans
            .iter()
            .map(move |span| (&self.text[span.range.clone()], span))
    }

    pub fn mention_spans(&self) -> impl Iterator<Item = &StyledSpan<S>> {
        self.spans.iter().filter(|span| span.mention_of.is_some())
    }
}

pub(crate) struct StyledTextBuilder<S> {
    text: String,
    spans: Vec<StyledSpan<S>>,
}

impl<S: Clone + PartialEq> StyledTextBuilder<S> {
    pub(crate) fn new() -> Self {
        Self {
            text: String::new(),
            spans: Vec::new(),
        }
    }

    /// Appends plain text, merging into the previous span when it has the
    /// same style and is not a mention.
    pub(crate) fn push_plain(&mut self, fragment: &str, style: &S) {
        if fragment.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(fragment);
        let end = self.text.len();

        if let Some(last) = self.spans.last_mut() {
            if last.mention_of.is_none() && last.style == *style && last.range.end == start {
                last.range.end = end;
                return;
            }
        }

        self.spans.push(StyledSpan {
            range: start..end,
            style: style.clone(),
            mention_of: None,
        });
    }

    pub(crate) fn push_mention(&mut self, fragment: &str, style: &S, user_id: &str) {
        let start = self.text.len();
        self.text.push_str(fragment);
        self.spans.push(StyledSpan {
            range: start..self.text.len(),
            style: style.clone(),
            mention_of: Some(user_id.to_string()),
        });
    }

    pub(crate) fn finish(self) -> StyledText<S> {
        StyledText {
            text: self.text,
            spans: self.spans,
        }
    }
}
