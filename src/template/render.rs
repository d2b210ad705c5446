//! Display segmentation of a template.
//!
//! Literal runs and token badges, derived from the live string on each call.
//! Concatenating every segment's literal form gives back the template exactly.

use std::borrow::Cow;

use serde::Serialize;

use super::catalog::VariableCatalog;
use super::scanner::{scan, TokenSpan, CLOSE, OPEN};

/// One display unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    /// Editable prose (may include unterminated braces)
    Text { content: String },
    /// A closed placeholder, shown as a non-editable badge
    Token { identifier: String },
}

impl Segment {
    /// The exact template text this segment stands for
    pub fn literal(&self) -> Cow<'_, str> {
        match self {
            Segment::Text { content } => Cow::Borrowed(content),
            Segment::Token { identifier } => Cow::Owned(format!("{}{}{}", OPEN, identifier, CLOSE)),
        }
    }

    /// Length of the literal form in chars
    pub fn char_len(&self) -> usize {
        match self {
            Segment::Text { content } => content.chars().count(),
            Segment::Token { identifier } => identifier.chars().count() + 2,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Segment::Token { .. })
    }
}

/// Split `text` into text runs and token segments, in order.
pub fn render(text: &str) -> Vec<Segment> {
    let spans = scan(text);
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut run = String::new();
    let mut next = spans.iter().peekable();

    for (idx, ch) in text.chars().enumerate() {
        if let Some(span) = next.peek() {
            if idx >= span.start {
                if idx == span.start {
                    if !run.is_empty() {
                        segments.push(Segment::Text {
                            content: std::mem::take(&mut run),
                        });
                    }
                    segments.push(Segment::Token {
                        identifier: span.identifier.clone(),
                    });
                }
                if idx + 1 == span.end {
                    next.next();
                }
                continue;
            }
        }
        run.push(ch);
    }

    if !run.is_empty() {
        segments.push(Segment::Text { content: run });
    }
    segments
}

/// Concatenate literal forms
pub fn to_literal(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.literal()).collect()
}

/// Hover text for a token badge
pub fn describe<'a>(catalog: &'a VariableCatalog, identifier: &str) -> Option<&'a str> {
    catalog
        .description(identifier)
        .filter(|description| !description.is_empty())
}

/// Tokens whose identifier the catalog does not declare
pub fn unknown_tokens(text: &str, catalog: &VariableCatalog) -> Vec<TokenSpan> {
    scan(text)
        .into_iter()
        .filter(|span| !catalog.contains(&span.identifier))
        .collect()
}

/// Locate the segment a cursor at `offset` sits in.
///
/// Returns `(segment index, offset within segment)`. A boundary offset
/// belongs to the segment that starts there; the end of the template maps to
/// the end of the last segment.
pub fn segment_at(segments: &[Segment], offset: usize) -> Option<(usize, usize)> {
    let mut start = 0;
    for (idx, segment) in segments.iter().enumerate() {
        let end = start + segment.char_len();
        if offset < end {
            return (offset >= start).then_some((idx, offset - start));
        }
        start = end;
    }
    match segments.len() {
        0 => None,
        n if offset == start => Some((n - 1, segments[n - 1].char_len())),
        _ => None,
    }
}
