//! Placeholder scanning.
//!
//! A token is `{`, one or more chars other than `{` and `}`, then `}`.
//! Spans are char ranges and are recomputed on every call.

use std::ops::Range;

use serde::Serialize;

/// Opens a placeholder
pub const OPEN: char = '{';
/// Closes a placeholder
pub const CLOSE: char = '}';

/// A closed `{identifier}` placeholder in a template string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TokenSpan {
    /// Char offset of the opening `{`
    pub start: usize,
    /// Char offset one past the closing `}`
    pub end: usize,
    /// Text between the braces
    pub identifier: String,
}

impl TokenSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Length in chars, braces included
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `offset` lies strictly between the braces' outer edges
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }

    /// True if the span intersects `range` without being fully covered by it
    pub fn partially_overlaps(&self, range: &Range<usize>) -> bool {
        let intersects = self.start < range.end && range.start < self.end;
        let covered = range.start <= self.start && self.end <= range.end;
        intersects && !covered
    }

    /// The wire form, `{identifier}`
    pub fn literal(&self) -> String {
        format!("{}{}{}", OPEN, self.identifier, CLOSE)
    }
}

struct Candidate {
    start: usize,
    identifier: String,
    /// A second `{` appeared before the close
    nested: bool,
}

/// Find every closed token in `text`, left to right.
///
/// The first `{` wins: a later `{` does not restart the candidate, it
/// invalidates it, so `{a{b}` yields nothing. An unterminated trailing `{…`
/// is plain text.
pub fn scan(text: &str) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut candidate: Option<Candidate> = None;

    for (idx, ch) in text.chars().enumerate() {
        match ch {
            OPEN => match candidate.as_mut() {
                Some(open) => open.nested = true,
                None => {
                    candidate = Some(Candidate {
                        start: idx,
                        identifier: String::new(),
                        nested: false,
                    })
                }
            },
            CLOSE => {
                if let Some(open) = candidate.take() {
                    if !open.nested && !open.identifier.is_empty() {
                        spans.push(TokenSpan {
                            start: open.start,
                            end: idx + 1,
                            identifier: open.identifier,
                        });
                    }
                }
            }
            _ => {
                if let Some(open) = candidate.as_mut() {
                    open.identifier.push(ch);
                }
            }
        }
    }

    spans
}

/// Token whose closing `}` ends exactly at `offset`
pub fn ending_at(spans: &[TokenSpan], offset: usize) -> Option<&TokenSpan> {
    spans.iter().find(|span| span.end == offset)
}

/// Token whose opening `{` sits exactly at `offset`
pub fn starting_at(spans: &[TokenSpan], offset: usize) -> Option<&TokenSpan> {
    spans.iter().find(|span| span.start == offset)
}

/// Token that `offset` lies strictly inside of
pub fn containing(spans: &[TokenSpan], offset: usize) -> Option<&TokenSpan> {
    spans.iter().find(|span| span.strictly_contains(offset))
}

/// Whether `identifier` can appear between braces as a token
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty() && !identifier.contains([OPEN, CLOSE])
}
