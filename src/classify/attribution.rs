//! Attribution tags: `@name spoken text`, indented in 8-column steps
//!
//! Captures: `[tag, content]`, where `tag` is the `@name` token and
//! `content` is the attributed text with surrounding blanks trimmed.

use regex::Captures;

use super::{char_span, DecorationKind, MatchResult};

pub(super) const PATTERN: &str = r"^(\s{8})*(@[A-Za-z0-9]+)( .+)$";

pub(super) fn extract(line: usize, text: &str, caps: &Captures<'_>) -> Option<MatchResult> {
    let whole = caps.get(0)?;
    let tag = caps.get(2)?;
    let content = caps.get(3)?;

    Some(MatchResult {
        span: char_span(line, text, whole.range()),
        kind: DecorationKind::Attribution,
        leading_whitespace: text[whole.start()..tag.start()].to_string(),
        captures: vec![tag.as_str().to_string(), content.as_str().trim().to_string()],
    })
}

/// Number of blanks that follow the tag in its rendered label.
///
/// The tag is drawn at the start of the span and the indentation it
/// replaces is carried after it, minus the tag's own width and one column
/// per started 8-column tab stop beyond it.
pub fn label_padding(indent_width: usize, tag_width: usize) -> usize {
    let beyond_tag = indent_width.saturating_sub(tag_width);
    indent_width.saturating_sub(tag_width + beyond_tag.div_ceil(8))
}
