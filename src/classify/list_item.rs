//! Dialogue list items: `* text`, indented in 4-column steps
//!
//! Captures: `[content]`, the text after the bullet including its leading
//! blank.

use regex::Captures;

use super::{char_span, DecorationKind, MatchResult};

pub(super) const PATTERN: &str = r"^(\s{4})*(\*)( .+)$";

pub(super) fn extract(line: usize, text: &str, caps: &Captures<'_>) -> Option<MatchResult> {
    let whole = caps.get(0)?;
    let bullet = caps.get(2)?;
    let content = caps.get(3)?;

    Some(MatchResult {
        span: char_span(line, text, whole.range()),
        kind: DecorationKind::ListItem,
        leading_whitespace: text[whole.start()..bullet.start()].to_string(),
        captures: vec![content.as_str().to_string()],
    })
}
