//! Sub-tags under a dialogue item: `> reference`, `$ command`, `~ call`
//!
//! Captures: `[marker, content]`, where `content` keeps its leading blank.

use regex::Captures;

use super::{char_span, DecorationKind, MatchResult};

pub(super) const PATTERN: &str = r"^(\s{4})*([>$~])( .+)$";

pub(super) fn extract(line: usize, text: &str, caps: &Captures<'_>) -> Option<MatchResult> {
    let whole = caps.get(0)?;
    let marker = caps.get(2)?;
    let content = caps.get(3)?;

    let kind = match marker.as_str() {
        ">" => DecorationKind::Reference,
        "$" => DecorationKind::Command,
        "~" => DecorationKind::Call,
        _ => return None,
    };

    Some(MatchResult {
        span: char_span(line, text, whole.range()),
        kind,
        leading_whitespace: text[whole.start()..marker.start()].to_string(),
        captures: vec![marker.as_str().to_string(), content.as_str().to_string()],
    })
}
