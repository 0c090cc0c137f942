//! Horizontal rules: a line of four or more dashes

use regex::Captures;

use super::{char_span, DecorationKind, MatchResult};

pub(super) const PATTERN: &str = r"^-{4,}$";

pub(super) fn extract(line: usize, text: &str, caps: &Captures<'_>) -> Option<MatchResult> {
    caps.get(0)?;

    Some(MatchResult {
        span: char_span(line, text, 0..text.len()),
        kind: DecorationKind::Rule,
        leading_whitespace: String::new(),
        captures: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classifiers, Family};
    use crate::span::Span;

    #[test]
    fn test_rule_spans_whole_line() {
        let classifiers = Classifiers::new();
        let m = classifiers.classify(Family::Rule, 3, "------").unwrap();
        assert_eq!(m.kind, DecorationKind::Rule);
        assert_eq!(m.span, Span::on_line(3, 0, 6));
        assert!(m.captures.is_empty());
    }

    #[test]
    fn test_rejects_short_or_mixed() {
        let classifiers = Classifiers::new();
        assert!(classifiers.classify(Family::Rule, 0, "---").is_none());
        assert!(classifiers.classify(Family::Rule, 0, "---- ").is_none());
        assert!(classifiers.classify(Family::Rule, 0, " ----").is_none());
        assert!(classifiers.classify(Family::Rule, 0, "-- --").is_none());
    }
}
