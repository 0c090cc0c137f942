//! Line classifiers
//!
//! Each markup family is recognised by one anchored pattern that must
//! consume the whole line. Classification is pure: the compiled regexes
//! keep no search position between calls, so a line is matched the same
//! way no matter what was classified before it.
//!
//! The families are designed not to overlap (each keys on a different
//! first non-blank character), but nothing here enforces that. Callers that
//! run several families over the same line should use [`Family::ALL`]
//! order and rely on the duplicate check in the scan.

mod attribution;
mod list_item;
mod rule;
mod subtag;

use std::fmt;
use std::ops::Range;

use regex::{Captures, Regex};

use crate::span::Span;

pub use attribution::label_padding;

/// A group of markup patterns rendered by one named operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `@name text` attribution lines
    Attribution,
    /// `* text` dialogue list items
    ListItem,
    /// `> text`, `$ text` and `~ text` sub-tags
    SubTag,
    /// `----` horizontal rules
    Rule,
}

impl Family {
    /// All families in priority order
    pub const ALL: [Family; 4] = [
        Family::Attribution,
        Family::ListItem,
        Family::SubTag,
        Family::Rule,
    ];

    /// Get a human-readable name for this family
    pub fn name(&self) -> &'static str {
        match self {
            Family::Attribution => "attribution",
            Family::ListItem => "list-item",
            Family::SubTag => "sub-tag",
            Family::Rule => "rule",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a matched span is rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    Attribution,
    ListItem,
    Reference,
    Command,
    Call,
    Rule,
}

impl DecorationKind {
    /// The family whose pattern produces this kind
    pub fn family(&self) -> Family {
        match self {
            DecorationKind::Attribution => Family::Attribution,
            DecorationKind::ListItem => Family::ListItem,
            DecorationKind::Reference | DecorationKind::Command | DecorationKind::Call => {
                Family::SubTag
            }
            DecorationKind::Rule => Family::Rule,
        }
    }

    /// Widget class name
    pub fn class(&self) -> &'static str {
        match self {
            DecorationKind::Attribution => "at-tag",
            DecorationKind::ListItem => "dialogue-tag",
            DecorationKind::Reference => "dialogue-heading-tag",
            DecorationKind::Command => "dialogue-command-tag",
            DecorationKind::Call => "dialogue-call-tag",
            DecorationKind::Rule => "hr",
        }
    }

    /// Glyph substituted for the leading marker, if any
    pub fn glyph(&self) -> Option<char> {
        match self {
            DecorationKind::ListItem => Some('●'),
            DecorationKind::Reference => Some('➜'),
            DecorationKind::Command => Some('⊕'),
            DecorationKind::Call => Some('⮡'),
            DecorationKind::Attribution | DecorationKind::Rule => None,
        }
    }
}

/// A classified line, consumed immediately by the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Text replaced by the decoration
    pub span: Span,
    pub kind: DecorationKind,
    /// Whitespace between the start of the match and the marker
    pub leading_whitespace: String,
    /// Family-specific captures, see each classifier
    pub captures: Vec<String>,
}

type Extract = fn(usize, &str, &Captures<'_>) -> Option<MatchResult>;

/// One compiled family pattern
#[derive(Debug)]
pub struct PatternRule {
    /// Family this rule classifies
    pub family: Family,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Builds the match from the captures
    extract: Extract,
}

impl PatternRule {
    /// Create a new pattern rule
    pub fn new(family: Family, pattern: &str, extract: Extract) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            family,
            pattern: regex,
            extract,
        })
    }

    /// Classify a line of text
    pub fn classify(&self, line: usize, text: &str) -> Option<MatchResult> {
        let caps = self.pattern.captures(text)?;
        (self.extract)(line, text, &caps)
    }
}

/// The compiled set of family classifiers
#[derive(Debug)]
pub struct Classifiers {
    rules: Vec<PatternRule>,
}

impl Classifiers {
    /// Build the built-in classifier set
    pub fn new() -> Self {
        let mut rules = Vec::with_capacity(Family::ALL.len());

        if let Some(rule) = PatternRule::new(
            Family::Attribution,
            attribution::PATTERN,
            attribution::extract,
        ) {
            rules.push(rule);
        }
        if let Some(rule) = PatternRule::new(Family::ListItem, list_item::PATTERN, list_item::extract)
        {
            rules.push(rule);
        }
        if let Some(rule) = PatternRule::new(Family::SubTag, subtag::PATTERN, subtag::extract) {
            rules.push(rule);
        }
        if let Some(rule) = PatternRule::new(Family::Rule, rule::PATTERN, rule::extract) {
            rules.push(rule);
        }

        Self { rules }
    }

    /// Get the rule for a family
    pub fn rule(&self, family: Family) -> Option<&PatternRule> {
        self.rules.iter().find(|r| r.family == family)
    }

    /// Classify `text` (the contents of document line `line`) against one family
    pub fn classify(&self, family: Family, line: usize, text: &str) -> Option<MatchResult> {
        self.rule(family)?.classify(line, text)
    }

}

impl Default for Classifiers {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a byte range of `text` into a char-column span on `line`
fn char_span(line: usize, text: &str, bytes: Range<usize>) -> Span {
    let start = text[..bytes.start].chars().count();
    let len = text[bytes.start..bytes.end].chars().count();
    Span::on_line(line, start, start + len)
}
