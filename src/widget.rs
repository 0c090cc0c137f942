//! Rendered replacements for decorated spans

use crate::classify::{label_padding, DecorationKind, MatchResult};
use crate::style::Style;

/// A run of widget text sharing one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Space-separated class names
    pub class: String,
    /// Blank cells drawn before the text, in the segment's style
    pub padding_left: usize,
}

impl Segment {
    pub fn new(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: class.into(),
            padding_left: 0,
        }
    }

    /// Builder: set left padding
    pub fn with_padding_left(mut self, cells: usize) -> Self {
        self.padding_left = cells;
        self
    }

    pub fn style(&self) -> Style {
        Style::for_class(&self.class)
    }
}

/// Visible content of a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetBody {
    /// Inline text runs
    Text(Vec<Segment>),
    /// A rule across the text area
    HorizontalRule,
}

/// The sole visible representation of a decorated span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub kind: DecorationKind,
    pub body: WidgetBody,
}

impl Widget {
    /// Render a classified line.
    ///
    /// `self_tag` is the attribution that gets the `me-tag` class.
    pub fn build(m: &MatchResult, self_tag: &str) -> Self {
        let body = match m.kind {
            DecorationKind::Attribution => attribution_body(m, self_tag),
            DecorationKind::Rule => WidgetBody::HorizontalRule,
            kind => {
                let content = m.captures.last().map(String::as_str).unwrap_or_default();
                let mut text = String::with_capacity(m.leading_whitespace.len() + content.len() + 4);
                text.push_str(&m.leading_whitespace);
                if let Some(glyph) = kind.glyph() {
                    text.push(glyph);
                }
                text.push_str(content);
                WidgetBody::Text(vec![Segment::new(text, kind.class())])
            }
        };

        Self { kind: m.kind, body }
    }

    /// Widget class names (outermost segment for text widgets)
    pub fn class(&self) -> &str {
        match &self.body {
            WidgetBody::Text(segments) => segments
                .first()
                .map(|s| s.class.as_str())
                .unwrap_or(self.kind.class()),
            WidgetBody::HorizontalRule => self.kind.class(),
        }
    }

    /// Concatenated widget text, padding excluded. Empty for rules.
    pub fn text(&self) -> String {
        match &self.body {
            WidgetBody::Text(segments) => segments.iter().map(|s| s.text.as_str()).collect(),
            WidgetBody::HorizontalRule => String::new(),
        }
    }

    /// Whether this is an attribution rendered in the self style
    pub fn is_self_attribution(&self) -> bool {
        self.class().split_whitespace().any(|c| c == "me-tag")
    }
}

fn attribution_body(m: &MatchResult, self_tag: &str) -> WidgetBody {
    let tag = m.captures.first().map(String::as_str).unwrap_or_default();
    let content = m.captures.get(1).map(String::as_str).unwrap_or_default();

    let indent_width = m.leading_whitespace.chars().count();
    let padding = label_padding(indent_width, tag.chars().count());
    let label = format!("{tag}{}", " ".repeat(padding));

    let mut class = DecorationKind::Attribution.class().to_string();
    if label.trim() == self_tag {
        class.push_str(" me-tag");
    }

    WidgetBody::Text(vec![
        Segment::new(label, class),
        Segment::new(content, "cm-comment cm-person").with_padding_left(1),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classifiers, Family};
    use pretty_assertions::assert_eq;

    fn render(family: Family, text: &str) -> Widget {
        let m = Classifiers::new().classify(family, 0, text).unwrap();
        Widget::build(&m, "@me")
    }

    #[test]
    fn test_attribution_widget() {
        let widget = render(Family::Attribution, "@alice said hello");
        assert_eq!(
            widget.body,
            WidgetBody::Text(vec![
                Segment::new("@alice", "at-tag"),
                Segment::new("said hello", "cm-comment cm-person").with_padding_left(1),
            ])
        );
        assert!(!widget.is_self_attribution());
    }

    #[test]
    fn test_self_attribution() {
        let widget = render(Family::Attribution, "@me thinking");
        assert!(widget.is_self_attribution());
        assert_eq!(widget.class(), "at-tag me-tag");

        let indented = render(Family::Attribution, "        @me later");
        assert!(indented.is_self_attribution());
        assert_eq!(indented.text(), "@me    later");
    }

    #[test]
    fn test_list_item_widget() {
        let widget = render(Family::ListItem, "    * pick up the key");
        assert_eq!(widget.text(), "    ● pick up the key");
        assert_eq!(widget.class(), "dialogue-tag");
    }

    #[test]
    fn test_subtag_widgets() {
        assert_eq!(
            render(Family::SubTag, "> Go to chapter two").text(),
            "➜ Go to chapter two"
        );
        assert_eq!(render(Family::SubTag, "    $ light lamp").text(), "    ⊕ light lamp");
        assert_eq!(render(Family::SubTag, "~ ring bell").text(), "⮡ ring bell");
        assert_eq!(render(Family::SubTag, "~ ring bell").class(), "dialogue-call-tag");
    }

    #[test]
    fn test_rule_widget() {
        let widget = render(Family::Rule, "-----");
        assert_eq!(widget.body, WidgetBody::HorizontalRule);
        assert_eq!(widget.class(), "hr");
        assert_eq!(widget.text(), "");
    }
}
