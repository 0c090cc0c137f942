//! Per-line mode tags
//!
//! Lines are `markdown` unless they belong to a fenced code block. A fence
//! (its delimiters included) takes the first word of the opening info
//! string as its mode, or `code` when there is none. An unclosed fence runs
//! to the end of the document.

use std::sync::OnceLock;

use regex::Regex;

/// Mode of ordinary document lines
pub const MARKDOWN: &str = "markdown";

/// Mode of fenced blocks without an info string
pub const CODE: &str = "code";

fn fence_pattern() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})\s*([^\s`]*)").ok())
        .as_ref()
}

/// Fence state carried from one line to the next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineState {
    /// Open fence: delimiter char, delimiter length, mode tag
    fence: Option<(char, usize, String)>,
}

impl LineState {
    /// Check if we're inside a fenced block
    pub fn is_inside_fence(&self) -> bool {
        self.fence.is_some()
    }

    /// Mode of `text` given this state, and the state for the next line
    pub fn advance(&self, text: &str) -> (String, LineState) {
        let fence = fence_pattern().and_then(|re| re.captures(text));

        match (&self.fence, fence) {
            (Some((ch, len, mode)), Some(caps)) => {
                let delim = &caps[1];
                let closes = delim.starts_with(*ch) && delim.len() >= *len && caps[2].is_empty();
                if closes {
                    (mode.clone(), LineState::default())
                } else {
                    (mode.clone(), self.clone())
                }
            }
            (Some((_, _, mode)), None) => (mode.clone(), self.clone()),
            (None, Some(caps)) => {
                let delim = &caps[1];
                let ch = delim.chars().next().unwrap_or('`');
                let mode = if caps[2].is_empty() {
                    CODE.to_string()
                } else {
                    caps[2].to_lowercase()
                };
                let next = LineState {
                    fence: Some((ch, delim.len(), mode.clone())),
                };
                (mode, next)
            }
            (None, None) => (MARKDOWN.to_string(), LineState::default()),
        }
    }
}

/// Compute the mode of every line
pub fn line_modes<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut state = LineState::default();
    lines
        .into_iter()
        .map(|text| {
            let (mode, next) = state.advance(text);
            state = next;
            mode
        })
        .collect()
}
