//! Configuration file support
//!
//! Loads settings from ~/.markdeco.toml (or %USERPROFILE%\.markdeco.toml on
//! Windows), or from a path given on the command line.
//!
//! Example:
//! ```toml
//! # markdeco configuration
//! markup-mode = "markdown"
//! self-tag = "@me"
//! attribution = true
//! list-items = true
//! sub-tags = true
//! rules = false
//! scroll-margin = 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::classify::Family;
use crate::error::Result;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Mode tag of lines that may be decorated
    pub markup_mode: String,
    /// Attribution tag drawn in the self style
    pub self_tag: String,
    /// Render `@name` attributions
    pub attribution: bool,
    /// Render `*` dialogue items
    pub list_items: bool,
    /// Render `>`, `$` and `~` sub-tags
    pub sub_tags: bool,
    /// Render `----` rules
    pub rules: bool,
    /// Lines kept visible above and below the cursor when scrolling
    pub scroll_margin: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markup_mode: "markdown".to_string(),
            self_tag: "@me".to_string(),
            attribution: true,
            list_items: true,
            sub_tags: true,
            rules: true,
            scroll_margin: 2,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".markdeco.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".markdeco.toml"))
        }
    }

    /// Load configuration from the default location.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::parse(&contents)?;
        let mut config = Config::default();
        config.apply(&settings);
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse config file contents into a table
    fn parse(contents: &str) -> Result<Table> {
        Ok(contents.parse::<Table>()?)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, settings: &Table) {
        if let Some(value) = settings.get("markup-mode").and_then(Value::as_str) {
            if !value.trim().is_empty() {
                self.markup_mode = value.trim().to_string();
            }
        }

        if let Some(value) = settings.get("self-tag").and_then(Value::as_str) {
            let tag = value.trim();
            if !tag.is_empty() {
                self.self_tag = if tag.starts_with('@') {
                    tag.to_string()
                } else {
                    format!("@{tag}")
                };
            }
        }

        if let Some(value) = settings.get("attribution").and_then(parse_bool) {
            self.attribution = value;
        }

        if let Some(value) = settings.get("list-items").and_then(parse_bool) {
            self.list_items = value;
        }

        if let Some(value) = settings.get("sub-tags").and_then(parse_bool) {
            self.sub_tags = value;
        }

        if let Some(value) = settings.get("rules").and_then(parse_bool) {
            self.rules = value;
        }

        if let Some(n) = settings.get("scroll-margin").and_then(Value::as_integer) {
            self.scroll_margin = n.clamp(0, 8) as usize; // Between 0 and 8
        }
    }

    /// Whether a family's operation should run
    pub fn family_enabled(&self, family: Family) -> bool {
        match family {
            Family::Attribution => self.attribution,
            Family::ListItem => self.list_items,
            Family::SubTag => self.sub_tags,
            Family::Rule => self.rules,
        }
    }
}

/// Parse a boolean from a TOML bool or a yes/no style string
fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::String(s) => Some(matches!(
            s.to_lowercase().as_str(),
            "true" | "yes" | "on" | "1"
        )),
        Value::Integer(n) => Some(*n != 0),
        _ => None,
    }
}
