//! The decoration engine: one named operation per markup family

use crate::classify::{Classifiers, Family};
use crate::config::Config;
use crate::error::Result;
use crate::host::Host;
use crate::scan::{self, ScanContext, ScanReport};

/// Owns the compiled classifiers and the settings every pass reads
pub struct DecorationEngine {
    classifiers: Classifiers,
    config: Config,
}

impl DecorationEngine {
    pub fn new(config: Config) -> Self {
        Self {
            classifiers: Classifiers::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn classifiers(&self) -> &Classifiers {
        &self.classifiers
    }

    /// Decorate `@name` attribution lines in the viewport
    pub fn render_attribution_tags<H: Host + ?Sized>(&self, host: &mut H) -> Result<ScanReport> {
        self.render_family(Family::Attribution, host)
    }

    /// Decorate `*` dialogue items in the viewport
    pub fn render_list_tags<H: Host + ?Sized>(&self, host: &mut H) -> Result<ScanReport> {
        self.render_family(Family::ListItem, host)
    }

    /// Decorate `>`, `$` and `~` sub-tags in the viewport
    pub fn render_list_subtags<H: Host + ?Sized>(&self, host: &mut H) -> Result<ScanReport> {
        self.render_family(Family::SubTag, host)
    }

    /// Decorate `----` rules in the viewport
    pub fn render_rule_tags<H: Host + ?Sized>(&self, host: &mut H) -> Result<ScanReport> {
        self.render_family(Family::Rule, host)
    }

    /// Run one family's pass. Disabled families do nothing.
    pub fn render_family<H: Host + ?Sized>(&self, family: Family, host: &mut H) -> Result<ScanReport> {
        if !self.config.family_enabled(family) {
            return Ok(ScanReport::default());
        }
        let cx = ScanContext {
            classifiers: &self.classifiers,
            markup_mode: &self.config.markup_mode,
            self_tag: &self.config.self_tag,
        };
        scan::apply(family, &cx, host)
    }

    /// Run every family in priority order.
    ///
    /// Stops at the first host error.
    pub fn render_all<H: Host + ?Sized>(&self, host: &mut H) -> Result<ScanReport> {
        let mut total = ScanReport::default();
        for family in Family::ALL {
            total = total.merge(self.render_family(family, host)?);
        }
        Ok(total)
    }
}

impl Default for DecorationEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DecorationKind;
    use crate::scan::tests::FakeHost;
    use crate::span::Position;

    #[test]
    fn test_named_operations_cover_their_family() {
        let engine = DecorationEngine::default();
        let mut host = FakeHost::new(&["@a hi", "* b", "> c", "----"]);

        assert_eq!(engine.render_rule_tags(&mut host).unwrap().created, 1);
        assert_eq!(engine.render_list_subtags(&mut host).unwrap().created, 1);
        assert_eq!(engine.render_list_tags(&mut host).unwrap().created, 1);
        assert_eq!(engine.render_attribution_tags(&mut host).unwrap().created, 1);

        let mut kinds = host.kinds();
        kinds.sort_by_key(|(line, _)| *line);
        assert_eq!(
            kinds,
            vec![
                (0, DecorationKind::Attribution),
                (1, DecorationKind::ListItem),
                (2, DecorationKind::Reference),
                (3, DecorationKind::Rule),
            ]
        );
    }

    #[test]
    fn test_disabled_family_is_noop() {
        let config = Config {
            rules: false,
            ..Config::default()
        };
        let engine = DecorationEngine::new(config);
        let mut host = FakeHost::new(&["----", "* item"]);

        let report = engine.render_all(&mut host).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(host.kinds(), vec![(1, DecorationKind::ListItem)]);
    }

    #[test]
    fn test_render_all_twice_then_cursor_moves_away() {
        let engine = DecorationEngine::default();
        let mut host = FakeHost::new(&["@me thinking", "$ open door"]);
        host.cursor = Position::new(0, 5);

        let first = engine.render_all(&mut host).unwrap();
        assert_eq!(first.created, 1);
        assert_eq!(first.skipped_cursor, 1);

        let second = engine.render_all(&mut host).unwrap();
        assert_eq!(second.created, 0);

        host.cursor = Position::new(1, 0);
        engine.render_all(&mut host).unwrap();
        // Line 1 is still decorated, line 0 now is too
        assert_eq!(host.decorations.len(), 2);
    }

    #[test]
    fn test_custom_markup_mode() {
        let config = Config {
            markup_mode: "gfm".to_string(),
            ..Config::default()
        };
        let engine = DecorationEngine::new(config);
        let mut host = FakeHost::new(&["* item"]);

        assert_eq!(engine.render_all(&mut host).unwrap().skipped_mode, 4);
        host.modes[0] = "gfm".to_string();
        assert_eq!(engine.render_all(&mut host).unwrap().created, 1);
    }
}
