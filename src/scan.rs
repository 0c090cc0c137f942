//! Scan-and-apply: decorate the visible lines for one family
//!
//! For every line in the viewport, in ascending order:
//! 1. skip lines whose mode is not the markup mode
//! 2. classify the line, skip when nothing matches
//! 3. skip when the cursor touches the span (both ends included)
//! 4. skip when a decoration already overlaps the span
//! 5. build the widget and register it with the host
//!
//! A host error aborts the rest of the pass. The next redraw trigger
//! rescans the whole viewport, so nothing is lost.

use crate::classify::{Classifiers, Family};
use crate::decoration::MarkOptions;
use crate::error::Result;
use crate::host::Host;
use crate::widget::Widget;

/// Outcome counters of one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Lines visited
    pub scanned: usize,
    /// Decorations registered
    pub created: usize,
    /// Lines outside the markup mode
    pub skipped_mode: usize,
    /// Matches left alone because the cursor is on them
    pub skipped_cursor: usize,
    /// Matches that already have a decoration
    pub skipped_duplicate: usize,
}

impl ScanReport {
    /// Sum two reports
    pub fn merge(mut self, other: ScanReport) -> Self {
        self.scanned += other.scanned;
        self.created += other.created;
        self.skipped_mode += other.skipped_mode;
        self.skipped_cursor += other.skipped_cursor;
        self.skipped_duplicate += other.skipped_duplicate;
        self
    }
}

/// Settings a pass needs besides the host
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub classifiers: &'a Classifiers,
    /// Mode tag of decoratable lines
    pub markup_mode: &'a str,
    /// Attribution drawn in the self style
    pub self_tag: &'a str,
}

/// Run one family over the host's viewport
pub fn apply<H: Host + ?Sized>(
    family: Family,
    cx: &ScanContext<'_>,
    host: &mut H,
) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    let viewport = host.viewport();
    let cursor = host.cursor();

    for line in viewport {
        report.scanned += 1;

        if host.line_mode(line)? != cx.markup_mode {
            report.skipped_mode += 1;
            continue;
        }

        let Some(m) = cx.classifiers.classify(family, line, host.line_text(line)?) else {
            continue;
        };

        if m.span.touches(cursor) {
            tracing::trace!(%family, span = %m.span, %cursor, "cursor on span");
            report.skipped_cursor += 1;
            continue;
        }

        if !host.find_overlapping(&m.span).is_empty() {
            report.skipped_duplicate += 1;
            continue;
        }

        let widget = Widget::build(&m, cx.self_tag);
        let id = host.create_decoration(m.span, widget, MarkOptions::replaced())?;
        tracing::trace!(%family, kind = ?m.kind, span = %m.span, %id, "decorated");
        report.created += 1;
    }

    tracing::debug!(
        %family,
        scanned = report.scanned,
        created = report.created,
        skipped_cursor = report.skipped_cursor,
        skipped_duplicate = report.skipped_duplicate,
        "scan pass"
    );

    Ok(report)
}
