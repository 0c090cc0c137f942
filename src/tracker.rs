//! Span tracking: the registry of live decorations
//!
//! Decorations follow the text they replace. Edits outside a span move it,
//! edits that touch its text clear it, and a clear-on-enter span is dropped
//! once the cursor moves inside it.

use std::collections::BTreeMap;

use crate::buffer::Edit;
use crate::decoration::{Decoration, DecorationId, MarkOptions};
use crate::span::{Position, Span};
use crate::widget::Widget;

/// Registry of live decorations, indexed by line
#[derive(Debug, Default)]
pub struct SpanTracker {
    decorations: BTreeMap<DecorationId, Decoration>,
    /// Decorations on each line
    by_line: BTreeMap<usize, Vec<DecorationId>>,
    next_id: u64,
}

impl SpanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoration
    pub fn create(&mut self, span: Span, widget: Widget, options: MarkOptions) -> DecorationId {
        self.next_id += 1;
        let id = DecorationId(self.next_id);
        self.decorations.insert(
            id,
            Decoration {
                id,
                span,
                widget,
                options,
            },
        );
        self.index(id, span.line());
        id
    }

    /// Remove a decoration. Returns false if it was not live.
    pub fn clear(&mut self, id: DecorationId) -> bool {
        match self.decorations.remove(&id) {
            Some(d) => {
                self.unindex(id, d.span.line());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: DecorationId) -> Option<&Decoration> {
        self.decorations.get(&id)
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// Live decorations, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.decorations.values()
    }

    fn index(&mut self, id: DecorationId, line: usize) {
        self.by_line.entry(line).or_default().push(id);
    }

    fn unindex(&mut self, id: DecorationId, line: usize) {
        if let Some(ids) = self.by_line.get_mut(&line) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.by_line.remove(&line);
            }
        }
    }

    fn ids_on_line(&self, line: usize) -> impl Iterator<Item = DecorationId> + '_ {
        self.by_line.get(&line).into_iter().flatten().copied()
    }

    /// Decorations on a line, ordered by start column
    pub fn on_line(&self, line: usize) -> Vec<&Decoration> {
        let mut found: Vec<_> = self
            .ids_on_line(line)
            .filter_map(|id| self.decorations.get(&id))
            .collect();
        found.sort_by_key(|d| d.span.from.col);
        found
    }

    /// Decorations overlapping a span
    pub fn find_overlapping(&self, span: &Span) -> Vec<DecorationId> {
        self.on_line(span.line())
            .into_iter()
            .filter(|d| d.span.overlaps(span))
            .map(|d| d.id)
            .collect()
    }

    /// Clear every clear-on-enter decoration the cursor is now inside
    pub fn on_cursor_moved(&mut self, cursor: Position) -> Vec<DecorationId> {
        let entered: Vec<_> = self
            .on_line(cursor.line)
            .into_iter()
            .filter(|d| d.options.clear_on_enter)
            .filter(|d| {
                d.span
                    .contains(cursor, d.options.inclusive_left, d.options.inclusive_right)
            })
            .map(|d| d.id)
            .collect();

        for &id in &entered {
            self.clear(id);
            tracing::trace!(%id, %cursor, "cleared on enter");
        }
        entered
    }

    /// Move or clear decorations after a document edit.
    ///
    /// A replace only touches its own line; a split or join touches its
    /// line and everything below it.
    pub fn on_edit(&mut self, edit: Edit) -> Vec<DecorationId> {
        let affected: Vec<DecorationId> = match edit {
            Edit::Replace { line, .. } => self.ids_on_line(line).collect(),
            Edit::Split { line, .. } | Edit::Join { line, .. } => self
                .by_line
                .range(line..)
                .flat_map(|(_, ids)| ids.iter().copied())
                .collect(),
        };

        let mut cleared = Vec::new();
        let mut moved = Vec::new();
        for id in affected {
            let Some(d) = self.decorations.get_mut(&id) else {
                continue;
            };
            let before = d.span.line();
            if !shift_span(&mut d.span, d.options, edit) {
                cleared.push(id);
            } else if d.span.line() != before {
                moved.push((id, before, d.span.line()));
            }
        }

        for &(id, before, _) in &moved {
            self.unindex(id, before);
        }
        for &(id, _, after) in &moved {
            self.index(id, after);
        }
        for &id in &cleared {
            self.clear(id);
            tracing::trace!(%id, ?edit, "cleared by edit");
        }
        cleared
    }
}

/// Adjust a span for an edit. Returns false when the edit hit its text.
fn shift_span(span: &mut Span, options: MarkOptions, edit: Edit) -> bool {
    match edit {
        Edit::Replace {
            line,
            start,
            end,
            inserted,
        } => {
            if span.line() != line {
                return true;
            }
            let (from, to) = (span.from.col, span.to.col);
            let before = to < start || (to == start && !(options.inclusive_right && start == end));
            let after = from > end || (from == end && !(options.inclusive_left && start == end));
            if before {
                true
            } else if after {
                span.from.col = from - (end - start) + inserted;
                span.to.col = to - (end - start) + inserted;
                true
            } else {
                false
            }
        }
        Edit::Split { line, col } => {
            if span.line() < line {
                return true;
            }
            if span.line() > line {
                span.from.line += 1;
                span.to.line += 1;
                return true;
            }
            if span.to.col <= col {
                true
            } else if span.from.col >= col {
                *span = Span::on_line(line + 1, span.from.col - col, span.to.col - col);
                true
            } else {
                false
            }
        }
        Edit::Join { line, join_col } => {
            if span.line() < line {
                return true;
            }
            if span.line() > line {
                span.from.line -= 1;
                span.to.line -= 1;
                return true;
            }
            *span = Span::on_line(line - 1, span.from.col + join_col, span.to.col + join_col);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DecorationKind;
    use crate::widget::WidgetBody;

    fn rule_widget() -> Widget {
        Widget {
            kind: DecorationKind::Rule,
            body: WidgetBody::HorizontalRule,
        }
    }

    fn tracker_with(spans: &[Span]) -> (SpanTracker, Vec<DecorationId>) {
        let mut tracker = SpanTracker::new();
        let ids = spans
            .iter()
            .map(|&span| tracker.create(span, rule_widget(), MarkOptions::replaced()))
            .collect();
        (tracker, ids)
    }

    #[test]
    fn test_create_and_clear() {
        let (mut tracker, ids) = tracker_with(&[Span::on_line(0, 0, 4)]);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.get(ids[0]).unwrap().span, Span::on_line(0, 0, 4));
        assert!(tracker.clear(ids[0]));
        assert!(!tracker.clear(ids[0]));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_find_overlapping() {
        let (tracker, ids) = tracker_with(&[Span::on_line(0, 0, 4), Span::on_line(1, 0, 4)]);
        assert_eq!(tracker.find_overlapping(&Span::on_line(1, 0, 4)), vec![ids[1]]);
        assert_eq!(tracker.find_overlapping(&Span::on_line(1, 2, 9)), vec![ids[1]]);
        assert!(tracker.find_overlapping(&Span::on_line(2, 0, 4)).is_empty());
    }

    #[test]
    fn test_cursor_enter_clears() {
        let (mut tracker, ids) = tracker_with(&[Span::on_line(0, 0, 6), Span::on_line(1, 0, 6)]);

        // Boundaries are not inside for non-inclusive marks
        assert!(tracker.on_cursor_moved(Position::new(0, 0)).is_empty());
        assert!(tracker.on_cursor_moved(Position::new(0, 6)).is_empty());

        assert_eq!(tracker.on_cursor_moved(Position::new(0, 3)), vec![ids[0]]);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.get(ids[1]).is_some());
    }

    #[test]
    fn test_cursor_enter_respects_option() {
        let mut tracker = SpanTracker::new();
        let options = MarkOptions {
            clear_on_enter: false,
            ..MarkOptions::replaced()
        };
        tracker.create(Span::on_line(0, 0, 6), rule_widget(), options);
        assert!(tracker.on_cursor_moved(Position::new(0, 3)).is_empty());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_edit_inside_span_clears() {
        let (mut tracker, ids) = tracker_with(&[Span::on_line(0, 0, 6)]);
        let cleared = tracker.on_edit(Edit::Replace {
            line: 0,
            start: 3,
            end: 3,
            inserted: 1,
        });
        assert_eq!(cleared, vec![ids[0]]);
    }

    #[test]
    fn test_typing_at_boundaries_does_not_extend() {
        let (mut tracker, ids) = tracker_with(&[Span::on_line(0, 2, 6)]);

        // At the end: span untouched
        tracker.on_edit(Edit::Replace { line: 0, start: 6, end: 6, inserted: 1 });
        assert_eq!(tracker.get(ids[0]).unwrap().span, Span::on_line(0, 2, 6));

        // At the start: span moves right
        tracker.on_edit(Edit::Replace { line: 0, start: 2, end: 2, inserted: 1 });
        assert_eq!(tracker.get(ids[0]).unwrap().span, Span::on_line(0, 3, 7));

        // Deleting before it moves it left
        tracker.on_edit(Edit::Replace { line: 0, start: 0, end: 1, inserted: 0 });
        assert_eq!(tracker.get(ids[0]).unwrap().span, Span::on_line(0, 2, 6));
    }

    #[test]
    fn test_split_and_join_move_spans() {
        let (mut tracker, ids) = tracker_with(&[
            Span::on_line(0, 0, 4),
            Span::on_line(1, 0, 5),
            Span::on_line(3, 0, 4),
        ]);

        // Enter at column 0 of line 1 pushes it and everything below down
        assert!(tracker.on_edit(Edit::Split { line: 1, col: 0 }).is_empty());
        assert_eq!(tracker.get(ids[0]).unwrap().span, Span::on_line(0, 0, 4));
        assert_eq!(tracker.get(ids[1]).unwrap().span, Span::on_line(2, 0, 5));
        assert_eq!(tracker.get(ids[2]).unwrap().span, Span::on_line(4, 0, 4));

        // Backspace at the start of line 2 joins it onto the empty line 1
        assert!(tracker.on_edit(Edit::Join { line: 2, join_col: 0 }).is_empty());
        assert_eq!(tracker.get(ids[1]).unwrap().span, Span::on_line(1, 0, 5));
        assert_eq!(tracker.get(ids[2]).unwrap().span, Span::on_line(3, 0, 4));

        // Line lookups follow the moves
        assert!(tracker.on_line(2).is_empty());
        assert_eq!(tracker.on_line(3)[0].id, ids[2]);
        assert_eq!(tracker.find_overlapping(&Span::on_line(1, 1, 2)), vec![ids[1]]);

        // Splitting through the middle of a span clears it
        assert_eq!(tracker.on_edit(Edit::Split { line: 1, col: 2 }), vec![ids[1]]);
        assert!(tracker.on_line(1).is_empty());
        assert!(tracker.find_overlapping(&Span::on_line(1, 0, 5)).is_empty());
    }

    #[test]
    fn test_index_stays_in_step_with_registry() {
        let spans: Vec<_> = (0..2_000).map(|line| Span::on_line(line, 0, 4)).collect();
        let (mut tracker, ids) = tracker_with(&spans);

        // Push everything from line 500 down by one, then clear a few
        tracker.on_edit(Edit::Split { line: 500, col: 0 });
        assert!(tracker.clear(ids[1_000]));
        tracker.on_cursor_moved(Position::new(11, 2));

        assert_eq!(tracker.len(), 1_998);
        for d in tracker.iter() {
            let on_line: Vec<_> = tracker.on_line(d.span.line()).iter().map(|o| o.id).collect();
            assert_eq!(on_line, vec![d.id]);
        }
        assert!(tracker.on_line(500).is_empty());
        assert!(tracker.on_line(11).is_empty());
        assert_eq!(tracker.on_line(2_000)[0].id, ids[1_999]);
    }

    #[test]
    fn test_on_line_sorted() {
        let (tracker, ids) = tracker_with(&[Span::on_line(0, 5, 8), Span::on_line(0, 0, 3)]);
        let found: Vec<_> = tracker.on_line(0).iter().map(|d| d.id).collect();
        assert_eq!(found, vec![ids[1], ids[0]]);
    }
}
