//! Chosen items of a multi-select, drawn as removable chips on one line.

use crate::candidate_list::truncate;
use crate::item::Item;
use crate::style::TypeAheadStyle;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::cell::RefCell;
use unicode_width::UnicodeWidthStr;

const REMOVE_MARK: &str = "×";
/// Longest name a chip shows before truncating.
const MAX_CHIP_NAME: usize = 24;

/// Hit areas of the chips drawn by the last render.
#[derive(Debug, Default)]
pub struct Chips {
    hits: RefCell<Vec<(Rect, u64)>>,
}

impl Chips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the chip under a pointer position.
    pub fn hit(&self, column: u16, row: u16) -> Option<u64> {
        let pos = Position::new(column, row);
        self.hits
            .borrow()
            .iter()
            .find(|(area, _)| area.contains(pos))
            .map(|&(_, id)| id)
    }

    /// Draw `chosen` left to right in `area`'s first row. Chips that do not
    /// fit are summarized as `+N` and get no hit area; the picker removes
    /// those from the end with Backspace.
    pub fn render(&self, frame: &mut Frame, area: Rect, chosen: &[Item], style: &TypeAheadStyle) {
        let mut hits = self.hits.borrow_mut();
        hits.clear();
        if area.height == 0 || chosen.is_empty() {
            return;
        }

        let right = area.x.saturating_add(area.width);
        let mut x = area.x;
        let mut spans = Vec::new();
        for (shown, item) in chosen.iter().enumerate() {
            let label = format!(" {} {REMOVE_MARK} ", truncate(&item.name, MAX_CHIP_NAME));
            let width = label.width() as u16;
            let rest = chosen.len() - shown;
            // Keep room for the overflow marker unless this is the last chip.
            let reserve = if rest > 1 { format!(" +{}", rest - 1).len() as u16 } else { 0 };
            if x.saturating_add(width).saturating_add(reserve) > right {
                spans.push(Span::styled(format!("+{rest}"), style.placeholder));
                break;
            }
            hits.push((Rect::new(x, area.y, width, 1), item.id));
            spans.push(Span::styled(label, style.chip));
            spans.push(Span::raw(" "));
            x = x.saturating_add(width + 1);
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), Rect { height: 1, ..area });
    }
}
