//! The dropdown part of a picker: candidate rows, or a status line while the
//! source is loading or failed.
//!
//! The list keeps the geometry of its last render so pointer presses can be
//! mapped back to candidate indices.

use crate::highlight::Highlight;
use crate::item::Item;
use crate::style::TypeAheadStyle;
use ratatui::layout::{Position, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LOADING_TEXT: &str = "Loading…";
const SELECTED_PREFIX: &str = "▸ ";
const PREFIX: &str = "  ";

/// What the list shows.
#[derive(Debug, Clone, Copy)]
pub enum ListBody<'a> {
    Loading,
    Failed(&'a str),
    Rows {
        items: &'a [&'a Item],
        highlight: Highlight,
    },
}

#[derive(Debug)]
pub struct CandidateList {
    max_visible: usize,
    offset: Cell<usize>,
    /// Outer rect of the last render, border included.
    area: Cell<Rect>,
    /// Row area of the last render and how many rows were drawn in it.
    rows: Cell<(Rect, usize)>,
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateList {
    pub fn new() -> Self {
        Self {
            max_visible: 8,
            offset: Cell::new(0),
            area: Cell::new(Rect::default()),
            rows: Cell::new((Rect::default(), 0)),
        }
    }

    /// Maximum number of rows before the list scrolls.
    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.max_visible = max.max(1);
        self
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// First candidate index drawn by the last render.
    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    /// Outer rect of the last render, or an empty rect when hidden.
    pub fn area(&self) -> Rect {
        self.area.get()
    }

    /// Forget the rendered geometry. Called when the list is not drawn.
    pub fn hide(&self) {
        self.area.set(Rect::default());
        self.rows.set((Rect::default(), 0));
    }

    /// Scroll back to the top. Called when the candidate set changes.
    pub fn reset_scroll(&self) {
        self.offset.set(0);
    }

    /// Candidate index under a pointer position, if it hit a drawn row.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let (rows, count) = self.rows.get();
        if !rows.contains(Position::new(column, row)) {
            return None;
        }
        let line = usize::from(row - rows.y);
        (line < count).then(|| self.offset.get() + line)
    }

    /// Keep `active` inside the visible window of `len` rows.
    fn scroll_to(&self, active: Option<usize>, len: usize, visible: usize) {
        let mut offset = self.offset.get().min(len.saturating_sub(visible));
        if let Some(active) = active.filter(|&a| a < len) {
            if active < offset {
                offset = active;
            } else if active >= offset + visible {
                offset = active + 1 - visible;
            }
        }
        self.offset.set(offset);
    }

    /// Draw the list at the top of `area`, using only the height it needs.
    pub fn render(&self, frame: &mut Frame, area: Rect, body: ListBody<'_>, style: &TypeAheadStyle) {
        let lines = match body {
            ListBody::Loading | ListBody::Failed(_) => 1,
            ListBody::Rows { items, .. } => items.len().min(self.max_visible),
        };
        if lines == 0 {
            self.hide();
            return;
        }

        let height = (lines as u16).saturating_add(2).min(area.height);
        let list_area = Rect { height, ..area };
        if list_area.height < 3 || list_area.width < 4 {
            self.hide();
            return;
        }

        frame.render_widget(Clear, list_area);
        let block = Block::new().borders(Borders::ALL).border_style(style.placeholder);
        let inner = block.inner(list_area);
        frame.render_widget(block, list_area);
        self.area.set(list_area);

        let (items, highlight) = match body {
            ListBody::Loading => {
                self.rows.set((Rect::default(), 0));
                let text = truncate(LOADING_TEXT, inner.width as usize);
                frame.render_widget(Paragraph::new(Span::styled(text, style.loading)), inner);
                return;
            }
            ListBody::Failed(message) => {
                self.rows.set((Rect::default(), 0));
                let text = truncate(message, inner.width as usize);
                frame.render_widget(Paragraph::new(Span::styled(text, style.error)), inner);
                return;
            }
            ListBody::Rows { items, highlight } => (items, highlight),
        };

        let visible = lines.min(inner.height as usize);
        self.scroll_to(highlight.active(), items.len(), visible);
        let offset = self.offset.get();

        let mut drawn = 0;
        for (i, item) in items.iter().enumerate().skip(offset).take(visible) {
            let row_area = Rect {
                y: inner.y + drawn as u16,
                height: 1,
                ..inner
            };
            let selected = highlight.is_selected(i);
            let (prefix, row_style) = if selected {
                (SELECTED_PREFIX, style.selected_item)
            } else {
                (PREFIX, style.item)
            };
            let name = truncate(&item.name, (row_area.width as usize).saturating_sub(2));
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{prefix}{name}"), row_style)),
                row_area,
            );
            drawn += 1;
        }
        self.rows.set((Rect { height: drawn as u16, ..inner }, drawn));
    }
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
