//! Multi-select picker: runs of candidates are committed into chips.

use crate::candidate_list::{CandidateList, ListBody};
use crate::chips::Chips;
use crate::field::{Field, FieldEdit};
use crate::filter::visible_items;
use crate::highlight::Highlight;
use crate::item::{Item, Value};
use crate::nav::{self, shift_held, MultiCursor, MultiStep, NavKey, Run};
use crate::outside_click::{ClickOutside, ListenerRegistry};
use crate::style::TypeAheadStyle;
use crate::typeahead::{is_back_tab, Message};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::Frame;
use std::cell::Cell;
use typeahead_core::{Command, Component};

/// A type-ahead that accumulates chosen items.
///
/// Candidates are highlighted as a point (`head`) or a run (`head` to
/// `tail`, extended with Shift+arrows or Shift+click). Enter, blur or a click
/// outside the picker appends the highlighted candidates to the chosen items
/// and reports the whole selection as [`Value::Many`]. Chosen items are
/// drawn as chips above the input and leave the candidate list. A chip is
/// removed by clicking it, or with Backspace in an empty input, which drops
/// the most recent one.
#[derive(Debug)]
pub struct MultiSelect {
    field: Field,
    items: Vec<Item>,
    loading: bool,
    error: Option<String>,
    cursor: MultiCursor,
    chosen: Vec<Item>,
    open: bool,
    focused: bool,
    list: CandidateList,
    chips: Chips,
    outside: ClickOutside,
    style: TypeAheadStyle,
    input_area: Cell<Rect>,
}

impl Default for MultiSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiSelect {
    pub fn new() -> Self {
        Self {
            field: Field::new().with_placeholder("Multi Select"),
            items: Vec::new(),
            loading: false,
            error: None,
            cursor: MultiCursor::default(),
            chosen: Vec::new(),
            open: false,
            focused: false,
            list: CandidateList::new(),
            chips: Chips::new(),
            outside: ClickOutside::new(),
            style: TypeAheadStyle::default(),
            input_area: Cell::new(Rect::default()),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.field = self.field.with_placeholder(placeholder);
        self
    }

    pub fn with_max_visible(mut self, max: usize) -> Self {
        self.list = self.list.with_max_visible(max);
        self
    }

    pub fn with_style(mut self, style: TypeAheadStyle) -> Self {
        self.style = style;
        self
    }

    /// Register the outside-click listener with a shared registry.
    pub fn with_registry(mut self, registry: ListenerRegistry) -> Self {
        self.outside = self.outside.with_registry(registry);
        self
    }

    /// Replace the source items and drop the highlight.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.cursor = MultiCursor::default();
        self.list.reset_scroll();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error.filter(|e| !e.is_empty());
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn chosen(&self) -> &[Item] {
        &self.chosen
    }

    pub fn value(&self) -> Value {
        Value::Many(self.chosen.clone())
    }

    pub fn text(&self) -> String {
        self.field.text()
    }

    pub fn head(&self) -> Option<usize> {
        self.cursor.head
    }

    pub fn tail(&self) -> Option<usize> {
        self.cursor.tail
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the outside-click listener is attached.
    pub fn is_listening(&self) -> bool {
        self.outside.is_active()
    }

    /// Source items not yet chosen whose names match the input.
    pub fn candidates(&self) -> Vec<&Item> {
        visible_items(&self.chosen, &self.items, &self.field.text())
    }

    /// Candidates the user can act on. None while the list shows the
    /// loading or error message in their place.
    fn rows(&self) -> Vec<&Item> {
        if self.loading || self.error.is_some() {
            return Vec::new();
        }
        self.candidates()
    }

    /// Whether a position falls on the picker as last drawn.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.outside.region().contains(Position::new(column, row))
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if is_back_tab(&key) {
            self.open = false;
            return Command::none();
        }

        if let Some(nav_key) = NavKey::from_key(&key) {
            if !self.open {
                if nav_key.is_arrow() {
                    self.open = true;
                }
                return Command::none();
            }
            let len = self.rows().len();
            let step = nav::step_multi(self.cursor, nav_key, shift_held(&key), len);
            return self.apply(step);
        }

        match self.field.apply_key(&key) {
            FieldEdit::Changed => self.text_changed(),
            FieldEdit::Ignored if key.code == KeyCode::Backspace => match self.chosen.last() {
                Some(last) => self.remove(last.id),
                None => Command::none(),
            },
            FieldEdit::Moved | FieldEdit::Ignored => Command::none(),
        }
    }

    fn apply(&mut self, step: MultiStep) -> Command<Message> {
        let added = step.commit.map(|run| self.collect(run)).unwrap_or_default();
        self.cursor = step.cursor;
        self.open = step.open;
        self.append(added)
    }

    /// Enter, blur and outside clicks all end the session the same way.
    fn commit(&mut self) -> Command<Message> {
        let step = nav::multi_commit(self.cursor, false, self.rows().len());
        self.apply(step)
    }

    /// Candidates covered by `run`, in candidate order.
    fn collect(&self, run: Run) -> Vec<Item> {
        self.rows()
            .into_iter()
            .enumerate()
            .filter(|&(index, _)| run.contains(index))
            .map(|(_, item)| item.clone())
            .collect()
    }

    fn append(&mut self, added: Vec<Item>) -> Command<Message> {
        let before = self.chosen.len();
        for item in added {
            if !self.chosen.iter().any(|chosen| chosen.id == item.id) {
                self.chosen.push(item);
            }
        }
        let count = self.chosen.len() - before;
        if count == 0 {
            return Command::none();
        }
        tracing::debug!(added = count, total = self.chosen.len(), "multi-select commit");
        Command::message(Message::Changed(self.value()))
    }

    fn remove(&mut self, id: u64) -> Command<Message> {
        let before = self.chosen.len();
        self.chosen.retain(|item| item.id != id);
        if self.chosen.len() == before {
            return Command::none();
        }
        tracing::debug!(id, total = self.chosen.len(), "multi-select chip removed");
        // The removed item is a candidate again, so indices have shifted.
        self.cursor = MultiCursor::default();
        Command::message(Message::Changed(self.value()))
    }

    fn text_changed(&mut self) -> Command<Message> {
        self.open = true;
        self.cursor = MultiCursor::default();
        self.list.reset_scroll();
        Command::none()
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Command<Message> {
        if self.outside.handle(&event) {
            tracing::trace!("multi-select outside click");
            return self.commit();
        }
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return Command::none();
        }
        if let Some(id) = self.chips.hit(event.column, event.row) {
            return self.remove(id);
        }
        if self.open {
            if let Some(index) = self.list.row_at(event.column, event.row) {
                self.click_row(index, event.modifiers.contains(KeyModifiers::SHIFT));
                return Command::none();
            }
        }
        if self.focused
            && self
                .input_area
                .get()
                .contains(Position::new(event.column, event.row))
        {
            self.open = true;
        }
        Command::none()
    }

    fn click_row(&mut self, index: usize, shift: bool) {
        self.cursor = match (shift, self.cursor.head) {
            (true, None) => MultiCursor {
                head: Some(index),
                tail: None,
            },
            (true, Some(head)) => MultiCursor {
                head: Some(head),
                tail: Some(index),
            },
            (false, _) => MultiCursor {
                head: Some(index),
                tail: None,
            },
        };
    }
}

impl Component for MultiSelect {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let cmd = match msg {
            Message::KeyPress(key) if key.kind == KeyEventKind::Release => Command::none(),
            Message::KeyPress(key) => self.handle_key(key),
            Message::Paste(text) => {
                if self.field.paste(&text) {
                    self.text_changed()
                } else {
                    Command::none()
                }
            }
            Message::Mouse(event) => self.handle_mouse(event),
            Message::Focus => {
                self.focused = true;
                self.open = true;
                Command::none()
            }
            Message::Blur => {
                self.focused = false;
                if self.open {
                    self.commit()
                } else {
                    Command::none()
                }
            }
            Message::Changed(_) => Command::none(),
        };
        self.outside.set_active(self.open);
        cmd
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let mut top = area;
        if !self.chosen.is_empty() && area.height > 1 {
            self.chips
                .render(frame, Rect { height: 1, ..area }, &self.chosen, &self.style);
            top.y += 1;
            top.height -= 1;
        } else {
            self.chips.render(frame, Rect::default(), &[], &self.style);
        }

        let input_area = Rect { height: 1, ..top };
        self.input_area.set(input_area);
        self.field
            .render(frame, input_area, &self.style, self.focused);

        let below = Rect {
            y: top.y + 1,
            height: top.height - 1,
            ..top
        };
        if self.open && below.height > 0 {
            if self.loading {
                self.list.render(frame, below, ListBody::Loading, &self.style);
            } else if let Some(message) = self.error.as_deref() {
                self.list
                    .render(frame, below, ListBody::Failed(message), &self.style);
            } else {
                let items = self.candidates();
                let highlight = Highlight::Multi {
                    head: self.cursor.head,
                    tail: self.cursor.tail,
                };
                self.list.render(
                    frame,
                    below,
                    ListBody::Rows {
                        items: &items,
                        highlight,
                    },
                    &self.style,
                );
            }
        } else {
            self.list.hide();
        }

        let mut region = Rect { height: top.y - area.y + 1, ..area };
        let list_area = self.list.area();
        if !list_area.is_empty() {
            region = region.union(list_area);
        }
        self.outside.set_region(region);
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use typeahead_core::testing::buffer_to_string;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::SHIFT,
            ..key(code)
        }
    }

    fn click(column: u16, row: u16, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers,
        }
    }

    fn people() -> Vec<Item> {
        vec![
            Item::new(1, "Ada Lovelace"),
            Item::new(2, "Alan Turing"),
            Item::new(3, "Grace Hopper"),
            Item::new(4, "Barbara Liskov"),
            Item::new(5, "Edsger Dijkstra"),
        ]
    }

    fn picker() -> MultiSelect {
        let mut picker = MultiSelect::new();
        picker.set_items(people());
        picker.update(Message::Focus);
        picker
    }

    fn press(picker: &mut MultiSelect, event: KeyEvent) -> Option<Message> {
        picker.update(Message::KeyPress(event)).into_message()
    }

    fn ids(items: &[Item]) -> Vec<u64> {
        items.iter().map(|item| item.id).collect()
    }

    fn draw(picker: &MultiSelect, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| picker.view(frame, frame.area()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn starts_closed_with_nothing_chosen() {
        let picker = MultiSelect::new();
        assert!(!picker.is_open());
        assert!(picker.chosen().is_empty());
        assert!(picker.value().is_empty());
    }

    #[test]
    fn commit_range_appends_inclusive_run() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, key(KeyCode::Down));
        assert_eq!(picker.head(), Some(1));
        press(&mut picker, shift(KeyCode::Down));
        press(&mut picker, shift(KeyCode::Down));
        assert_eq!(picker.tail(), Some(3));

        let msg = press(&mut picker, key(KeyCode::Enter));
        assert_eq!(ids(picker.chosen()), vec![2, 3, 4]);
        match msg {
            Some(Message::Changed(Value::Many(items))) => assert_eq!(ids(&items), vec![2, 3, 4]),
            other => panic!("expected Changed, got {other:?}"),
        }
        assert_eq!(picker.head(), None);
        assert_eq!(picker.tail(), None);
        assert!(!picker.is_open());
    }

    #[test]
    fn reversed_run_commits_in_candidate_order() {
        let mut picker = picker();
        press(&mut picker, shift(KeyCode::Up));
        assert_eq!(picker.head(), Some(4));
        press(&mut picker, shift(KeyCode::Up));
        press(&mut picker, shift(KeyCode::Up));
        press(&mut picker, key(KeyCode::Enter));
        assert_eq!(ids(picker.chosen()), vec![3, 4, 5]);
    }

    #[test]
    fn chosen_items_leave_the_candidates() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, key(KeyCode::Enter));
        assert_eq!(ids(picker.chosen()), vec![1]);

        picker.update(Message::Focus);
        let names: Vec<u64> = picker.candidates().iter().map(|i| i.id).collect();
        assert_eq!(names, vec![2, 3, 4, 5]);

        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, key(KeyCode::Enter));
        assert_eq!(ids(picker.chosen()), vec![1, 2]);
    }

    #[test]
    fn escape_resets_without_commit() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, shift(KeyCode::Down));
        assert!(press(&mut picker, key(KeyCode::Esc)).is_none());
        assert!(picker.chosen().is_empty());
        assert_eq!(picker.head(), None);
        assert!(!picker.is_open());
        assert!(!picker.is_listening());
    }

    #[test]
    fn enter_with_nothing_highlighted_only_closes() {
        let mut picker = picker();
        assert!(press(&mut picker, key(KeyCode::Enter)).is_none());
        assert!(!picker.is_open());
        assert!(picker.chosen().is_empty());
    }

    #[test]
    fn typing_resets_the_run() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, key(KeyCode::Char('g')));
        assert_eq!(picker.head(), None);
        assert_eq!(picker.text(), "g");
        let names: Vec<&str> = picker.candidates().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Alan Turing", "Grace Hopper", "Edsger Dijkstra"]);
    }

    #[test]
    fn blur_commits_point() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Up));
        press(&mut picker, key(KeyCode::Up));
        assert_eq!(picker.head(), Some(4));
        let msg = picker.update(Message::Blur).into_message();
        assert!(matches!(msg, Some(Message::Changed(_))));
        assert_eq!(ids(picker.chosen()), vec![5]);
        assert!(!picker.focused());
    }

    #[test]
    fn row_clicks_set_head_and_tail() {
        let mut picker = picker();
        draw(&picker, 30, 10);
        // input on row 0, border on row 1, rows from row 2
        picker.update(Message::Mouse(click(3, 3, KeyModifiers::NONE)));
        assert_eq!((picker.head(), picker.tail()), (Some(1), None));
        picker.update(Message::Mouse(click(3, 5, KeyModifiers::SHIFT)));
        assert_eq!((picker.head(), picker.tail()), (Some(1), Some(3)));
        picker.update(Message::Mouse(click(3, 2, KeyModifiers::NONE)));
        assert_eq!((picker.head(), picker.tail()), (Some(0), None));
    }

    #[test]
    fn shift_click_without_head_sets_head() {
        let mut picker = picker();
        draw(&picker, 30, 10);
        picker.update(Message::Mouse(click(3, 4, KeyModifiers::SHIFT)));
        assert_eq!((picker.head(), picker.tail()), (Some(2), None));
    }

    #[test]
    fn outside_click_commits_run() {
        let mut picker = picker();
        draw(&picker, 30, 12);
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, shift(KeyCode::Down));
        let msg = picker.update(Message::Mouse(click(2, 11, KeyModifiers::NONE)));
        assert!(matches!(msg.into_message(), Some(Message::Changed(_))));
        assert_eq!(ids(picker.chosen()), vec![1, 2]);
        assert!(!picker.is_open());
        assert!(!picker.is_listening());
    }

    #[test]
    fn chip_click_removes_and_notifies() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, shift(KeyCode::Down));
        press(&mut picker, key(KeyCode::Enter));
        assert_eq!(ids(picker.chosen()), vec![1, 2]);

        let screen = draw(&picker, 40, 10);
        assert!(screen.starts_with(" Ada Lovelace × "));
        let msg = picker.update(Message::Mouse(click(2, 0, KeyModifiers::NONE)));
        match msg.into_message() {
            Some(Message::Changed(Value::Many(items))) => assert_eq!(ids(&items), vec![2]),
            other => panic!("expected Changed, got {other:?}"),
        }
        assert_eq!(ids(picker.chosen()), vec![2]);
    }

    #[test]
    fn renders_chips_input_and_run() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, key(KeyCode::Enter));
        picker.update(Message::Focus);
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, shift(KeyCode::Down));

        let screen = draw(&picker, 40, 10);
        let lines: Vec<&str> = screen.lines().collect();
        assert!(lines[0].contains("Ada Lovelace ×"));
        assert!(lines[1].contains("Multi Select"));
        assert!(lines[3].contains("▸ Alan Turing"));
        assert!(lines[4].contains("▸ Grace Hopper"));
        assert!(lines[5].contains("  Barbara Liskov"));
    }

    #[test]
    fn loading_hides_rows() {
        let mut picker = picker();
        picker.set_loading(true);
        let screen = draw(&picker, 30, 8);
        assert!(screen.contains("Loading…"));
        assert!(!screen.contains("Ada"));
    }

    #[test]
    fn loading_rows_cannot_be_committed() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Down));
        assert_eq!(picker.head(), Some(0));
        picker.set_loading(true);
        assert!(picker.update(Message::Blur).is_none());
        assert!(picker.chosen().is_empty());
    }

    #[test]
    fn error_rows_cannot_be_highlighted_or_committed() {
        let mut picker = picker();
        picker.set_error(Some("Something went wrong!".into()));
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, shift(KeyCode::Down));
        assert_eq!(picker.head(), None);
        assert!(press(&mut picker, key(KeyCode::Enter)).is_none());
        assert!(picker.chosen().is_empty());
    }

    #[test]
    fn backspace_on_empty_input_drops_last_chip() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Down));
        press(&mut picker, shift(KeyCode::Down));
        press(&mut picker, key(KeyCode::Enter));
        assert_eq!(ids(picker.chosen()), vec![1, 2]);

        picker.update(Message::Focus);
        let msg = press(&mut picker, key(KeyCode::Backspace));
        assert_eq!(ids(picker.chosen()), vec![1]);
        match msg {
            Some(Message::Changed(Value::Many(items))) => assert_eq!(ids(&items), vec![1]),
            other => panic!("expected Changed, got {other:?}"),
        }

        press(&mut picker, key(KeyCode::Char('x')));
        assert!(press(&mut picker, key(KeyCode::Backspace)).is_none());
        assert_eq!(ids(picker.chosen()), vec![1]);
    }

    #[test]
    fn overflowed_chips_are_reachable_with_backspace() {
        let mut picker = picker();
        for _ in 0..5 {
            picker.update(Message::Focus);
            press(&mut picker, key(KeyCode::Down));
            press(&mut picker, key(KeyCode::Enter));
        }
        assert_eq!(picker.chosen().len(), 5);
        let screen = draw(&picker, 30, 8);
        assert!(screen.contains('+'));

        for _ in 0..5 {
            press(&mut picker, key(KeyCode::Backspace));
        }
        assert!(picker.chosen().is_empty());
    }

    #[test]
    fn closed_list_opens_on_arrow() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::Esc));
        press(&mut picker, key(KeyCode::Up));
        assert!(picker.is_open());
        assert_eq!(picker.head(), None);
    }

    #[test]
    fn back_tab_closes() {
        let mut picker = picker();
        press(&mut picker, key(KeyCode::BackTab));
        assert!(!picker.is_open());
    }
}
