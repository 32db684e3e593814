//! Single-select picker: one committed item, mirrored in the input text.

use crate::candidate_list::{CandidateList, ListBody};
use crate::field::{Field, FieldEdit};
use crate::filter::visible_items;
use crate::highlight::Highlight;
use crate::item::{Item, Value};
use crate::nav::{self, NavKey, SingleCommit, SingleStep};
use crate::outside_click::{ClickOutside, ListenerRegistry};
use crate::style::TypeAheadStyle;
use crate::typeahead::{is_back_tab, Message};
use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::Frame;
use std::cell::Cell;
use typeahead_core::{Command, Component};

/// A type-ahead that commits at most one item.
///
/// The committed item's name is written back into the input. Editing the
/// input down to nothing clears the committed item and reports
/// [`Value::Empty`].
///
/// ```ignore
/// let mut picker = SingleSelect::new();
/// picker.set_items(people);
/// let cmd = picker.update(Message::KeyPress(key));
/// ```
#[derive(Debug)]
pub struct SingleSelect {
    field: Field,
    items: Vec<Item>,
    loading: bool,
    error: Option<String>,
    current: Option<usize>,
    chosen: Option<Item>,
    open: bool,
    focused: bool,
    list: CandidateList,
    outside: ClickOutside,
    style: TypeAheadStyle,
    input_area: Cell<Rect>,
}

impl Default for SingleSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleSelect {
    pub fn new() -> Self {
        Self {
            field: Field::new().with_placeholder("Select Single Item"),
            items: Vec::new(),
            loading: false,
            error: None,
            current: None,
            chosen: None,
            open: false,
            focused: false,
            list: CandidateList::new(),
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

    /// Replace the source items. The highlight is dropped since its index
    /// referred to the old list.
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.current = None;
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

    pub fn chosen(&self) -> Option<&Item> {
        self.chosen.as_ref()
    }

    pub fn value(&self) -> Value {
        self.chosen.clone().into()
    }

    pub fn text(&self) -> String {
        self.field.text()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
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

    /// The visible candidates. The committed item stays in its own list.
    pub fn candidates(&self) -> Vec<&Item> {
        visible_items(&[], &self.items, &self.field.text())
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
            let step = nav::step_single(self.current, nav_key, len);
            return self.apply(step);
        }

        match self.field.apply_key(&key) {
            FieldEdit::Changed => self.text_changed(),
            FieldEdit::Moved | FieldEdit::Ignored => Command::none(),
        }
    }

    fn apply(&mut self, step: SingleStep) -> Command<Message> {
        self.current = step.current;
        self.open = step.open;
        match step.commit {
            Some(SingleCommit::Index(index)) => self.choose(index),
            Some(SingleCommit::Restore) => {
                if let Some(name) = self.chosen.as_ref().map(|item| item.name.clone()) {
                    self.field.set_text(&name);
                }
                Command::none()
            }
            None => Command::none(),
        }
    }

    /// Enter, blur and outside clicks all end the session the same way.
    fn commit(&mut self) -> Command<Message> {
        let step = nav::single_commit(self.current, self.rows().len());
        self.apply(step)
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        let Some(item) = self.rows().get(index).map(|&item| item.clone()) else {
            return Command::none();
        };
        tracing::debug!(id = item.id, name = %item.name, "single-select commit");
        self.field.set_text(&item.name);
        self.current = None;
        self.open = false;
        self.chosen = Some(item.clone());
        Command::message(Message::Changed(Value::One(item)))
    }

    fn text_changed(&mut self) -> Command<Message> {
        self.open = true;
        self.current = None;
        self.list.reset_scroll();
        if self.field.is_empty() {
            self.chosen = None;
            return Command::message(Message::Changed(Value::Empty));
        }
        Command::none()
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Command<Message> {
        if self.outside.handle(&event) {
            tracing::trace!("single-select outside click");
            return self.commit();
        }
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return Command::none();
        }
        if self.open {
            if let Some(index) = self.list.row_at(event.column, event.row) {
                return self.choose(index);
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
}

impl Component for SingleSelect {
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
        let input_area = Rect { height: 1, ..area };
        self.input_area.set(input_area);
        self.field
            .render(frame, input_area, &self.style, self.focused);

        let below = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        if self.open && below.height > 0 {
            if self.loading {
                self.list.render(frame, below, ListBody::Loading, &self.style);
            } else if let Some(message) = self.error.as_deref() {
                self.list
                    .render(frame, below, ListBody::Failed(message), &self.style);
            } else {
                let items = self.candidates();
                let highlight = Highlight::Single {
                    current: self.current,
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

        let list_area = self.list.area();
        let region = if list_area.is_empty() {
            input_area
        } else {
            input_area.union(list_area)
        };
        self.outside.set_region(region);
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
