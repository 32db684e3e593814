//! The picker a form embeds: single- or multi-select chosen by a flag.

use crate::item::{Item, Value};
use crate::multi_select::MultiSelect;
use crate::outside_click::ListenerRegistry;
use crate::single_select::SingleSelect;
use crate::style::TypeAheadStyle;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;
use ratatui::Frame;
use typeahead_core::{Command, Component};

/// Messages understood by both pickers.
#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    /// The parent moved focus onto the picker.
    Focus,
    /// The parent moved focus away. Commits like Enter while the list is open.
    Blur,
    /// The committed value changed. Sent to the parent, ignored by the picker.
    Changed(Value),
}

/// Shift+Tab arrives as `BackTab` on most terminals and as Shift+`Tab` on
/// some.
pub(crate) fn is_back_tab(key: &KeyEvent) -> bool {
    key.code == KeyCode::BackTab
        || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
}

#[derive(Debug)]
pub enum TypeAhead {
    Single(SingleSelect),
    Multi(MultiSelect),
}

impl TypeAhead {
    pub fn new(multiselect: bool) -> Self {
        if multiselect {
            TypeAhead::Multi(MultiSelect::new())
        } else {
            TypeAhead::Single(SingleSelect::new())
        }
    }

    pub fn with_style(self, style: TypeAheadStyle) -> Self {
        match self {
            TypeAhead::Single(p) => TypeAhead::Single(p.with_style(style)),
            TypeAhead::Multi(p) => TypeAhead::Multi(p.with_style(style)),
        }
    }

    pub fn with_max_visible(self, max: usize) -> Self {
        match self {
            TypeAhead::Single(p) => TypeAhead::Single(p.with_max_visible(max)),
            TypeAhead::Multi(p) => TypeAhead::Multi(p.with_max_visible(max)),
        }
    }

    pub fn with_registry(self, registry: ListenerRegistry) -> Self {
        match self {
            TypeAhead::Single(p) => TypeAhead::Single(p.with_registry(registry)),
            TypeAhead::Multi(p) => TypeAhead::Multi(p.with_registry(registry)),
        }
    }

    pub fn is_multiselect(&self) -> bool {
        matches!(self, TypeAhead::Multi(_))
    }

    pub fn set_items(&mut self, items: Vec<Item>) {
        match self {
            TypeAhead::Single(p) => p.set_items(items),
            TypeAhead::Multi(p) => p.set_items(items),
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        match self {
            TypeAhead::Single(p) => p.set_loading(loading),
            TypeAhead::Multi(p) => p.set_loading(loading),
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        match self {
            TypeAhead::Single(p) => p.set_error(error),
            TypeAhead::Multi(p) => p.set_error(error),
        }
    }

    /// The committed value: `Empty`/`One` for single mode, `Many` for multi.
    pub fn value(&self) -> Value {
        match self {
            TypeAhead::Single(p) => p.value(),
            TypeAhead::Multi(p) => p.value(),
        }
    }

    pub fn text(&self) -> String {
        match self {
            TypeAhead::Single(p) => p.text(),
            TypeAhead::Multi(p) => p.text(),
        }
    }

    pub fn is_open(&self) -> bool {
        match self {
            TypeAhead::Single(p) => p.is_open(),
            TypeAhead::Multi(p) => p.is_open(),
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        match self {
            TypeAhead::Single(p) => p.contains(column, row),
            TypeAhead::Multi(p) => p.contains(column, row),
        }
    }
}

impl Component for TypeAhead {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match self {
            TypeAhead::Single(p) => p.update(msg),
            TypeAhead::Multi(p) => p.update(msg),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        match self {
            TypeAhead::Single(p) => p.view(frame, area),
            TypeAhead::Multi(p) => p.view(frame, area),
        }
    }

    fn focused(&self) -> bool {
        match self {
            TypeAhead::Single(p) => p.focused(),
            TypeAhead::Multi(p) => p.focused(),
        }
    }
}
