//! A small form: one picker fed by the simulated directory, and a Submit
//! button that validates and logs the chosen items.

use crate::source::{FetchConfig, FetchError, MockFetch};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use typeahead_core::{
    subscribe, terminal_events, Command, Component, Model, Subscription, TerminalEvent,
};
use typeahead_widgets::{Item, Message as PickerMsg, TypeAhead, Value};

/// Rows the dropdown may use before it scrolls.
const LIST_ROWS: usize = 6;
/// Chips, input, and the bordered list, inside the picker's own border.
const PICKER_HEIGHT: u16 = 2 + LIST_ROWS as u16 + 2 + 2;

/// Flags for [`PickerApp`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppConfig {
    pub multiselect: bool,
    pub fetch: FetchConfig,
}

#[derive(Debug)]
pub enum Msg {
    Terminal(TerminalEvent),
    Picker(PickerMsg),
    Fetched(Result<Vec<Item>, FetchError>),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Picker,
    Submit,
}

/// Outcome of the last submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Submitted(Vec<Item>),
    Invalid(&'static str),
}

pub struct PickerApp {
    picker: TypeAhead,
    value: Value,
    fetch: FetchConfig,
    fetching: bool,
    focus: Focus,
    status: Option<Status>,
    submit_area: Cell<Rect>,
}

impl PickerApp {
    /// The value last reported by the picker.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn picker(&self) -> &TypeAhead {
        &self.picker
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    fn to_picker(&mut self, msg: PickerMsg) -> Command<Msg> {
        self.picker.update(msg).map(Msg::Picker)
    }

    fn focus_picker(&mut self) -> Command<Msg> {
        if self.focus == Focus::Picker {
            return Command::none();
        }
        self.focus = Focus::Picker;
        self.to_picker(PickerMsg::Focus)
    }

    fn focus_submit(&mut self) -> Command<Msg> {
        if self.focus == Focus::Submit {
            return Command::none();
        }
        self.focus = Focus::Submit;
        self.to_picker(PickerMsg::Blur)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Msg> {
        if key.kind == KeyEventKind::Release {
            return Command::none();
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Command::quit();
        }

        match (self.focus, key.code) {
            (Focus::Picker, KeyCode::Tab | KeyCode::BackTab) => {
                // Let the picker see Shift+Tab first: it closes the list.
                let closed = self.to_picker(PickerMsg::KeyPress(key));
                Command::batch([closed, self.focus_submit()])
            }
            (Focus::Picker, _) => self.to_picker(PickerMsg::KeyPress(key)),
            (Focus::Submit, KeyCode::Tab | KeyCode::BackTab) => self.focus_picker(),
            (Focus::Submit, KeyCode::Enter | KeyCode::Char(' ')) => Command::message(Msg::Submit),
            (Focus::Submit, KeyCode::Esc | KeyCode::Char('q')) => Command::quit(),
            (Focus::Submit, _) => Command::none(),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Command<Msg> {
        // Always forwarded: the picker needs presses outside itself too.
        let picker = self.to_picker(PickerMsg::Mouse(event));
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return picker;
        }
        let pos = Position::new(event.column, event.row);
        if self.picker.contains(event.column, event.row) {
            Command::batch([picker, self.focus_picker()])
        } else if self.submit_area.get().contains(pos) {
            let blur = self.focus_submit();
            Command::batch([picker, blur, Command::message(Msg::Submit)])
        } else {
            picker
        }
    }

    fn submit(&mut self) {
        let status = if self.picker.is_multiselect() {
            match self.value.items() {
                [] => Status::Invalid("Choose at least one item"),
                items => Status::Submitted(items.to_vec()),
            }
        } else if self.picker.text().is_empty() {
            // Single mode only checks that the input is filled in.
            Status::Invalid("Please fill in this field")
        } else {
            Status::Submitted(self.value.items().to_vec())
        };
        match &status {
            Status::Submitted(items) => {
                let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
                tracing::info!(?names, "Chosen items");
            }
            Status::Invalid(reason) => tracing::debug!(reason, "submit rejected"),
        }
        self.status = Some(status);
    }

    fn border(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }
}

impl Model for PickerApp {
    type Message = Msg;
    type Flags = AppConfig;

    fn init(config: AppConfig) -> (Self, Command<Msg>) {
        let mut picker = TypeAhead::new(config.multiselect).with_max_visible(LIST_ROWS);
        picker.set_loading(true);
        let mut app = PickerApp {
            value: picker.value(),
            picker,
            fetch: config.fetch,
            fetching: true,
            focus: Focus::Picker,
            status: None,
            submit_area: Cell::new(Rect::default()),
        };
        let cmd = app.to_picker(PickerMsg::Focus);
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Terminal(TerminalEvent::Key(key)) => self.handle_key(key),
            Msg::Terminal(TerminalEvent::Mouse(event)) => self.handle_mouse(event),
            Msg::Terminal(TerminalEvent::Paste(text)) if self.focus == Focus::Picker => {
                self.to_picker(PickerMsg::Paste(text))
            }
            Msg::Terminal(_) => Command::none(),
            Msg::Picker(PickerMsg::Changed(value)) => {
                tracing::debug!(?value, "picker value changed");
                self.value = value;
                Command::none()
            }
            Msg::Picker(msg) => self.to_picker(msg),
            Msg::Fetched(result) => {
                self.fetching = false;
                self.picker.set_loading(false);
                match result {
                    Ok(items) => self.picker.set_items(items),
                    Err(err) => self.picker.set_error(Some(err.to_string())),
                }
                Command::none()
            }
            Msg::Submit => {
                self.submit();
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [help, picker_area, button_row, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(PICKER_HEIGHT),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" switch focus  "),
                Span::styled("shift+↑/↓", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" extend  "),
                Span::styled("ctrl+c", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" quit"),
            ]))
            .style(Style::default().fg(Color::DarkGray)),
            help,
        );

        let title = if self.picker.is_multiselect() {
            " People "
        } else {
            " Person "
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.border(Focus::Picker));
        let inner = block.inner(picker_area);
        frame.render_widget(block, picker_area);
        self.picker.view(frame, inner);

        let [button, _] =
            Layout::horizontal([Constraint::Length(12), Constraint::Min(0)]).areas(button_row);
        self.submit_area.set(button);
        frame.render_widget(
            Paragraph::new("Submit")
                .centered()
                .block(Block::bordered().border_style(self.border(Focus::Submit))),
            button,
        );

        let status = match &self.status {
            Some(Status::Submitted(items)) => {
                let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
                Span::styled(
                    format!("Chosen items: {}", names.join(", ")),
                    Style::default().fg(Color::Green),
                )
            }
            Some(Status::Invalid(reason)) => {
                Span::styled(*reason, Style::default().fg(Color::Red))
            }
            None => Span::raw(""),
        };
        frame.render_widget(Paragraph::new(status), status_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|event| match event {
            TerminalEvent::Key(_) | TerminalEvent::Mouse(_) | TerminalEvent::Paste(_) => {
                Some(Msg::Terminal(event))
            }
            _ => None,
        })];
        if self.fetching {
            subs.push(subscribe(MockFetch::new(self.fetch)).map(Msg::Fetched));
        }
        subs
    }
}
