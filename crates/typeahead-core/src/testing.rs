use crate::command::{Command, CommandInner};
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless harness that drives a [`Model`] without a terminal.
///
/// Immediate messages returned from `init` or `update` are queued and can be
/// flushed with [`drain_messages`](TestProgram::drain_messages); quit
/// requests are recorded.
///
/// ```rust,ignore
/// let mut prog = TestProgram::<Form>::new(config);
/// prog.send(Msg::Key(key(KeyCode::Down)));
/// prog.drain_messages();
/// assert!(prog.render_string(40, 8).contains("Ada"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            quit_requested: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Run a single update with `msg`, queueing any immediate follow-ups.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Feed queued messages back into `update` until none are left.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                let cmd = self.model.update(msg);
                self.collect(cmd);
            }
        }
    }

    /// Send a message and drain everything it triggers.
    pub fn send_and_drain(&mut self, msg: M::Message) {
        self.send(msg);
        self.drain_messages();
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Whether any command so far asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Render the model to a [`Buffer`] of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the model and return its rows joined by newlines.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.pending_messages.push(msg),
            CommandInner::Quit => self.quit_requested = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
        }
    }
}

/// Flatten a buffer into text, one line per row.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    struct Counter {
        count: i64,
    }

    #[derive(Debug)]
    enum CounterMsg {
        Increment,
        IncrementTwice,
        Stop,
    }

    impl Model for Counter {
        type Message = CounterMsg;
        type Flags = i64;

        fn init(initial: i64) -> (Self, Command<CounterMsg>) {
            (Counter { count: initial }, Command::none())
        }

        fn update(&mut self, msg: CounterMsg) -> Command<CounterMsg> {
            match msg {
                CounterMsg::Increment => {
                    self.count += 1;
                    Command::none()
                }
                CounterMsg::IncrementTwice => Command::batch([
                    Command::message(CounterMsg::Increment),
                    Command::message(CounterMsg::Increment),
                ]),
                CounterMsg::Stop => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            let text = format!("Count: {}", self.count);
            frame.render_widget(Paragraph::new(text), frame.area());
        }
    }

    #[test]
    fn init_uses_flags() {
        let prog = TestProgram::<Counter>::new(42);
        assert_eq!(prog.model().count, 42);
    }

    #[test]
    fn send_updates_immediately() {
        let mut prog = TestProgram::<Counter>::new(0);
        prog.send(CounterMsg::Increment);
        assert_eq!(prog.model().count, 1);
    }

    #[test]
    fn queued_messages_wait_for_drain() {
        let mut prog = TestProgram::<Counter>::new(0);
        prog.send(CounterMsg::IncrementTwice);
        assert_eq!(prog.model().count, 0);
        prog.drain_messages();
        assert_eq!(prog.model().count, 2);
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Counter>::new(0);
        assert!(!prog.quit_requested());
        prog.send(CounterMsg::Stop);
        assert!(prog.quit_requested());
    }

    #[test]
    fn render_string_shows_view() {
        let mut prog = TestProgram::<Counter>::new(0);
        prog.send(CounterMsg::Increment);
        let content = prog.render_string(20, 2);
        assert!(content.starts_with("Count: 1"));
        assert_eq!(content.lines().count(), 2);
    }
}
