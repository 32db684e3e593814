use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`].
///
/// `Component` mirrors [`Model`](crate::Model) except that
/// [`view`](Component::view) receives the area to draw into, so a parent
/// decides where each child goes. The parent wraps the child's message type
/// in one of its own variants and lifts returned commands with
/// [`Command::map`]:
///
/// ```rust,ignore
/// Msg::Picker(m) => self.picker.update(m).map(Msg::Picker),
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// Notifications meant for the parent (for example a changed selection)
    /// are returned as [`Command::message`]s of this same type.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Implementations may draw overlays just outside it
    /// (a dropdown below an input line) but never read back from the frame.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// A hint for input routing; the default returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
