use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait.
///
/// The runtime drives an **init -> view -> update** cycle:
///
/// 1. [`init`](Model::init) builds the initial state and may return a
///    [`Command`] for early work.
/// 2. [`view`](Model::view) renders the state to a [`ratatui::Frame`].
/// 3. Events arrive as messages through [`Subscription`]s.
/// 4. [`update`](Model::update) handles each message and may return another
///    [`Command`].
///
/// ```rust,ignore
/// impl Model for Form {
///     type Message = Msg;
///     type Flags = FormConfig;
///
///     fn init(config: FormConfig) -> (Self, Command<Msg>) {
///         (Form::new(config), Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Picker(m) => self.picker.update(m).map(Msg::Picker),
///             Msg::Quit => Command::quit(),
///         }
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.picker.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    ///
    /// After `update` returns, the runtime re-renders and reconciles
    /// [`subscriptions`](Model::subscriptions).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Must not mutate anything observable.
    fn view(&self, frame: &mut Frame);

    /// Declare the subscriptions that should be active for the current state.
    ///
    /// Called after every update. The runtime starts subscriptions whose id
    /// is new and aborts those whose id disappeared, so a subscription lives
    /// exactly as long as the model keeps declaring it.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
