//! Runtime for the **typeahead** pickers.
//!
//! A small Elm-style loop: state lives in a [`Model`], events arrive as
//! messages through [`Subscription`]s, [`Model::update`] handles one message
//! at a time and returns [`Command`]s for follow-up work, and
//! [`Model::view`] draws the state with [`ratatui`].
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model rendered into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Follow-up work: a message for the parent, a future, quit |
//! | [`Subscription`] | Long-lived event source, started and aborted by diffing |
//! | [`Program`] | Drives a [`Model`] on a real terminal |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit tests |

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{log_to_file, Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, After};

/// Run a model with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run a model with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
