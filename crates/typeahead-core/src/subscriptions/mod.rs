//! Built-in subscription sources.
//!
//! - **Terminal events** ([`terminal_events`]): keyboard, mouse, resize,
//!   focus and paste events from the terminal.
//! - **Delays** ([`After`]): a one-shot timer, aborted if the model stops
//!   declaring it before it fires.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
