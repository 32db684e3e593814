//! **typeahead**: single- and multi-select type-ahead pickers for the
//! terminal.
//!
//! The umbrella crate re-exports the runtime from [`typeahead_core`] at the
//! root and the pickers under [`widgets`]. [`app`] and [`source`] hold the
//! demo form behind the `typeahead` binary: a picker fed by a simulated,
//! delayed people directory and a Submit button.
//!
//! ```ignore
//! use typeahead::app::{AppConfig, PickerApp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), typeahead::ProgramError> {
//!     let form = typeahead::run::<PickerApp>(AppConfig::default()).await?;
//!     println!("{:?}", form.value());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod source;

pub use typeahead_core::*;
pub mod widgets {
    pub use typeahead_widgets::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;
