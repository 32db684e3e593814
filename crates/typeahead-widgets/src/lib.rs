//! Type-ahead pickers for **typeahead** programs.
//!
//! Both pickers implement [`typeahead_core::Component`]: feed them key,
//! mouse, focus and blur messages, embed their [`view`](typeahead_core::Component::view)
//! in a layout, and watch the commands they return for
//! [`Changed`](typeahead::Message::Changed).
//!
//! # Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`single_select`] | Picker committing one item, mirrored in the input |
//! | [`multi_select`] | Picker committing runs of items into chips |
//! | [`typeahead`] | Either picker, chosen by a `multiselect` flag |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`range`] | Inclusive, order-independent range test |
//! | [`highlight`] | Which rows render as selected |
//! | [`filter`] | Candidate filtering by chosen ids and free text |
//! | [`nav`] | Key dispatch tables (pure reducers) |
//! | [`outside_click`] | Scoped dismiss-on-outside-click listener |
//! | [`field`] / [`text_edit`] | The input line and its buffer |
//! | [`candidate_list`] | Dropdown rows, scroll and row hit-testing |
//! | [`chips`] | Removable chips for chosen items |

pub mod candidate_list;
pub mod chips;
pub mod field;
pub mod filter;
pub mod highlight;
pub mod item;
pub mod multi_select;
pub mod nav;
pub mod outside_click;
pub mod range;
pub mod single_select;
pub mod style;
pub mod text_edit;
pub mod typeahead;

pub use item::{Item, Value};
pub use multi_select::MultiSelect;
pub use single_select::SingleSelect;
pub use style::TypeAheadStyle;
pub use typeahead::{Message, TypeAhead};
