//! Candidate items and the value a picker reports to its parent.

use std::fmt;

/// Something the user can pick: a stable id and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

impl Item {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The committed selection, as reported through `Changed` messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// Nothing chosen (single mode).
    #[default]
    Empty,
    /// The chosen item of a single-select.
    One(Item),
    /// The chosen items of a multi-select, in the order they were added.
    Many(Vec<Item>),
}

impl Value {
    /// A multi-select with nothing chosen counts as empty too.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::One(_) => false,
            Value::Many(items) => items.is_empty(),
        }
    }

    /// The chosen items as a slice, regardless of mode.
    pub fn items(&self) -> &[Item] {
        match self {
            Value::Empty => &[],
            Value::One(item) => std::slice::from_ref(item),
            Value::Many(items) => items,
        }
    }
}

impl From<Option<Item>> for Value {
    fn from(item: Option<Item>) -> Self {
        item.map_or(Value::Empty, Value::One)
    }
}
