//! Which candidate rows render as selected.

use crate::range::in_range;

/// The transient highlight of an open picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// Single mode: one current row, if any.
    Single { current: Option<usize> },
    /// Multi mode: an anchor (`head`) and, for a run, its far end (`tail`).
    Multi {
        head: Option<usize>,
        tail: Option<usize>,
    },
}

impl Highlight {
    pub fn is_selected(&self, index: usize) -> bool {
        match *self {
            Highlight::Single { current } => current == Some(index),
            Highlight::Multi { head: None, .. } => false,
            Highlight::Multi {
                head: Some(head),
                tail: None,
            } => index == head,
            Highlight::Multi {
                head: Some(head),
                tail: Some(tail),
            } => in_range(index, tail, head),
        }
    }

    /// The row the list should keep scrolled into view.
    pub fn active(&self) -> Option<usize> {
        match *self {
            Highlight::Single { current } => current,
            Highlight::Multi { head, tail } => tail.or(head),
        }
    }
}

/// Flat form of [`Highlight::is_selected`], for callers that carry both modes'
/// fields side by side.
pub fn is_selected(
    head: Option<usize>,
    index: usize,
    multiselect: bool,
    current: Option<usize>,
    tail: Option<usize>,
) -> bool {
    let highlight = if multiselect {
        Highlight::Multi { head, tail }
    } else {
        Highlight::Single { current }
    };
    highlight.is_selected(index)
}
