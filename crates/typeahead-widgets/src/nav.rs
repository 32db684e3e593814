//! Key dispatch tables for the pickers.
//!
//! Each picker maps the four navigation keys to a pure reducer: the reducer
//! takes the cursor as a value and returns the next cursor plus, for Enter,
//! what should be committed. The controllers apply the result; nothing in
//! here touches items or emits messages.
//!
//! The reducers describe an *open* list. Opening a closed list is the
//! controller's job.

use crate::range::in_range;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The keys a picker list reacts to. Everything else is text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl NavKey {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Down => Some(NavKey::ArrowDown),
            KeyCode::Up => Some(NavKey::ArrowUp),
            KeyCode::Enter => Some(NavKey::Enter),
            KeyCode::Esc => Some(NavKey::Escape),
            _ => None,
        }
    }

    pub fn is_arrow(self) -> bool {
        matches!(self, NavKey::ArrowDown | NavKey::ArrowUp)
    }
}

/// Whether Shift was held, the only modifier the tables care about.
pub fn shift_held(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::SHIFT)
}

/// Cursor of an open multi-select: an anchor and the far end of a run.
///
/// `tail` is only meaningful while `head` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiCursor {
    pub head: Option<usize>,
    pub tail: Option<usize>,
}

/// A committed run of candidate rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub head: usize,
    pub tail: Option<usize>,
}

impl Run {
    pub fn contains(&self, index: usize) -> bool {
        match self.tail {
            Some(tail) => in_range(index, tail, self.head),
            None => index == self.head,
        }
    }
}

/// Result of feeding one key to the multi-select table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiStep {
    pub cursor: MultiCursor,
    /// `false` once the list should close.
    pub open: bool,
    pub commit: Option<Run>,
}

impl MultiStep {
    fn stay(cursor: MultiCursor) -> Self {
        Self {
            cursor,
            open: true,
            commit: None,
        }
    }
}

/// Reducer signature shared by every multi-select key handler.
pub type MultiHandler = fn(MultiCursor, bool, usize) -> MultiStep;

/// The multi-select dispatch table.
pub fn multi_handler(key: NavKey) -> MultiHandler {
    match key {
        NavKey::ArrowDown => multi_down,
        NavKey::ArrowUp => multi_up,
        NavKey::Enter => multi_commit,
        NavKey::Escape => multi_escape,
    }
}

/// Feed `key` (with `shift` state) to the multi-select table for a list of
/// `len` candidates.
pub fn step_multi(cursor: MultiCursor, key: NavKey, shift: bool, len: usize) -> MultiStep {
    multi_handler(key)(cursor, shift, len)
}

fn multi_down(cursor: MultiCursor, shift: bool, len: usize) -> MultiStep {
    let Some(last) = len.checked_sub(1) else {
        return MultiStep::stay(cursor);
    };
    let next = match (cursor.head, cursor.tail) {
        (None, _) => MultiCursor {
            head: Some(0),
            tail: None,
        },
        (Some(head), tail) if shift => {
            let tail = match tail {
                None => (head + 1).min(last),
                Some(t) if t >= last => last,
                Some(t) => t + 1,
            };
            MultiCursor {
                head: Some(head),
                tail: Some(tail),
            }
        }
        (Some(head), _) => MultiCursor {
            head: Some(if head >= last { 0 } else { head + 1 }),
            tail: None,
        },
    };
    MultiStep::stay(next)
}

fn multi_up(cursor: MultiCursor, shift: bool, len: usize) -> MultiStep {
    let Some(last) = len.checked_sub(1) else {
        return MultiStep::stay(cursor);
    };
    let next = match (cursor.head, cursor.tail) {
        (None, _) if shift => MultiCursor {
            head: Some(last),
            tail: None,
        },
        (None, _) => MultiCursor {
            head: Some(0),
            tail: None,
        },
        (Some(head), tail) if shift => {
            let tail = match tail {
                None => head.saturating_sub(1).min(last),
                Some(0) => 0,
                Some(t) => (t - 1).min(last),
            };
            MultiCursor {
                head: Some(head),
                tail: Some(tail),
            }
        }
        (Some(0), _) => MultiCursor {
            head: Some(last),
            tail: None,
        },
        (Some(head), _) => MultiCursor {
            head: Some((head - 1).min(last)),
            tail: None,
        },
    };
    MultiStep::stay(next)
}

/// Enter, blur and outside clicks all commit the same way.
pub fn multi_commit(cursor: MultiCursor, _shift: bool, _len: usize) -> MultiStep {
    MultiStep {
        cursor: MultiCursor::default(),
        open: false,
        commit: cursor.head.map(|head| Run {
            head,
            tail: cursor.tail,
        }),
    }
}

fn multi_escape(_cursor: MultiCursor, _shift: bool, _len: usize) -> MultiStep {
    MultiStep {
        cursor: MultiCursor::default(),
        open: false,
        commit: None,
    }
}

/// What a single-select commit does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleCommit {
    /// Choose the candidate at this row.
    Index(usize),
    /// Nothing highlighted: put the previously chosen name back in the input.
    Restore,
}

/// Result of feeding one key to the single-select table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleStep {
    pub current: Option<usize>,
    pub open: bool,
    pub commit: Option<SingleCommit>,
}

impl SingleStep {
    fn stay(current: Option<usize>) -> Self {
        Self {
            current,
            open: true,
            commit: None,
        }
    }
}

/// Reducer signature shared by every single-select key handler.
pub type SingleHandler = fn(Option<usize>, usize) -> SingleStep;

/// The single-select dispatch table.
pub fn single_handler(key: NavKey) -> SingleHandler {
    match key {
        NavKey::ArrowDown => single_down,
        NavKey::ArrowUp => single_up,
        NavKey::Enter => single_commit,
        NavKey::Escape => single_escape,
    }
}

/// Feed `key` to the single-select table for a list of `len` candidates.
pub fn step_single(current: Option<usize>, key: NavKey, len: usize) -> SingleStep {
    single_handler(key)(current, len)
}

fn single_down(current: Option<usize>, len: usize) -> SingleStep {
    let Some(last) = len.checked_sub(1) else {
        return SingleStep::stay(current);
    };
    SingleStep::stay(Some(match current {
        None => 0,
        Some(i) if i >= last => 0,
        Some(i) => i + 1,
    }))
}

fn single_up(current: Option<usize>, len: usize) -> SingleStep {
    let Some(last) = len.checked_sub(1) else {
        return SingleStep::stay(current);
    };
    SingleStep::stay(Some(match current {
        None => 0,
        Some(0) => last,
        Some(i) => (i - 1).min(last),
    }))
}

pub fn single_commit(current: Option<usize>, _len: usize) -> SingleStep {
    SingleStep {
        current: None,
        open: false,
        commit: Some(current.map_or(SingleCommit::Restore, SingleCommit::Index)),
    }
}

fn single_escape(current: Option<usize>, _len: usize) -> SingleStep {
    SingleStep {
        current,
        open: false,
        commit: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn cursor(head: Option<usize>, tail: Option<usize>) -> MultiCursor {
        MultiCursor { head, tail }
    }

    fn down(c: MultiCursor, shift: bool, len: usize) -> MultiCursor {
        step_multi(c, NavKey::ArrowDown, shift, len).cursor
    }

    fn up(c: MultiCursor, shift: bool, len: usize) -> MultiCursor {
        step_multi(c, NavKey::ArrowUp, shift, len).cursor
    }

    #[test]
    fn key_names_map_to_nav_keys() {
        let k = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(NavKey::from_key(&k(KeyCode::Down)), Some(NavKey::ArrowDown));
        assert_eq!(NavKey::from_key(&k(KeyCode::Up)), Some(NavKey::ArrowUp));
        assert_eq!(NavKey::from_key(&k(KeyCode::Enter)), Some(NavKey::Enter));
        assert_eq!(NavKey::from_key(&k(KeyCode::Esc)), Some(NavKey::Escape));
        assert_eq!(NavKey::from_key(&k(KeyCode::Char('j'))), None);
        assert!(shift_held(&KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT)));
    }

    #[test]
    fn multi_down_from_nothing_starts_at_zero() {
        assert_eq!(down(cursor(None, None), false, 5), cursor(Some(0), None));
        assert_eq!(down(cursor(None, None), true, 5), cursor(Some(0), None));
    }

    #[test]
    fn multi_down_moves_and_collapses_run() {
        assert_eq!(down(cursor(Some(1), Some(3)), false, 5), cursor(Some(2), None));
    }

    #[test]
    fn multi_down_wraps_at_last() {
        assert_eq!(down(cursor(Some(4), None), false, 5), cursor(Some(0), None));
    }

    #[test]
    fn multi_shift_down_extends_then_clamps() {
        let c = down(cursor(Some(2), None), true, 5);
        assert_eq!(c, cursor(Some(2), Some(3)));
        let c = down(c, true, 5);
        assert_eq!(c, cursor(Some(2), Some(4)));
        let c = down(c, true, 5);
        assert_eq!(c, cursor(Some(2), Some(4)));
    }

    #[test]
    fn multi_shift_down_at_last_head_stays_in_bounds() {
        assert_eq!(down(cursor(Some(4), None), true, 5), cursor(Some(4), Some(4)));
    }

    #[test]
    fn multi_up_mirrors_down() {
        assert_eq!(up(cursor(None, None), false, 5), cursor(Some(0), None));
        assert_eq!(up(cursor(Some(0), None), false, 5), cursor(Some(4), None));
        assert_eq!(up(cursor(Some(3), Some(1)), false, 5), cursor(Some(2), None));
    }

    #[test]
    fn multi_shift_up_starts_at_last_then_extends_and_clamps() {
        let c = up(cursor(None, None), true, 5);
        assert_eq!(c, cursor(Some(4), None));
        let c = up(c, true, 5);
        assert_eq!(c, cursor(Some(4), Some(3)));
        let c = up(cursor(Some(1), None), true, 5);
        assert_eq!(c, cursor(Some(1), Some(0)));
        assert_eq!(up(c, true, 5), cursor(Some(1), Some(0)));
        assert_eq!(up(cursor(Some(0), None), true, 5), cursor(Some(0), Some(0)));
    }

    #[test]
    fn arrows_on_empty_list_are_noops() {
        assert_eq!(down(cursor(None, None), false, 0), cursor(None, None));
        assert_eq!(up(cursor(None, None), true, 0), cursor(None, None));
        assert_eq!(step_single(None, NavKey::ArrowDown, 0).current, None);
    }

    #[test]
    fn multi_enter_commits_run_and_closes() {
        let step = step_multi(cursor(Some(1), Some(3)), NavKey::Enter, false, 5);
        assert_eq!(step.cursor, MultiCursor::default());
        assert!(!step.open);
        let run = step.commit.unwrap();
        let rows: Vec<usize> = (0..5).filter(|i| run.contains(*i)).collect();
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn multi_enter_commits_point() {
        let step = step_multi(cursor(Some(2), None), NavKey::Enter, false, 5);
        assert_eq!(
            step.commit,
            Some(Run {
                head: 2,
                tail: None
            })
        );
    }

    #[test]
    fn multi_enter_without_head_just_closes() {
        let step = step_multi(cursor(None, None), NavKey::Enter, false, 5);
        assert_eq!(step.commit, None);
        assert!(!step.open);
    }

    #[test]
    fn multi_escape_resets_without_commit() {
        let step = step_multi(cursor(Some(1), Some(2)), NavKey::Escape, false, 5);
        assert_eq!(step.cursor, MultiCursor::default());
        assert!(!step.open);
        assert_eq!(step.commit, None);
    }

    #[test]
    fn single_down_and_up_wrap() {
        assert_eq!(step_single(None, NavKey::ArrowDown, 3).current, Some(0));
        assert_eq!(step_single(Some(0), NavKey::ArrowDown, 3).current, Some(1));
        assert_eq!(step_single(Some(2), NavKey::ArrowDown, 3).current, Some(0));
        assert_eq!(step_single(None, NavKey::ArrowUp, 3).current, Some(0));
        assert_eq!(step_single(Some(0), NavKey::ArrowUp, 3).current, Some(2));
        assert_eq!(step_single(Some(2), NavKey::ArrowUp, 3).current, Some(1));
    }

    #[test]
    fn single_enter_commits_index_or_restores() {
        let step = step_single(Some(1), NavKey::Enter, 3);
        assert_eq!(step.commit, Some(SingleCommit::Index(1)));
        assert_eq!(step.current, None);
        assert!(!step.open);

        let step = step_single(None, NavKey::Enter, 3);
        assert_eq!(step.commit, Some(SingleCommit::Restore));
    }

    #[test]
    fn single_escape_only_closes() {
        let step = step_single(Some(1), NavKey::Escape, 3);
        assert_eq!(step.current, Some(1));
        assert!(!step.open);
        assert_eq!(step.commit, None);
    }
}
