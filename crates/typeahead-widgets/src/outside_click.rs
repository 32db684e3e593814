//! Dismiss-on-outside-click, as a scoped pointer listener.
//!
//! A [`ClickOutside`] watches one screen region. While active it holds a
//! [`Listener`] registered with a [`ListenerRegistry`]; the registration is
//! released when the detector is deactivated or dropped, so a session never
//! outlives the state that asked for it.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// The set of live pointer listeners.
///
/// Clones share the same set. Apps that want to check for leaked listeners
/// hand one registry to every picker and inspect [`len`](Self::len).
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: AtomicU64,
    live: Mutex<BTreeSet<u64>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of listeners currently attached.
    pub fn len(&self) -> usize {
        self.live().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn attach(&self) -> Listener {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.live().insert(id);
        tracing::trace!(listener = id, "pointer listener attached");
        Listener {
            id,
            registry: self.clone(),
        }
    }

    fn detach(&self, id: u64) {
        if self.live().remove(&id) {
            tracing::trace!(listener = id, "pointer listener detached");
        }
    }

    fn live(&self) -> std::sync::MutexGuard<'_, BTreeSet<u64>> {
        // The set holds plain ids, so a poisoned lock is still consistent.
        self.inner
            .live
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A live registration. Dropping it detaches.
#[derive(Debug)]
pub struct Listener {
    id: u64,
    registry: ListenerRegistry,
}

impl Listener {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.registry.detach(self.id);
    }
}

/// Fires for left-button presses outside a tracked region, only while active.
#[derive(Debug, Default)]
pub struct ClickOutside {
    region: Cell<Rect>,
    listener: Option<Listener>,
    registry: ListenerRegistry,
}

impl ClickOutside {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register listeners with a shared registry instead of a private one.
    pub fn with_registry(mut self, registry: ListenerRegistry) -> Self {
        self.listener = None;
        self.registry = registry;
        self
    }

    /// Record the tracked region. Called from `view`, hence `&self`.
    pub fn set_region(&self, region: Rect) {
        self.region.set(region);
    }

    pub fn region(&self) -> Rect {
        self.region.get()
    }

    /// Attach on the first activation of a session, detach on deactivation.
    /// Repeated calls with the same flag change nothing.
    pub fn set_active(&mut self, active: bool) {
        match (active, self.listener.is_some()) {
            (true, false) => self.listener = Some(self.registry.attach()),
            (false, true) => self.listener = None,
            _ => {}
        }
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// `true` exactly when this event should dismiss: active, a left-button
    /// press, and outside the region.
    pub fn handle(&self, event: &MouseEvent) -> bool {
        self.listener.is_some()
            && event.kind == MouseEventKind::Down(MouseButton::Left)
            && !self
                .region
                .get()
                .contains(Position::new(event.column, event.row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(button: MouseButton, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn detector() -> ClickOutside {
        let d = ClickOutside::new();
        d.set_region(Rect::new(10, 5, 20, 4));
        d
    }

    #[test]
    fn inactive_never_fires() {
        let d = detector();
        assert!(!d.handle(&press(MouseButton::Left, 0, 0)));
    }

    #[test]
    fn fires_for_left_press_outside() {
        let mut d = detector();
        d.set_active(true);
        assert!(d.handle(&press(MouseButton::Left, 0, 0)));
        assert!(d.handle(&press(MouseButton::Left, 30, 5)));
    }

    #[test]
    fn ignores_inside_and_other_buttons() {
        let mut d = detector();
        d.set_active(true);
        assert!(!d.handle(&press(MouseButton::Left, 10, 5)));
        assert!(!d.handle(&press(MouseButton::Left, 29, 8)));
        assert!(!d.handle(&press(MouseButton::Right, 0, 0)));
        let release = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            ..press(MouseButton::Left, 0, 0)
        };
        assert!(!d.handle(&release));
    }

    #[test]
    fn one_listener_per_session() {
        let registry = ListenerRegistry::new();
        let mut d = detector().with_registry(registry.clone());
        assert!(registry.is_empty());

        d.set_active(true);
        d.set_active(true);
        assert_eq!(registry.len(), 1);

        d.set_active(false);
        assert!(registry.is_empty());
        assert!(!d.handle(&press(MouseButton::Left, 0, 0)));

        d.set_active(true);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn drop_releases_listener() {
        let registry = ListenerRegistry::new();
        {
            let mut d = detector().with_registry(registry.clone());
            d.set_active(true);
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn sessions_get_fresh_ids() {
        let registry = ListenerRegistry::new();
        let mut d = detector().with_registry(registry);
        d.set_active(true);
        let first = d.listener.as_ref().map(Listener::id);
        d.set_active(false);
        d.set_active(true);
        let second = d.listener.as_ref().map(Listener::id);
        assert_ne!(first, second);
    }
}
