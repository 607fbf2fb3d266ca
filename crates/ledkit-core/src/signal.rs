//! Minimal synchronous signal/slot registry.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(0);

/// Handle returned by [`Signal::connect`], used to disconnect a slot.
///
/// Ids are unique across all signals, so a handle never matches a slot of
/// another signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

impl SlotId {
    fn next() -> Self {
        SlotId(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A list of callbacks invoked in connection order on every [`Signal::emit`].
pub struct Signal<T> {
    slots: Vec<(SlotId, Box<dyn FnMut(&T)>)>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register a callback.
    pub fn connect(&mut self, slot: impl FnMut(&T) + 'static) -> SlotId {
        let id = SlotId::next();
        self.slots.push((id, Box::new(slot)));
        id
    }

    /// Remove a callback. Returns `false` if it was not connected.
    pub fn disconnect(&mut self, id: SlotId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        self.slots.len() != before
    }

    pub fn emit(&mut self, value: &T) {
        for (_, slot) in &mut self.slots {
            slot(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal").field("slots", &self.slots.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_connection_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::new();
        let first = seen.clone();
        signal.connect(move |v: &i32| first.borrow_mut().push(("a", *v)));
        let second = seen.clone();
        signal.connect(move |v: &i32| second.borrow_mut().push(("b", *v)));

        signal.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_disconnect() {
        let hits = Rc::new(RefCell::new(0));
        let mut signal = Signal::new();
        let counter = hits.clone();
        let id = signal.connect(move |_: &()| *counter.borrow_mut() += 1);
        assert_eq!(signal.len(), 1);

        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(&());
        assert_eq!(*hits.borrow(), 0);
        assert!(signal.is_empty());
    }

    #[test]
    fn test_ids_unique_across_signals() {
        let mut a: Signal<()> = Signal::new();
        let mut b: Signal<()> = Signal::new();
        let id_a = a.connect(|_| {});
        let id_b = b.connect(|_| {});
        assert_ne!(id_a, id_b);
        assert!(!a.disconnect(id_b));
        assert_eq!(a.len(), 1);
    }
}
