//! Synchronous publish/subscribe for store snapshots.

use std::collections::BTreeMap;

/// Handle returned by `subscribe`; pass it back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&[T])>;

/// Listener registry keyed by subscription order.
pub struct Observers<T> {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, Listener<T>>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: BTreeMap::new(),
        }
    }
}

impl<T> Observers<T> {
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[T]) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Returns `false` when `id` was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Calls every listener in subscription order.
    pub fn notify(&mut self, snapshot: &[T]) {
        for listener in self.listeners.values_mut() {
            listener(snapshot);
        }
    }
}
