//! Explicit publisher interfaces for the chart's outward-facing events.
//!
//! A plain function-reference list; no dynamic dispatch beyond the boxed
//! handler closures, and no interior mutability — publishing requires the
//! same exclusive access as any other engine mutation.

use std::fmt;

/// Handle returned by `Publisher::subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

pub struct Publisher<T> {
    handlers: Vec<(u64, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> Default for Publisher<T> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<T> Publisher<T> {
    pub fn subscribe(&mut self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        Subscription(id)
    }

    /// Removes a handler; returns whether it was still subscribed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _)| *id != subscription.0);
        self.handlers.len() != before
    }

    pub fn publish(&mut self, event: &T) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
