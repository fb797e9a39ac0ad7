//! A minimal typed event bus.

/// Synchronous fan-out to registered closures.
///
/// Publishing borrows the bus mutably, so a subscriber can never publish
/// back into the bus it is being called from.
pub struct EventBus<E> {
    subscribers: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> EventBus<E> {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber. Subscribers stay for the bus's lifetime.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&E) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Deliver an event to every subscriber, in subscription order.
    pub fn publish(&mut self, event: &E) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
