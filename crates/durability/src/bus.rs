//! Completion notification bus
//!
//! A single-producer, multi-subscriber broadcast of completion events.
//! Subscribing returns a [`Subscription`] guard; the callback stays
//! registered until the guard is dropped or explicitly unsubscribed.
//!
//! # Threading
//!
//! [`EventBus::publish`] runs every callback synchronously on the
//! publishing thread, after the subscriber list lock has been released.
//! A callback may therefore subscribe or unsubscribe without deadlocking.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct BusInner<T> {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
}

impl<T> BusInner<T> {
    fn remove(&self, id: u64) -> bool {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }
}

/// Broadcast channel for one kind of completion event
pub struct EventBus<T> {
    inner: Arc<BusInner<T>>,
}

impl<T: 'static> EventBus<T> {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        EventBus {
            inner: Arc::new(BusInner {
                next_id: AtomicU64::new(0),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a callback for every future event
    ///
    /// Events published before the call are not replayed.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().push((id, Arc::new(callback)));

        let weak: Weak<BusInner<T>> = Arc::downgrade(&self.inner);
        Subscription {
            id,
            teardown: Some(Box::new(move || {
                weak.upgrade().map(|inner| inner.remove(id)).unwrap_or(false)
            })),
        }
    }

    /// Deliver an event to every current subscriber
    ///
    /// Returns the number of callbacks invoked.
    pub fn publish(&self, event: &T) -> usize {
        let callbacks: Vec<Callback<T>> = self
            .inner
            .subscribers
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}

impl<T: 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.inner.subscribers.lock().len())
            .finish()
    }
}

/// Handle for a registered callback
///
/// Dropping the handle unsubscribes. Use [`Subscription::detach`] to keep
/// the callback registered for the lifetime of the bus.
pub struct Subscription {
    id: u64,
    teardown: Option<Box<dyn FnOnce() -> bool + Send + Sync>>,
}

impl Subscription {
    /// Subscription identifier, unique per bus
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the callback now
    ///
    /// Returns false if the bus was already dropped.
    pub fn unsubscribe(mut self) -> bool {
        self.teardown.take().map(|teardown| teardown()).unwrap_or(false)
    }

    /// Keep the callback registered until the bus itself is dropped
    pub fn detach(mut self) {
        self.teardown = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.teardown.is_some())
            .finish()
    }
}
