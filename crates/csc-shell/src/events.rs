//! Explicit publish/subscribe streams
//!
//! Handlers are registered with [`EventStream::subscribe`] and stay
//! registered until the returned [`Subscription`] is dropped or
//! unsubscribed. Each emission calls every handler registered at that
//! moment exactly once.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

/// Multi-subscriber event stream
pub struct EventStream<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T: 'static> EventStream<T> {
    /// Create stream with no subscribers
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Register `handler` for every later emission
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.lock().handlers.retain(|(h, _)| *h != id);
                }
            })),
        }
    }

    /// Deliver `event` to current subscribers
    ///
    /// Handlers run outside the registry lock and may emit or subscribe.
    pub fn emit(&self, event: &T) {
        let handlers: Vec<Handler<T>> = self
            .registry
            .lock()
            .handlers
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().handlers.len()
    }
}

impl<T: 'static> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> std::fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("subscribers", &self.registry.lock().handlers.len())
            .finish()
    }
}

/// Registration guard; unsubscribes on drop
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the handler now
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&u32) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move |_: &u32| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn each_handler_called_once_per_emit() {
        let stream = EventStream::<u32>::new();
        let (a, handler_a) = counter();
        let (b, handler_b) = counter();
        let _sa = stream.subscribe(handler_a);
        let _sb = stream.subscribe(handler_b);

        stream.emit(&1);
        stream.emit(&2);

        assert_eq!(a.load(Ordering::SeqCst), 2);
        assert_eq!(b.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn drop_unsubscribes() {
        let stream = EventStream::<u32>::new();
        let (count, handler) = counter();
        let sub = stream.subscribe(handler);
        assert_eq!(stream.subscriber_count(), 1);

        drop(sub);
        stream.emit(&1);

        assert_eq!(stream.subscriber_count(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn explicit_unsubscribe_leaves_others() {
        let stream = EventStream::<u32>::new();
        let (a, handler_a) = counter();
        let (b, handler_b) = counter();
        let sa = stream.subscribe(handler_a);
        let _sb = stream.subscribe(handler_b);

        sa.unsubscribe();
        stream.emit(&7);

        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subscription_outlives_stream() {
        let stream = EventStream::<u32>::new();
        let (_count, handler) = counter();
        let sub = stream.subscribe(handler);

        drop(stream);
        drop(sub);
    }

    #[test]
    fn handlers_may_emit_reentrantly() {
        let stream = EventStream::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = stream.clone();
        let log = Arc::clone(&seen);
        let _sub = stream.subscribe(move |n: &u32| {
            log.lock().push(*n);
            if *n > 0 {
                inner.emit(&(n - 1));
            }
        });

        stream.emit(&2);
        assert_eq!(*seen.lock(), vec![2, 1, 0]);
    }
}
