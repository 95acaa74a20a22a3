//! Single-threaded observer registry
//!
//! State holders broadcast immutable values to every registered callback.
//! A [`Subscription`] removes its callback when dropped, so a torn-down
//! view never sees later values.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Registry<T> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<T>)>,
}

/// Broadcast list of callbacks for values of type `T`
pub struct Observers<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Observers<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Register `callback`; it stays active until the returned handle drops
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.callbacks.push((id, Rc::new(callback)));
            id
        };

        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry
                        .borrow_mut()
                        .callbacks
                        .retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Deliver `value` to every current subscriber.
    ///
    /// The callback list is copied first so callbacks may subscribe or
    /// unsubscribe while being notified.
    pub fn emit(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .registry
            .borrow()
            .callbacks
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(value);
        }
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.registry.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.registry.borrow().callbacks.len())
            .finish()
    }
}

/// Handle that keeps a callback registered
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now instead of at drop
    pub fn cancel(mut self) {
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

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let observers = Observers::<u16>::new();
        let total = Rc::new(Cell::new(0u32));

        let first = {
            let total = total.clone();
            observers.subscribe(move |v| total.set(total.get() + u32::from(*v)))
        };
        let second = {
            let total = total.clone();
            observers.subscribe(move |v| total.set(total.get() + u32::from(*v)))
        };

        observers.emit(&5);
        assert_eq!(total.get(), 10);
        assert_eq!(observers.len(), 2);

        drop(first);
        drop(second);
        assert!(observers.is_empty());
    }

    #[test]
    fn test_dropped_subscription_stops_delivery() {
        let observers = Observers::<u16>::new();
        let seen = Rc::new(Cell::new(0u16));

        let subscription = {
            let seen = seen.clone();
            observers.subscribe(move |v| seen.set(*v))
        };
        observers.emit(&409);
        subscription.cancel();
        observers.emit(&500);

        assert_eq!(seen.get(), 409);
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let observers = Observers::<u16>::new();
        let subscription = observers.subscribe(|_| {});
        drop(observers);
        drop(subscription);
    }

    #[test]
    fn test_unsubscribe_during_emit() {
        let observers = Observers::<u16>::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0u32));

        let subscription = {
            let slot = slot.clone();
            let calls = calls.clone();
            observers.subscribe(move |_| {
                calls.set(calls.get() + 1);
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(subscription);

        observers.emit(&1);
        observers.emit(&2);
        assert_eq!(calls.get(), 1);
    }
}
