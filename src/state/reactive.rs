//! Reactive State - a value cell with ordered listeners.
//!
//! The value lives in a spark-signals `Signal`, so a `State` can feed
//! `effect`/`derived` graphs through [`State::signal`]. On top of that it
//! keeps an explicit listener list with a strict contract:
//!
//! - `subscribe` calls the listener once, synchronously, with the current
//!   value, then registers it
//! - `set` with an equal value is a no-op
//! - `set` with a new value calls every listener in subscription order
//!   before returning
//! - `unsubscribe` is idempotent
//!
//! # Example
//!
//! ```ignore
//! use spark_cells::state::state;
//!
//! let count = state(0);
//! let sub = count.subscribe(|v| println!("count = {v}")); // prints 0
//! count.set(1);                                            // prints 1
//! count.set(1);                                            // nothing
//! count.unsubscribe(&sub);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{signal, Signal};

/// Token returned by [`State::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener<T> = Rc<dyn Fn(&T)>;

/// A shared reactive cell. Clones share the value and the listeners.
pub struct State<T: Clone + PartialEq + 'static> {
    value: Signal<T>,
    listeners: Rc<RefCell<Vec<(Subscription, Listener<T>)>>>,
    next_id: Rc<Cell<u64>>,
}

/// Create a new state.
pub fn state<T: Clone + PartialEq + 'static>(initial: T) -> State<T> {
    State::new(initial)
}

impl<T: Clone + PartialEq + 'static> State<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: signal(initial),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Replace the value and notify listeners.
    ///
    /// Returns false (and notifies nobody) if the value is unchanged.
    pub fn set(&self, value: T) -> bool {
        if self.value.get() == value {
            return false;
        }
        self.value.set(value.clone());
        self.notify(&value);
        true
    }

    /// Set the value computed from the current one.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.value.get());
        self.set(next)
    }

    /// Call `listener` now with the current value, then on every change.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(listener);
        listener(&self.value.get());

        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Stop notifying a listener. Unknown subscriptions are ignored.
    ///
    /// Returns true if the listener was registered.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| id != subscription);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// The backing signal, for use inside `effect`/`derived`.
    pub fn signal(&self) -> Signal<T> {
        self.value.clone()
    }

    fn notify(&self, value: &T) {
        // Snapshot so listeners can subscribe, unsubscribe or set re-entrantly.
        let snapshot: Vec<(Subscription, Listener<T>)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            let still_registered = self.listeners.borrow().iter().any(|(l, _)| *l == id);
            if still_registered {
                listener(value);
            }
        }
    }
}

impl<T: Clone + PartialEq + 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            listeners: self.listeners.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug + 'static> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("value", &self.value.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::effect;

    #[test]
    fn test_subscribe_replays_current_value() {
        let s = state(7);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        s.subscribe(move |v| seen_clone.borrow_mut().push(*v));
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_equal_value_does_not_notify() {
        let s = state(1);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        s.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        assert!(!s.set(1));
        assert_eq!(count.get(), 1);

        assert!(s.set(2));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_notification_order_is_subscription_order() {
        let s = state(0);
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let order = order.clone();
            s.subscribe(move |v| {
                if *v != 0 {
                    order.borrow_mut().push(tag);
                }
            });
        }
        s.set(5);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let s = state(0);
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let sub = s.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        assert!(s.unsubscribe(&sub));
        assert!(!s.unsubscribe(&sub));
        s.set(3);
        assert_eq!(count.get(), 1);
        assert_eq!(s.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_during_notify() {
        let s = state(0);
        let late_calls = Rc::new(Cell::new(0));
        let slot: Rc<Cell<Option<Subscription>>> = Rc::new(Cell::new(None));

        let s_clone = s.clone();
        let slot_clone = slot.clone();
        s.subscribe(move |v| {
            if *v == 1 {
                if let Some(sub) = slot_clone.get() {
                    s_clone.unsubscribe(&sub);
                }
            }
        });
        let late_clone = late_calls.clone();
        slot.set(Some(s.subscribe(move |_| late_clone.set(late_clone.get() + 1))));

        s.set(1);
        // Only the initial replay; removed before its turn in the same notify.
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn test_update_uses_current_value() {
        let s = state(2);
        s.update(|v| v * 10);
        assert_eq!(s.get(), 20);
    }

    #[test]
    fn test_signal_drives_effects() {
        let s = state(1);
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let sig = s.signal();
        let _stop = effect(move || {
            let _ = sig.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        s.set(2);
        assert_eq!(runs.get(), 2);
    }
}
