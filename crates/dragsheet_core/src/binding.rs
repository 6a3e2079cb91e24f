//! Shared value bindings
//!
//! A `Binding<T>` is a value owned jointly by a host and the widgets it hands
//! clones to. Every clone reads and writes the same cell. Observers registered
//! with [`Binding::subscribe`] run after each write that actually changes the
//! value; writing the current value again is a no-op.
//!
//! ```rust
//! use dragsheet_core::Binding;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let shown = Binding::new(true);
//! let changes = Arc::new(AtomicUsize::new(0));
//! let counter = changes.clone();
//! shown.subscribe(move |_| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! shown.set(false);
//! shown.set(false);
//! assert_eq!(changes.load(Ordering::SeqCst), 1);
//! ```

use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

new_key_type! {
    /// Handle returned by [`Binding::subscribe`]
    pub struct SubscriptionId;
}

/// Observer callback invoked with the new value
pub type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct BindingInner<T> {
    value: T,
    observers: SlotMap<SubscriptionId, Observer<T>>,
}

/// A shared, observable value
pub struct Binding<T> {
    inner: Arc<Mutex<BindingInner<T>>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + Send + 'static> Binding<T> {
    /// Create a new binding holding `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BindingInner {
                value,
                observers: SlotMap::with_key(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BindingInner<T>> {
        // A panicking observer never runs under the lock, so the data is intact
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the current value
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Write a new value, notifying observers if it changed.
    ///
    /// Returns `true` when the stored value changed.
    pub fn set(&self, value: T) -> bool {
        let observers: Vec<Observer<T>> = {
            let mut inner = self.lock();
            if inner.value == value {
                return false;
            }
            inner.value = value.clone();
            inner.observers.values().cloned().collect()
        };

        for observer in observers {
            observer(&value);
        }
        true
    }

    /// Modify the value in place through a closure
    pub fn update<F: FnOnce(&T) -> T>(&self, f: F) -> bool {
        let next = f(&self.get());
        self.set(next)
    }

    /// Register an observer that runs after every change
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.lock().observers.insert(Arc::new(observer))
    }

    /// Remove a previously registered observer
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().observers.remove(id).is_some()
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Whether two bindings share the same cell
    pub fn ptr_eq(&self, other: &Binding<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Binding<bool> {
    /// Flip a boolean binding
    pub fn toggle(&self) -> bool {
        self.update(|shown| !shown)
    }
}

impl<T: Clone + PartialEq + Send + fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .field("observers", &self.observer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_clones_share_value() {
        let host = Binding::new(false);
        let widget = host.clone();

        host.set(true);
        assert!(widget.get());

        widget.set(false);
        assert!(!host.get());
        assert!(host.ptr_eq(&widget));
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let shown = Binding::new(false);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        shown.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!shown.set(false));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(shown.set(true));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_observer_sees_new_value() {
        let shown = Binding::new(false);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        shown.subscribe(move |value| seen_clone.lock().unwrap().push(*value));

        shown.toggle();
        shown.toggle();

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_observer_may_read_binding() {
        let shown = Binding::new(false);
        let reader = shown.clone();
        let observed = Arc::new(Mutex::new(None));
        let observed_clone = observed.clone();
        shown.subscribe(move |_| {
            *observed_clone.lock().unwrap() = Some(reader.get());
        });

        shown.set(true);
        assert_eq!(*observed.lock().unwrap(), Some(true));
    }

    #[test]
    fn test_unsubscribe() {
        let shown = Binding::new(0u32);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let id = shown.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        shown.set(1);
        assert!(shown.unsubscribe(id));
        shown.set(2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(shown.observer_count(), 0);
        assert!(!shown.unsubscribe(id));
    }
}
