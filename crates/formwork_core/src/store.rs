//! Formwork Store - observable value with synchronous subscribers
//!
//! A [`Store<T>`] owns a single value and a list of listeners. Listeners are
//! invoked immediately when they subscribe and again after every change, on
//! the caller's thread, before `set`/`update` returns.
//!
//! # Example
//!
//! ```rust
//! use formwork_core::store::Store;
//! use std::sync::{Arc, Mutex};
//!
//! let store = Store::new(1i32);
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let seen_clone = seen.clone();
//! let handle = store.subscribe(move |value: &i32| {
//!     seen_clone.lock().unwrap().push(*value);
//! });
//!
//! store.update(|v| *v += 1);
//! store.unsubscribe(handle);
//! store.set(10);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
//! assert_eq!(store.get(), 10);
//! ```
//!
//! # Re-entrancy
//!
//! No lock is held while listeners run, so a listener may read the store it
//! is subscribed to. Writing to that same store from inside a listener
//! triggers a nested notification round; callers must avoid feedback loops.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

new_key_type! {
    /// Unique identifier for a store subscriber
    pub struct SubscriberId;
}

/// Listener callback stored by a [`Store`]
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// An observable value
pub struct Store<T: Clone + Send + Sync + 'static> {
    /// Current value
    value: RwLock<T>,
    /// Registered listeners
    subscribers: RwLock<SlotMap<SubscriberId, Listener<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a store holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            value: RwLock::new(initial),
            subscribers: RwLock::new(SlotMap::with_key()),
        }
    }

    /// Get a copy of the current value without subscribing
    pub fn get(&self) -> T {
        read(&self.value).clone()
    }

    /// Borrow the current value for the duration of `f`
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&read(&self.value))
    }

    /// Replace the whole value and notify subscribers
    pub fn set(&self, value: T) {
        let snapshot = {
            let mut current = write(&self.value);
            *current = value;
            current.clone()
        };
        self.notify_subscribers(&snapshot);
    }

    /// Update the value in place and notify subscribers
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let snapshot = {
            let mut current = write(&self.value);
            f(&mut current);
            current.clone()
        };
        self.notify_subscribers(&snapshot);
    }

    /// Update the value and return a result computed by the closure
    pub fn update_with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let (result, snapshot) = {
            let mut current = write(&self.value);
            let result = f(&mut current);
            (result, current.clone())
        };
        self.notify_subscribers(&snapshot);
        result
    }

    /// Subscribe to changes
    ///
    /// The listener is called once right away with the current value, then
    /// after every `set`/`update`. Pass the returned handle to
    /// [`Store::unsubscribe`] to stop receiving notifications.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let listener: Listener<T> = Arc::new(listener);
        let id = write(&self.subscribers).insert(listener.clone());

        let current = self.get();
        listener(&current);

        SubscriptionHandle { id }
    }

    /// Remove a listener
    ///
    /// Returns `false` if the handle was already unsubscribed.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        write(&self.subscribers).remove(handle.id).is_some()
    }

    /// Number of active listeners
    pub fn subscriber_count(&self) -> usize {
        read(&self.subscribers).len()
    }

    fn notify_subscribers(&self, value: &T) {
        // Collect first so listeners can (un)subscribe without deadlocking
        let listeners: Vec<Listener<T>> = read(&self.subscribers).values().cloned().collect();
        tracing::trace!(subscribers = listeners.len(), "store changed");
        for listener in listeners {
            listener(value);
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("value", &*read(&self.value))
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle for unsubscribing from store updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    id: SubscriberId,
}

impl SubscriptionHandle {
    /// Get the subscriber's internal ID
    pub fn id(&self) -> SubscriberId {
        self.id
    }
}

// Poisoned only when an update closure panicked; the last value stays readable.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Default, Debug, PartialEq)]
    struct TestState {
        count: i32,
        name: String,
    }

    #[test]
    fn test_store_basic() {
        let store = Store::<TestState>::default();

        let state = store.get();
        assert_eq!(state.count, 0);
        assert_eq!(state.name, "");

        store.set(TestState {
            count: 42,
            name: "hello".into(),
        });

        let state = store.get();
        assert_eq!(state.count, 42);
        assert_eq!(state.name, "hello");
    }

    #[test]
    fn test_store_update() {
        let store = Store::new(TestState::default());

        store.update(|s| s.count = 10);
        assert_eq!(store.get().count, 10);

        store.update(|s| s.count += 5);
        assert_eq!(store.get().count, 15);
    }

    #[test]
    fn test_store_update_with() {
        let store = Store::new(TestState {
            count: 10,
            name: "foo".into(),
        });

        let old_count = store.update_with(|s| {
            let old = s.count;
            s.count = 20;
            old
        });

        assert_eq!(old_count, 10);
        assert_eq!(store.get().count, 20);
    }

    #[test]
    fn test_subscriber_called_immediately_and_on_change() {
        let store = Store::new(TestState::default());
        let call_count = Arc::new(AtomicI32::new(0));
        let call_count_clone = call_count.clone();

        let _handle = store.subscribe(move |state: &TestState| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
            assert!(state.count >= 0);
        });

        // Initial call on subscribe
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        store.set(TestState {
            count: 1,
            name: "".into(),
        });
        assert_eq!(call_count.load(Ordering::SeqCst), 2);

        store.update(|s| s.count = 2);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let store = Store::new(0i32);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let handle = store.subscribe(move |v: &i32| seen_clone.lock().unwrap().push(*v));
        assert_eq!(store.subscriber_count(), 1);

        store.set(1);
        assert!(store.unsubscribe(handle));
        assert!(!store.unsubscribe(handle));
        store.set(2);

        assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = Arc::new(Store::new(5i32));
        let observed = Arc::new(AtomicI32::new(0));

        let store_clone = store.clone();
        let observed_clone = observed.clone();
        let _handle = store.subscribe(move |_| {
            observed_clone.store(store_clone.get(), Ordering::SeqCst);
        });

        store.set(9);
        assert_eq!(observed.load(Ordering::SeqCst), 9);
    }
}
