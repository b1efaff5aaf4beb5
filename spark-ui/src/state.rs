//! Shared, externally owned state handles.
//!
//! ## Usage
//!
//! Bind a control or group to storage that lives outside of it, for example
//! the selected identifier of a radio button group.

use std::sync::Arc;

use parking_lot::RwLock;

/// A cloneable handle to a value shared between a control and its owner.
///
/// All clones observe the same value. Reads and writes go through closures so
/// the lock is never held across user code outside of them.
///
/// ```
/// use spark_ui::State;
///
/// let count = State::new(0usize);
/// let alias = count.clone();
/// alias.with_mut(|c| *c += 1);
/// assert_eq!(count.get(), 1);
/// ```
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> State<T> {
    /// Creates a new shared value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Execute a closure with a shared reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with a mutable reference to the stored value.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Replace the stored value.
    pub fn set(&self, value: T) {
        *self.inner.write() = value;
    }

    /// Returns `true` when both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> State<T> {
    /// Get a cloned value.
    pub fn get(&self) -> T {
        self.inner.read().clone()
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("State").field(&*self.inner.read()).finish()
    }
}
