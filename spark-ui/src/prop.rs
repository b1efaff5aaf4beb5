//! Callback handles for control arguments.
//!
//! Handlers live in `*Args` structs that derive `PartialEq`. Two handles are
//! equal only when they point at the same closure, so cloning an args value
//! keeps it equal to the original while a freshly built handler does not.

use std::{fmt, sync::Arc};

type Handler = Arc<dyn Fn() + Send + Sync>;
type HandlerWith<T, R> = Arc<dyn Fn(T) -> R + Send + Sync>;

/// Shared `Fn()` handler, used for settle notifications.
#[derive(Clone)]
pub struct Callback(Handler);

impl Callback {
    /// Wraps `handler`.
    pub fn new(handler: impl Fn() + Send + Sync + 'static) -> Self {
        Callback(Arc::new(handler))
    }

    /// A handler that does nothing.
    pub fn noop() -> Self {
        Callback::new(|| {})
    }

    /// Runs the handler.
    pub fn call(&self) {
        (self.0)()
    }
}

impl Default for Callback {
    fn default() -> Self {
        Callback::noop()
    }
}

impl<F: Fn() + Send + Sync + 'static> From<F> for Callback {
    fn from(handler: F) -> Self {
        Callback::new(handler)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0))
    }
}

/// Shared `Fn(T) -> R` handler, used for value-change notifications.
pub struct CallbackWith<T, R = ()>(HandlerWith<T, R>);

impl<T, R> CallbackWith<T, R> {
    /// Wraps `handler`.
    pub fn new(handler: impl Fn(T) -> R + Send + Sync + 'static) -> Self {
        CallbackWith(Arc::new(handler))
    }

    /// Runs the handler with `value`.
    pub fn call(&self, value: T) -> R {
        (self.0)(value)
    }
}

impl<T: 'static> Default for CallbackWith<T> {
    fn default() -> Self {
        CallbackWith::new(|_| {})
    }
}

impl<T, R, F: Fn(T) -> R + Send + Sync + 'static> From<F> for CallbackWith<T, R> {
    fn from(handler: F) -> Self {
        CallbackWith::new(handler)
    }
}

// Manual impl: deriving would require `T: Clone`.
impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        CallbackWith(Arc::clone(&self.0))
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackWith({:p})", Arc::as_ptr(&self.0))
    }
}
