//! Ambient configuration shared with descendants.
//!
//! A [`Context`] is an explicit, immutable, type-indexed map that is passed by
//! reference down the construction chain. Providing a value returns a child
//! context that overrides one entry and shares every other entry with its
//! parent, so siblings never see each other's overrides.

use std::{
    any::{Any, TypeId},
    sync::Arc,
};

use im::HashMap;

type ContextMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Scoped, inheritable configuration.
///
/// # Examples
///
/// ```
/// use spark_ui::Context;
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Density(u32);
///
/// let root = Context::new();
/// assert_eq!(*root.get::<Density>(), Density(0));
///
/// let child = root.provide(Density(2));
/// assert_eq!(*child.get::<Density>(), Density(2));
/// assert_eq!(*root.get::<Density>(), Density(0));
/// ```
#[derive(Clone, Default)]
pub struct Context {
    values: ContextMap,
}

impl Context {
    /// Creates an empty root context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a child context in which `value` overrides any inherited `T`.
    pub fn provide<T>(&self, value: T) -> Context
    where
        T: Send + Sync + 'static,
    {
        self.provide_shared(Arc::new(value))
    }

    /// Like [`Context::provide`], for a value that is already shared.
    pub fn provide_shared<T>(&self, value: Arc<T>) -> Context
    where
        T: Send + Sync + 'static,
    {
        let value: Arc<dyn Any + Send + Sync> = value;
        Context {
            values: self.values.update(TypeId::of::<T>(), value),
        }
    }

    /// Reads a typed value, falling back to `T::default()` when nothing in
    /// the chain provided one.
    pub fn get<T>(&self) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
    {
        self.try_get::<T>()
            .unwrap_or_else(|| Arc::new(T::default()))
    }

    /// Reads a typed value if one was provided.
    pub fn try_get<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| Arc::downcast::<T>(Arc::clone(value)).ok())
    }

    /// Returns `true` when a `T` was provided somewhere in the chain.
    pub fn contains<T>(&self) -> bool
    where
        T: Send + Sync + 'static,
    {
        self.values.contains_key(&TypeId::of::<T>())
    }

    /// Reads `T`, applies `f` to a copy and provides the result to a child.
    ///
    /// Useful for overriding a single field of a configuration struct.
    pub fn provide_with<T>(&self, f: impl FnOnce(&mut T)) -> Context
    where
        T: Default + Clone + Send + Sync + 'static,
    {
        let mut value = (*self.get::<T>()).clone();
        f(&mut value);
        self.provide(value)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("entries", &self.values.len())
            .finish()
    }
}
