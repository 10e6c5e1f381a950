//! `Registry` — named values with a mandatory default fallback
//!
//! A registry maps names to values and always carries exactly one default
//! value, supplied at construction. Lookup never fails: an unregistered
//! name resolves to the default. Callers that dispatch through a registry
//! therefore never face an absent-route failure.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

use crate::Error;

/// A named-value store with one required default.
///
/// # Invariants
///
/// - A default value exists from construction onward; [`default_value`](Self::default_value)
///   and [`get_or_default`](Self::get_or_default) are total functions.
/// - Registering under an existing name overwrites silently (last-write-wins).
/// - [`register_default`](Self::register_default) replaces the default; the
///   previous default is dropped.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Reads (`default_value`,
/// `get_or_default`) are safe concurrently with each other and with late
/// registration; no operation blocks indefinitely or holds a lock across
/// user code.
pub trait Registry<T>: Send + Sync {
    /// Replace the default value.
    fn register_default(&self, value: T);

    /// Associate `name` with `value`, overwriting any prior entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyName`] if `name` is empty.
    fn register(&self, name: &str, value: T) -> Result<(), Error>;

    /// Returns the current default value. Always succeeds.
    fn default_value(&self) -> T;

    /// Returns the value registered under `name`, or the default if the
    /// name was never registered. Always succeeds.
    fn get_or_default(&self, name: &str) -> T;
}

/// A [`Registry`] whose entries can be enumerated.
///
/// Used by callers that must walk all registered values (e.g. evaluating
/// every candidate rule rather than one looked up by name).
pub trait AccessibleRegistry<T>: Registry<T> {
    /// Returns a snapshot of the current name-to-value mapping.
    ///
    /// The default is not included unless it was also registered under a
    /// name. A snapshot, not a live view: later registrations do not appear
    /// in maps returned earlier.
    fn entries(&self) -> HashMap<String, T>;
}

/// Map-backed [`Registry`] implementation.
///
/// The expected lifecycle is: construct once at startup via
/// [`of`](Self::of), populate during initialization, then consult from
/// request-handling threads. Late registration concurrent with reads is
/// safe; writes take a short exclusive lock that never executes user code.
///
/// # Example
///
/// ```
/// use rategate::{InMemoryRegistry, Registry};
///
/// let registry = InMemoryRegistry::of(10u32);
/// registry.register("burst", 100).unwrap();
///
/// assert_eq!(registry.get_or_default("burst"), 100);
/// assert_eq!(registry.get_or_default("sustained"), 10); // falls back
/// ```
pub struct InMemoryRegistry<T> {
    default: RwLock<T>,
    entries: RwLock<HashMap<String, T>>,
}

impl<T: Clone + Send + Sync> InMemoryRegistry<T> {
    /// Create a registry holding only the given default.
    #[must_use]
    pub fn of(default: T) -> Self {
        Self {
            default: RwLock::new(default),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of named entries (the default is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no named entries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns `true` if a value is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl<T: Clone + Send + Sync> Registry<T> for InMemoryRegistry<T> {
    fn register_default(&self, value: T) {
        *self.default.write() = value;
    }

    fn register(&self, name: &str, value: T) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let previous = self.entries.write().insert(name.to_owned(), value);
        if previous.is_some() {
            tracing::debug!(name, "overwriting registry entry");
        }
        Ok(())
    }

    fn default_value(&self) -> T {
        self.default.read().clone()
    }

    fn get_or_default(&self, name: &str) -> T {
        self.entries
            .read()
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.default_value())
    }
}

impl<T: Clone + Send + Sync> AccessibleRegistry<T> for InMemoryRegistry<T> {
    fn entries(&self) -> HashMap<String, T> {
        self.entries.read().clone()
    }
}

impl<T> fmt::Debug for InMemoryRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRegistry")
            .field("entries_len", &self.entries.read().len())
            .finish()
    }
}
