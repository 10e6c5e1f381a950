//! `MatcherRegistry` — a registry of matchers populated by scanning targets
//!
//! The discovery layer (annotation scanning, route tables, config files —
//! whatever the host ecosystem provides) hands over matchable targets as
//! [`TargetGroup`]s: a container target (e.g. a handler group) with its
//! member targets (e.g. individual handlers). [`MatcherRegistry::scan`]
//! turns each target into a [`PatternMatcher`] through injected id and
//! pattern providers and registers it under the target's id.
//!
//! The core never performs discovery itself: callers supply the target
//! sequence however their ecosystem produces it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{
    AccessibleRegistry, ConstMatcher, Error, InMemoryRegistry, PathPatterns, PatternMatcher,
    Registry, SharedMatcher,
};

/// A container target and its member targets, as produced by the external
/// discovery collaborator.
///
/// The containment relation is what drives pattern combination: a member's
/// effective pattern set is the container's patterns followed by its own.
///
/// # Example
///
/// ```
/// use rategate::TargetGroup;
///
/// let group = TargetGroup::new("reports")
///     .with_member("daily")
///     .with_member("weekly");
///
/// assert_eq!(group.container(), &"reports");
/// assert_eq!(group.members().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TargetGroup<T> {
    container: T,
    members: Vec<T>,
}

impl<T> TargetGroup<T> {
    /// Create a group around a container target with no members yet.
    pub fn new(container: T) -> Self {
        Self {
            container,
            members: Vec::new(),
        }
    }

    /// Add a member target (builder pattern).
    #[must_use]
    pub fn with_member(mut self, member: T) -> Self {
        self.members.push(member);
        self
    }

    /// Returns the container target.
    pub fn container(&self) -> &T {
        &self.container
    }

    /// Returns the member targets.
    pub fn members(&self) -> &[T] {
        &self.members
    }
}

/// A [`Registry`] specialized to hold matchers, keyed by rule id.
///
/// Wraps an [`InMemoryRegistry`] of [`SharedMatcher`]s and adds the scan
/// population path. Construction requires a default matcher; the usual
/// choice is a [`ConstMatcher`] yielding the default rule id, so that every
/// key resolves to *some* rule.
///
/// Duplicate ids across targets follow registry semantics: last
/// registration wins, surfaced as a debug-level event, never fatal.
pub struct MatcherRegistry<Id> {
    inner: InMemoryRegistry<SharedMatcher<Id>>,
}

impl<Id: Clone + Send + Sync + 'static> MatcherRegistry<Id> {
    /// Create a matcher registry with the given default matcher.
    #[must_use]
    pub fn of(default: SharedMatcher<Id>) -> Self {
        Self {
            inner: InMemoryRegistry::of(default),
        }
    }

    /// Create a matcher registry whose default matcher resolves every key
    /// to `id`.
    #[must_use]
    pub fn with_default_id(id: Id) -> Self {
        Self::of(Arc::new(ConstMatcher::new(id)))
    }

    /// Returns the number of registered matchers (the default is not
    /// counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no matchers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<Id: Clone + fmt::Display + Send + Sync + 'static> MatcherRegistry<Id> {
    /// Register a matcher under a rule id.
    ///
    /// The registry name is the id's display form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyName`] if the id displays as an empty string.
    pub fn register_matcher(&self, id: &Id, matcher: SharedMatcher<Id>) -> Result<(), Error> {
        self.inner.register(&id.to_string(), matcher)
    }

    /// Populate the registry from discovered target groups.
    ///
    /// For each group:
    /// - the container's patterns (if any) register a matcher under the
    ///   container's id;
    /// - each member's patterns are combined with the container's
    ///   (container patterns first) before building the member's matcher;
    /// - members with no own patterns inherit the container's;
    /// - targets with no patterns anywhere register nothing, so lookups
    ///   for them fall back to the default matcher.
    ///
    /// `id_of` and `patterns_of` are the injected identity and pattern
    /// providers. Targets are opaque to the registry; providers may
    /// dispatch on target kind internally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyName`] if a provider yields an id that
    /// displays as an empty string.
    pub fn scan<T, P, FI, FP>(
        &self,
        groups: &[TargetGroup<T>],
        id_of: FI,
        patterns_of: FP,
    ) -> Result<(), Error>
    where
        P: PathPatterns + Clone + 'static,
        FI: Fn(&T) -> Id,
        FP: Fn(&T) -> Option<P>,
    {
        for group in groups {
            let container_patterns = patterns_of(group.container());

            if let Some(patterns) = &container_patterns {
                let id = id_of(group.container());
                tracing::debug!(id = %id, patterns = patterns.patterns().len(), "registering container matcher");
                self.register_matcher(&id, Arc::new(PatternMatcher::new(id.clone(), patterns.clone())))?;
            }

            for member in group.members() {
                let effective = match (&container_patterns, patterns_of(member)) {
                    (Some(container), Some(member)) => Some(container.combine(&member)),
                    (None, Some(member)) => Some(member),
                    (Some(container), None) => Some(container.clone()),
                    (None, None) => None,
                };

                if let Some(patterns) = effective {
                    let id = id_of(member);
                    tracing::debug!(id = %id, patterns = patterns.patterns().len(), "registering member matcher");
                    self.register_matcher(&id, Arc::new(PatternMatcher::new(id.clone(), patterns)))?;
                }
            }
        }
        Ok(())
    }
}

impl<Id: Clone + Send + Sync + 'static> Registry<SharedMatcher<Id>> for MatcherRegistry<Id> {
    fn register_default(&self, value: SharedMatcher<Id>) {
        self.inner.register_default(value);
    }

    fn register(&self, name: &str, value: SharedMatcher<Id>) -> Result<(), Error> {
        self.inner.register(name, value)
    }

    fn default_value(&self) -> SharedMatcher<Id> {
        self.inner.default_value()
    }

    fn get_or_default(&self, name: &str) -> SharedMatcher<Id> {
        self.inner.get_or_default(name)
    }
}

impl<Id: Clone + Send + Sync + 'static> AccessibleRegistry<SharedMatcher<Id>>
    for MatcherRegistry<Id>
{
    fn entries(&self) -> HashMap<String, SharedMatcher<Id>> {
        self.inner.entries()
    }
}

impl<Id> fmt::Debug for MatcherRegistry<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherRegistry")
            .field("inner", &self.inner)
            .finish()
    }
}
