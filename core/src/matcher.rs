//! `Matcher` — pure key-to-rule-id resolution with sequential chaining
//!
//! A matcher maps a request key to a rule identifier, or to `None` when no
//! rule applies. Absence of a match is a valid, expected outcome represented
//! by the sentinel, never an error.
//!
//! Matchers compose sequentially with [`or_else`](Matcher::or_else): the
//! left matcher's result wins when present, otherwise the right matcher is
//! consulted. Chains propagate up to the first success.

use std::fmt;
use std::sync::Arc;

use crate::PathPatterns;

/// Maps a key to a rule identifier, or to the no-match sentinel.
///
/// # Type Parameters
///
/// - `K`: The key type to match against (e.g. `str` for request paths)
/// - `Id`: The rule identifier type
///
/// # Invariant: sentinel, not error
///
/// [`evaluate`](Self::evaluate) never fails for a well-formed key; "no rule
/// applies" is `None`. Implementations must be stateless and side-effect
/// free so concurrent evaluation requires no synchronization.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to support evaluation across
/// concurrent request-handling threads.
pub trait Matcher<K: ?Sized, Id>: Send + Sync {
    /// Evaluate this matcher against the given key.
    ///
    /// Returns the matched rule identifier, or `None` when no rule applies.
    fn evaluate(&self, key: &K) -> Option<Id>;

    /// Evaluate and resolve the sentinel against a fallback.
    ///
    /// Returns the matched identifier, or `fallback` when the result is
    /// the no-match sentinel.
    fn evaluate_or(&self, key: &K, fallback: Id) -> Id {
        self.evaluate(key).unwrap_or(fallback)
    }

    /// Sequential composition with left short-circuit.
    ///
    /// The returned matcher evaluates `self` first. A match from `self` is
    /// returned without evaluating `next`; otherwise `next`'s result is
    /// returned, which may itself be `None`.
    ///
    /// # Invariant: first success wins
    ///
    /// `a.or_else(b).or_else(c)` returns the result of the first matcher in
    /// the chain that matches, and `None` only when all of them miss.
    ///
    /// # Example
    ///
    /// ```
    /// use rategate::prelude::*;
    ///
    /// let narrow = PatternMatcher::new("admin", ExactPatterns::new(["/admin"]));
    /// let wide = PatternMatcher::new("api", PrefixPatterns::new(["/"]));
    ///
    /// let chain = Matcher::<str, &str>::or_else(narrow, wide);
    /// assert_eq!(chain.evaluate("/admin"), Some("admin"));
    /// assert_eq!(chain.evaluate("/users"), Some("api"));
    /// ```
    fn or_else<M>(self, next: M) -> OrElse<Self, M>
    where
        Self: Sized,
        M: Matcher<K, Id>,
    {
        OrElse { first: self, next }
    }
}

/// Shared, type-erased matcher over string keys.
///
/// The value type stored in a [`MatcherRegistry`](crate::MatcherRegistry):
/// cheap to clone, safe to evaluate from many threads.
pub type SharedMatcher<Id> = Arc<dyn Matcher<str, Id>>;

// Boxed, shared, and borrowed matchers delegate to the inner matcher so
// composed chains can mix owned and erased parts.

impl<K: ?Sized, Id, M: Matcher<K, Id> + ?Sized> Matcher<K, Id> for Box<M> {
    fn evaluate(&self, key: &K) -> Option<Id> {
        (**self).evaluate(key)
    }
}

impl<K: ?Sized, Id, M: Matcher<K, Id> + ?Sized> Matcher<K, Id> for Arc<M> {
    fn evaluate(&self, key: &K) -> Option<Id> {
        (**self).evaluate(key)
    }
}

impl<K: ?Sized, Id, M: Matcher<K, Id> + ?Sized> Matcher<K, Id> for &M {
    fn evaluate(&self, key: &K) -> Option<Id> {
        (**self).evaluate(key)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Composition
// ═══════════════════════════════════════════════════════════════════════════════

/// Sequential composition of two matchers, built by [`Matcher::or_else`].
#[derive(Debug, Clone)]
pub struct OrElse<L, R> {
    first: L,
    next: R,
}

impl<K: ?Sized, Id, L, R> Matcher<K, Id> for OrElse<L, R>
where
    L: Matcher<K, Id>,
    R: Matcher<K, Id>,
{
    fn evaluate(&self, key: &K) -> Option<Id> {
        self.first
            .evaluate(key)
            .or_else(|| self.next.evaluate(key))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Concrete Matchers
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches every key with a fixed identifier.
///
/// The usual default matcher: everything not claimed by a specific rule
/// resolves to this id.
#[derive(Debug, Clone)]
pub struct ConstMatcher<Id> {
    id: Id,
}

impl<Id> ConstMatcher<Id> {
    /// Create a matcher that always yields `id`.
    pub fn new(id: Id) -> Self {
        Self { id }
    }
}

impl<K: ?Sized, Id: Clone + Send + Sync> Matcher<K, Id> for ConstMatcher<Id> {
    fn evaluate(&self, _key: &K) -> Option<Id> {
        Some(self.id.clone())
    }
}

/// Matches nothing; always yields the sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverMatcher;

impl<K: ?Sized, Id> Matcher<K, Id> for NeverMatcher {
    fn evaluate(&self, _key: &K) -> Option<Id> {
        None
    }
}

/// Closure adaptor.
///
/// # Example
///
/// ```
/// use rategate::{FnMatcher, Matcher};
///
/// let matcher = FnMatcher::new(|key: &str| key.ends_with(".json").then(|| "json"));
/// assert_eq!(matcher.evaluate("data.json"), Some("json"));
/// assert_eq!(matcher.evaluate("data.xml"), None);
/// ```
#[derive(Clone)]
pub struct FnMatcher<F> {
    f: F,
}

impl<F> FnMatcher<F> {
    /// Wrap a closure as a matcher.
    pub fn new<K: ?Sized, Id>(f: F) -> Self
    where
        F: Fn(&K) -> Option<Id> + Send + Sync,
    {
        Self { f }
    }
}

impl<K: ?Sized, Id, F> Matcher<K, Id> for FnMatcher<F>
where
    F: Fn(&K) -> Option<Id> + Send + Sync,
{
    fn evaluate(&self, key: &K) -> Option<Id> {
        (self.f)(key)
    }
}

impl<F> fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMatcher").finish_non_exhaustive()
    }
}

/// Matches string-like keys against a [`PathPatterns`], yielding a fixed id.
///
/// This is the matcher the scan path builds per target: the target's
/// (possibly combined) pattern set, paired with the target's rule id.
#[derive(Debug, Clone)]
pub struct PatternMatcher<P, Id> {
    id: Id,
    patterns: P,
}

impl<P: PathPatterns, Id> PatternMatcher<P, Id> {
    /// Create a matcher yielding `id` for keys matching `patterns`.
    pub fn new(id: Id, patterns: P) -> Self {
        Self { id, patterns }
    }

    /// Returns the identifier this matcher yields.
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Returns the pattern set this matcher evaluates.
    #[must_use]
    pub fn patterns(&self) -> &P {
        &self.patterns
    }
}

impl<K, P, Id> Matcher<K, Id> for PatternMatcher<P, Id>
where
    K: AsRef<str> + ?Sized,
    P: PathPatterns,
    Id: Clone + Send + Sync,
{
    fn evaluate(&self, key: &K) -> Option<Id> {
        self.patterns
            .matches(key.as_ref())
            .then(|| self.id.clone())
    }
}
