//! `PathPatterns` — immutable, combinable pattern sets
//!
//! A pattern set describes the request paths one matchable unit claims
//! (e.g. the paths of a handler group, or of one handler inside it).
//! Pattern syntax is opaque to the core: each implementation defines its
//! own membership test. What the core guarantees is structural combination:
//! combining two sets concatenates their pattern sequences, left operand's
//! patterns first.

use regex::Regex;

use crate::{Error, MAX_REGEX_PATTERN_LENGTH};

/// An immutable, ordered set of patterns with a membership test.
///
/// # Invariants
///
/// - An empty pattern set matches nothing.
/// - The membership test is consistent with what [`patterns`](Self::patterns)
///   reports: only the listed patterns participate in matching.
/// - [`combine`](Self::combine) concatenates (left patterns first); it is
///   associative in effect but not commutative.
///
/// Combination is structural, not automatically logical AND/OR — each
/// implementation documents its predicate over the merged set. All built-in
/// implementations match when *any* pattern in the set matches.
pub trait PathPatterns: Send + Sync {
    /// Returns the ordered pattern sequence.
    fn patterns(&self) -> &[String];

    /// Returns `true` iff `candidate` satisfies the pattern set.
    fn matches(&self, candidate: &str) -> bool;

    /// Returns a new set whose pattern sequence is `self` ++ `other`.
    #[must_use]
    fn combine(&self, other: &Self) -> Self
    where
        Self: Sized;
}

/// Matches when the candidate equals any pattern.
///
/// # Example
///
/// ```
/// use rategate::{ExactPatterns, PathPatterns};
///
/// let patterns = ExactPatterns::new(["/orders", "/orders/recent"]);
/// assert!(patterns.matches("/orders"));
/// assert!(!patterns.matches("/orders/123")); // no prefix semantics
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExactPatterns {
    patterns: Vec<String>,
}

impl ExactPatterns {
    /// Create an exact-match pattern set.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

impl PathPatterns for ExactPatterns {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p == candidate)
    }

    fn combine(&self, other: &Self) -> Self {
        let mut patterns = self.patterns.clone();
        patterns.extend(other.patterns.iter().cloned());
        Self { patterns }
    }
}

/// Matches when the candidate starts with any pattern.
///
/// Plain prefix semantics: `/order` matches `/orders` too. Callers that
/// need segment-boundary matching should encode the trailing `/` in the
/// pattern or use [`RegexPatterns`].
#[derive(Debug, Clone, Default)]
pub struct PrefixPatterns {
    patterns: Vec<String>,
}

impl PrefixPatterns {
    /// Create a prefix-match pattern set.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

impl PathPatterns for PrefixPatterns {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| candidate.starts_with(p.as_str()))
    }

    fn combine(&self, other: &Self) -> Self {
        let mut patterns = self.patterns.clone();
        patterns.extend(other.patterns.iter().cloned());
        Self { patterns }
    }
}

/// Matches when the candidate matches any compiled regex.
///
/// Patterns compile with the linear-time `regex` crate and are unanchored:
/// anchor with `^`/`$` where full-path matching is intended.
///
/// # Example
///
/// ```
/// use rategate::{PathPatterns, RegexPatterns};
///
/// let patterns = RegexPatterns::new([r"^/users/\d+$"]).unwrap();
/// assert!(patterns.matches("/users/42"));
/// assert!(!patterns.matches("/users/alice"));
/// ```
#[derive(Debug, Clone)]
pub struct RegexPatterns {
    patterns: Vec<String>,
    compiled: Vec<Regex>,
}

impl RegexPatterns {
    /// Create a regex pattern set, compiling each pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if a pattern fails to compile, and
    /// [`Error::PatternTooLong`] if a pattern exceeds
    /// [`MAX_REGEX_PATTERN_LENGTH`].
    pub fn new<I, S>(patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in &patterns {
            if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
                return Err(Error::PatternTooLong {
                    len: pattern.len(),
                    max: MAX_REGEX_PATTERN_LENGTH,
                });
            }
            let regex = Regex::new(pattern).map_err(|e| Error::InvalidPattern {
                pattern: pattern.clone(),
                source: e.to_string(),
            })?;
            compiled.push(regex);
        }
        Ok(Self { patterns, compiled })
    }
}

impl PathPatterns for RegexPatterns {
    fn patterns(&self) -> &[String] {
        &self.patterns
    }

    fn matches(&self, candidate: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(candidate))
    }

    fn combine(&self, other: &Self) -> Self {
        let mut patterns = self.patterns.clone();
        patterns.extend(other.patterns.iter().cloned());
        let mut compiled = self.compiled.clone();
        compiled.extend(other.compiled.iter().cloned());
        Self { patterns, compiled }
    }
}
