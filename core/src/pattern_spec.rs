//! `PatternSpec` — config-level pattern specification
//!
//! This type represents a rule author's *intent* for path matching (e.g.
//! "prefix match on /api"). It compiles to a runtime [`PatternMatcher`]
//! via [`to_matcher()`](PatternSpec::to_matcher), validating size limits at
//! compile time rather than on the request hot path.

use std::fmt;
use std::sync::Arc;

use crate::{
    Error, ExactPatterns, PatternMatcher, PrefixPatterns, RegexPatterns, SharedMatcher,
    MAX_PATTERNS, MAX_PATTERN_LENGTH, MAX_REGEX_PATTERN_LENGTH,
};

/// A pattern set specification from rule configuration.
///
/// Represents one of three matching strategies. Compiles to the matching
/// runtime pattern set via [`to_matcher()`](Self::to_matcher).
///
/// # Example
///
/// ```
/// use rategate::{Matcher, PatternSpec};
///
/// let spec = PatternSpec::Prefix(vec!["/api/".into()]);
/// let matcher = spec.to_matcher("api").unwrap();
///
/// assert_eq!(matcher.evaluate("/api/users"), Some("api"));
/// assert_eq!(matcher.evaluate("/admin"), None);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternSpec {
    /// Candidate equals some pattern.
    Exact(Vec<String>),
    /// Candidate starts with some pattern.
    Prefix(Vec<String>),
    /// Candidate matches some regex (Rust `regex` crate syntax, linear time).
    Regex(Vec<String>),
}

impl PatternSpec {
    /// Validate this spec against the configured size limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyPatterns`] if the set exceeds
    /// [`MAX_PATTERNS`], or [`Error::PatternTooLong`] if a pattern exceeds
    /// its strategy's length limit.
    pub fn validate(&self) -> Result<(), Error> {
        let (patterns, max_len) = match self {
            Self::Exact(p) | Self::Prefix(p) => (p, MAX_PATTERN_LENGTH),
            Self::Regex(p) => (p, MAX_REGEX_PATTERN_LENGTH),
        };
        if patterns.len() > MAX_PATTERNS {
            return Err(Error::TooManyPatterns {
                count: patterns.len(),
                max: MAX_PATTERNS,
            });
        }
        for pattern in patterns {
            if pattern.len() > max_len {
                return Err(Error::PatternTooLong {
                    len: pattern.len(),
                    max: max_len,
                });
            }
        }
        Ok(())
    }

    /// Compile this spec into a shared matcher yielding `id` on match.
    ///
    /// # Errors
    ///
    /// Returns the [`validate`](Self::validate) errors, plus
    /// [`Error::InvalidPattern`] if a regex fails to compile.
    pub fn to_matcher<Id>(&self, id: Id) -> Result<SharedMatcher<Id>, Error>
    where
        Id: Clone + Send + Sync + 'static,
    {
        self.validate()?;
        Ok(match self {
            Self::Exact(p) => Arc::new(PatternMatcher::new(
                id,
                ExactPatterns::new(p.iter().cloned()),
            )),
            Self::Prefix(p) => Arc::new(PatternMatcher::new(
                id,
                PrefixPatterns::new(p.iter().cloned()),
            )),
            Self::Regex(p) => Arc::new(PatternMatcher::new(
                id,
                RegexPatterns::new(p.iter().cloned())?,
            )),
        })
    }
}

impl fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(p) => write!(f, "Exact({p:?})"),
            Self::Prefix(p) => write!(f, "Prefix({p:?})"),
            Self::Regex(p) => write!(f, "Regex({p:?})"),
        }
    }
}
