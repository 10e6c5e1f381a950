//! rategate - Registration and matching core for request rate limiting
//!
//! An embeddable layer that associates rate-limit rules with identifiable
//! targets (handler groups, individual handlers, URL paths) and resolves,
//! per request key, which rule governs it.
//!
//! # Architecture
//!
//! - [`Registry<T>`] — named values with a mandatory default fallback;
//!   `get_or_default` is total, so dispatch through a registry never faces
//!   an absent-route failure
//! - [`Matcher<K, Id>`] — pure `key -> Option<rule id>` function with
//!   sequential [`or_else`](Matcher::or_else) chaining (left short-circuit)
//! - [`PathPatterns`] — immutable, combinable pattern sets; combination is
//!   structural concatenation (left operand's patterns first)
//! - [`MatcherRegistry<Id>`] — a registry of matchers populated by scanning
//!   matchable targets through injected id and pattern providers
//!
//! # Key Design Insights
//!
//! 1. **Absence is data, not an error**: a matcher that matches nothing
//!    returns `None`. Chains propagate the sentinel; [`Matcher::evaluate_or`]
//!    resolves it against a fallback id at the end.
//!
//! 2. **Registries always have a default**: construction requires one, so
//!    lookups are infallible on the request hot path.
//!
//! 3. **Matchers and pattern sets are immutable**: share them with [`Arc`],
//!    evaluate them concurrently, no synchronization required.
//!
//! # Example
//!
//! ```
//! use rategate::prelude::*;
//! use std::sync::Arc;
//!
//! // Patterns discovered for a rate-limited handler group.
//! let patterns = ExactPatterns::new(["/reports", "/reports/daily"]);
//!
//! // One matcher per rule id, plus a default for everything else.
//! let registry = MatcherRegistry::with_default_id("default".to_string());
//! registry
//!     .register_matcher(
//!         &"reports".to_string(),
//!         Arc::new(PatternMatcher::new("reports".to_string(), patterns)),
//!     )
//!     .unwrap();
//!
//! // Request time: fetch the chain for a rule set, resolve the governing id.
//! let matcher = registry.get_or_default("reports");
//! assert_eq!(matcher.evaluate_or("/reports", "default".into()), "reports");
//! assert_eq!(matcher.evaluate_or("/other", "default".into()), "default");
//! ```
//!
//! [`Arc`]: std::sync::Arc

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod match_registry;
mod matcher;
mod path_patterns;
mod pattern_spec;
mod registry;

#[cfg(feature = "config")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use match_registry::{MatcherRegistry, TargetGroup};
pub use matcher::{Matcher, OrElse, SharedMatcher};
pub use path_patterns::PathPatterns;
pub use pattern_spec::PatternSpec;
pub use registry::{AccessibleRegistry, InMemoryRegistry, Registry};

// Concrete matchers and pattern sets
pub use matcher::{ConstMatcher, FnMatcher, NeverMatcher, PatternMatcher};
pub use path_patterns::{ExactPatterns, PrefixPatterns, RegexPatterns};

// Config types (feature-gated)
#[cfg(feature = "config")]
pub use config::{RuleConfig, RuleSetConfig};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use rategate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Registries
        AccessibleRegistry,
        // Concrete matchers
        ConstMatcher,
        // Errors
        Error,
        // Pattern sets
        ExactPatterns,
        FnMatcher,
        InMemoryRegistry,
        // Core traits
        Matcher,
        MatcherRegistry,
        NeverMatcher,
        OrElse,
        PathPatterns,
        PatternMatcher,
        // Config-level types
        PatternSpec,
        PrefixPatterns,
        RegexPatterns,
        Registry,
        SharedMatcher,
        TargetGroup,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of patterns in a single pattern set.
///
/// Prevents width-based denial-of-service from configuration: a rule with
/// millions of patterns turns every request-time lookup into a linear scan
/// over all of them. Enforced at config load time via [`PatternSpec::validate`].
pub const MAX_PATTERNS: usize = 256;

/// Maximum length for non-regex patterns (exact, prefix).
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum length for regex patterns.
///
/// Regex compilation is expensive even with the linear-time Rust `regex`
/// crate. Shorter limit than [`MAX_PATTERN_LENGTH`] because regex complexity
/// scales faster than literal matching.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from registry population and pattern construction.
///
/// These errors surface at registration/config load time, never during
/// request-time evaluation. A failed match is not an error — it is the
/// `None` sentinel from [`Matcher::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A registry name was empty.
    EmptyName,
    /// A regex pattern is invalid.
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        source: String,
    },
    /// A pattern set exceeds [`MAX_PATTERNS`].
    TooManyPatterns {
        /// Actual number of patterns.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// A pattern exceeds the maximum allowed length.
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// Configuration deserialization or construction failed.
    InvalidConfig {
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => {
                write!(f, "registry names must be non-empty")
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern \"{pattern}\": {source}")
            }
            Self::TooManyPatterns { count, max } => {
                write!(
                    f,
                    "pattern set has {count} patterns, but maximum allowed is {max}"
                )
            }
            Self::PatternTooLong { len, max } => {
                write!(f, "pattern length is {len}, but maximum allowed is {max}")
            }
            Self::InvalidConfig { source } => {
                write!(f, "invalid config: {source}")
            }
        }
    }
}

impl std::error::Error for Error {}
