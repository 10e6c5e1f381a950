//! rategate-test: Test domain for conformance testing
//!
//! Provides scan-target doubles standing in for the external discovery
//! collaborator (an annotation scanner, a route table, a config file — the
//! core never cares which), plus a YAML fixture runner. This is the
//! reference for wiring a discovery layer into a [`MatcherRegistry`].
//!
//! # Example
//!
//! ```
//! use rategate_test::prelude::*;
//!
//! let groups = [TargetGroup::new(ScanTarget::new("api").with_pattern("/api"))
//!     .with_member(ScanTarget::new("users").with_pattern("/api/users"))];
//!
//! let registry = registry_from_groups("default", &groups).unwrap();
//! let matcher = registry.get_or_default("users");
//! assert_eq!(matcher.evaluate("/api/users"), Some("users".to_string()));
//! ```

use rategate::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// A discovered matchable target double: a name and the paths it claims.
///
/// A target without patterns models a discovered unit that carries no rule
/// of its own (it inherits its container's, or falls through to the
/// default).
#[derive(Debug, Clone)]
pub struct ScanTarget {
    name: String,
    patterns: Option<Vec<String>>,
}

impl ScanTarget {
    /// Create a target with no claimed paths.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patterns: None,
        }
    }

    /// Add a claimed path (builder pattern).
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns
            .get_or_insert_with(Vec::new)
            .push(pattern.into());
        self
    }

    /// Returns the target's name, used as its rule id.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the claimed paths, or `None` for a pattern-less target.
    #[must_use]
    pub fn patterns(&self) -> Option<&[String]> {
        self.patterns.as_deref()
    }
}

/// Build a matcher registry from target groups with the standard test
/// providers: the target's name is its id, claimed paths match exactly.
///
/// # Errors
///
/// Returns [`Error::EmptyName`] if a target's name is empty.
pub fn registry_from_groups(
    default_id: &str,
    groups: &[TargetGroup<ScanTarget>],
) -> Result<MatcherRegistry<String>, Error> {
    let registry = MatcherRegistry::with_default_id(default_id.to_string());
    registry.scan(
        groups,
        |target| target.name().to_string(),
        |target| {
            target
                .patterns()
                .map(|patterns| ExactPatterns::new(patterns.iter().cloned()))
        },
    )?;
    Ok(registry)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{registry_from_groups, ScanTarget};
    pub use rategate::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_builder() {
        let target = ScanTarget::new("api").with_pattern("/api").with_pattern("/v2");

        assert_eq!(target.name(), "api");
        assert_eq!(target.patterns().unwrap().len(), 2);
    }

    #[test]
    fn target_without_patterns_reports_none() {
        let target = ScanTarget::new("bare");
        assert!(target.patterns().is_none());
    }

    #[test]
    fn registry_from_groups_registers_by_name() {
        let groups = [TargetGroup::new(ScanTarget::new("api").with_pattern("/api"))];
        let registry = registry_from_groups("default", &groups).unwrap();

        let matcher = registry.get_or_default("api");
        assert_eq!(matcher.evaluate("/api"), Some("api".to_string()));
        assert_eq!(matcher.evaluate("/nope"), None);
    }

    #[test]
    fn member_combines_with_container() {
        let groups = [
            TargetGroup::new(ScanTarget::new("api").with_pattern("/api"))
                .with_member(ScanTarget::new("users").with_pattern("/api/users")),
        ];
        let registry = registry_from_groups("default", &groups).unwrap();

        let matcher = registry.get_or_default("users");
        assert_eq!(matcher.evaluate("/api/users"), Some("users".to_string()));
        assert_eq!(matcher.evaluate("/api"), Some("users".to_string()));
    }
}
