//! Config types for rule-driven registry construction.
//!
//! These types mirror the runtime registry but are serde-deserializable,
//! enabling registry population from JSON/YAML rule sets via
//! [`MatcherRegistry::from_config()`].
//!
//! The core stays parsing-agnostic: callers deserialize with whatever
//! serde format their ecosystem uses and hand over the structs. A JSON
//! convenience loader ([`RuleSetConfig::from_json`]) is provided for hosts
//! that carry rule sets as opaque blobs.

use serde::Deserialize;

use crate::{Error, MatcherRegistry, PatternSpec};

/// Configuration for a full [`MatcherRegistry`].
///
/// ```yaml
/// default_id: default
/// rules:
///   - id: api
///     patterns:
///       Prefix: ["/api/"]
///   - id: reports
///     patterns:
///       Exact: ["/reports", "/reports/daily"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetConfig {
    /// The rule id the default matcher resolves for unmatched keys.
    pub default_id: String,

    /// Rules to register, in order. Duplicate ids follow registry
    /// semantics: last wins.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Configuration for one rule: an id and the pattern set that claims keys
/// for it.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// The rule id; also the registry name the matcher registers under.
    pub id: String,

    /// The pattern set specification.
    pub patterns: PatternSpec,
}

impl RuleSetConfig {
    /// Parse a rule set from a JSON string.
    ///
    /// Convenience for hosts that carry rule sets as JSON blobs; YAML and
    /// other formats deserialize through serde directly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig {
            source: e.to_string(),
        })
    }
}

impl MatcherRegistry<String> {
    /// Build a registry from a deserialized rule set.
    ///
    /// Each rule compiles through [`PatternSpec::to_matcher`] with the
    /// same limit validation as the scan path.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyName`] — a rule id is empty
    /// - [`Error::InvalidPattern`] — a regex pattern fails to compile
    /// - [`Error::TooManyPatterns`] / [`Error::PatternTooLong`] — limit
    ///   violations
    pub fn from_config(config: &RuleSetConfig) -> Result<Self, Error> {
        let registry = Self::with_default_id(config.default_id.clone());
        for rule in &config.rules {
            let matcher = rule.patterns.to_matcher(rule.id.clone())?;
            registry.register_matcher(&rule.id, matcher)?;
        }
        Ok(registry)
    }
}
