//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the rategate engine. A
//! fixture carries one rule set plus cases mapping request keys to the
//! rule id expected to govern them.

use std::sync::Arc;

use rategate::prelude::*;
use rategate::RuleSetConfig;
use serde::Deserialize;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rule_set: RuleSetConfig,
    pub cases: Vec<TestCase>,
}

/// Test case: a request key and the rule id expected to govern it
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub key: String,
    pub expect: String,
}

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

impl Fixture {
    /// Parse a fixture from YAML
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_yaml` error on malformed input.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_yaml` error on malformed input.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Resolve a key the way the request integration does: each rule's
    /// matcher is tried in configuration order, falling through to the
    /// default matcher.
    fn resolve(&self, registry: &MatcherRegistry<String>, key: &str) -> String {
        let mut chain: SharedMatcher<String> = registry.default_value();
        for rule in self.rule_set.rules.iter().rev() {
            chain = Arc::new(registry.get_or_default(&rule.id).or_else(chain));
        }
        chain.evaluate_or(key, self.rule_set.default_id.clone())
    }

    /// Run all test cases and return results
    ///
    /// # Errors
    ///
    /// Returns the registry construction error if the rule set is invalid.
    pub fn run(&self) -> Result<Vec<CaseResult>, Error> {
        let registry = MatcherRegistry::from_config(&self.rule_set)?;
        Ok(self
            .cases
            .iter()
            .map(|case| {
                let actual = self.resolve(&registry, &case.key);
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect,
                    expected: case.expect.clone(),
                    actual,
                }
            })
            .collect())
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to load: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}, got {:?}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_fixture() {
        let yaml = r#"
name: basic
description: exact rule resolution
rule_set:
  default_id: default
  rules:
    - id: api
      patterns:
        Exact: ["/api"]
cases:
  - name: hit
    key: /api
    expect: api
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        assert_eq!(fixture.name, "basic");
        assert_eq!(fixture.cases.len(), 1);
        fixture.run_and_assert();
    }

    #[test]
    fn parses_multi_document_yaml() {
        let yaml = r#"
name: first
rule_set:
  default_id: default
cases: []
---
name: second
rule_set:
  default_id: default
cases: []
"#;
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[1].name, "second");
    }

    #[test]
    fn unmatched_key_resolves_default_id() {
        let yaml = r#"
name: fallback
rule_set:
  default_id: open
  rules:
    - id: closed
      patterns:
        Exact: ["/closed"]
cases:
  - name: miss
    key: /elsewhere
    expect: open
"#;
        Fixture::from_yaml(yaml).unwrap().run_and_assert();
    }
}
