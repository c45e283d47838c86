//! Boilerplate removal for scraped Markdown.
//!
//! Rules are applied in order, each deleting every match of its pattern.
//! Patterns are compiled with `.` matching newlines so a single rule can
//! span a multi-line footer or banner.

use crate::utils::toml_config::{default_cleanup_rules, CleanupRuleConfig, ConfigError};
use regex::{Regex, RegexBuilder};

/// A single named removable-pattern rule.
#[derive(Debug, Clone)]
pub struct CleanupRule {
    name: String,
    pattern: Regex,
}

impl CleanupRule {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        let pattern = RegexBuilder::new(pattern)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                name: name.clone(),
                source,
            })?;
        Ok(Self { name, pattern })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, "").into_owned()
    }
}

/// Ordered rule set applied to every scraped page.
#[derive(Debug, Clone, Default)]
pub struct CleanupRules {
    rules: Vec<CleanupRule>,
}

impl CleanupRules {
    pub fn new(rules: Vec<CleanupRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(rules: &[CleanupRuleConfig]) -> Result<Self, ConfigError> {
        rules
            .iter()
            .map(|rule| CleanupRule::new(rule.name.clone(), &rule.pattern))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// The newsletter-footer and storefront-banner rules.
    pub fn defaults() -> Self {
        // The default patterns are literals and always compile.
        Self::from_config(&default_cleanup_rules()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(CleanupRule::name)
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}
