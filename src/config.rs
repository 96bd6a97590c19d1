//! Resolver configuration
//!
//! Which strategies run on which host versions, and which legacy member names
//! the introspection strategy reads. Everything has a default, so an empty
//! TOML document is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;
use crate::strategies::StrategyKind;

/// A strategy and the lowest host version it is enabled on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRule {
    pub kind: StrategyKind,
    #[serde(default)]
    pub min_version: f64,
}

impl StrategyRule {
    /// Create a rule
    pub fn new(kind: StrategyKind, min_version: f64) -> Self {
        Self { kind, min_version }
    }
}

fn default_strategies() -> Vec<StrategyRule> {
    vec![
        StrategyRule::new(StrategyKind::Structured, 18.0),
        StrategyRule::new(StrategyKind::LegacyText, 17.1),
        StrategyRule::new(StrategyKind::Introspection, 0.0),
    ]
}

/// Member names of the internal display object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFieldNames {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub frame: String,
    pub show_toast: String,
    pub announce_to_chat: String,
    pub hidden: String,
    pub x: String,
    pub y: String,
}

impl Default for DisplayFieldNames {
    fn default() -> Self {
        Self {
            title: "a".to_string(),
            description: "b".to_string(),
            icon: "c".to_string(),
            frame: "e".to_string(),
            show_toast: "f".to_string(),
            announce_to_chat: "g".to_string(),
            hidden: "h".to_string(),
            x: "i".to_string(),
            y: "j".to_string(),
        }
    }
}

/// Member names that differ on a range of host versions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldNameOverride {
    #[serde(default)]
    pub min_version: f64,
    /// Exclusive upper bound
    #[serde(default)]
    pub max_version: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub frame: Option<String>,
    #[serde(default)]
    pub show_toast: Option<String>,
    #[serde(default)]
    pub announce_to_chat: Option<String>,
    #[serde(default)]
    pub hidden: Option<String>,
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub y: Option<String>,
}

impl FieldNameOverride {
    fn applies_to(&self, version: f64) -> bool {
        version >= self.min_version && self.max_version.map_or(true, |max| version < max)
    }

    fn apply(&self, names: &mut DisplayFieldNames) {
        let pairs = [
            (&self.title, &mut names.title),
            (&self.description, &mut names.description),
            (&self.icon, &mut names.icon),
            (&self.frame, &mut names.frame),
            (&self.show_toast, &mut names.show_toast),
            (&self.announce_to_chat, &mut names.announce_to_chat),
            (&self.hidden, &mut names.hidden),
            (&self.x, &mut names.x),
            (&self.y, &mut names.y),
        ];
        for (replacement, slot) in pairs {
            if let Some(name) = replacement {
                *slot = name.clone();
            }
        }
    }
}

/// Introspection strategy settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    pub field_names: DisplayFieldNames,
    pub overrides: Vec<FieldNameOverride>,
}

impl IntrospectionConfig {
    /// Field names for a host version; matching overrides apply in order
    pub fn field_names_for(&self, version: f64) -> DisplayFieldNames {
        let mut names = self.field_names.clone();
        for rule in self.overrides.iter().filter(|o| o.applies_to(version)) {
            rule.apply(&mut names);
        }
        names
    }
}

/// Full resolver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Strategies in preference order
    pub strategies: Vec<StrategyRule>,
    pub introspection: IntrospectionConfig,
    /// Description used when the host has none
    pub fallback_description: String,
    /// Default line width for wrapped descriptions
    pub description_width: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
            introspection: IntrospectionConfig::default(),
            fallback_description: "No description.".to_string(),
            description_width: 35,
        }
    }
}

impl ResolverConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ResolverConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded resolver config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the resolver cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for rule in &self.strategies {
            if !seen.insert(rule.kind) {
                return Err(ConfigError::Invalid(format!("strategy {} listed twice", rule.kind)));
            }
            if !rule.min_version.is_finite() || rule.min_version < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "strategy {} has invalid min_version {}",
                    rule.kind, rule.min_version
                )));
            }
        }
        if self.fallback_description.trim().is_empty() {
            return Err(ConfigError::Invalid("fallback_description must not be empty".to_string()));
        }
        if self.description_width == 0 {
            return Err(ConfigError::Invalid("description_width must be positive".to_string()));
        }
        Ok(())
    }

    /// Strategies enabled on `version`, in preference order
    ///
    /// Each kind appears at most once, at its first enabled position, even
    /// when a configuration built in code lists it twice.
    pub fn strategies_for(&self, version: f64) -> Vec<StrategyKind> {
        let mut seen = HashSet::new();
        self.strategies
            .iter()
            .filter(|rule| version >= rule.min_version)
            .map(|rule| rule.kind)
            .filter(|kind| seen.insert(*kind))
            .collect()
    }
}
