//! Engine configuration.
//!
//! Configuration is plain data: the embedding service loads it (usually from
//! JSON), validates it once and hands it to [`crate::TransformEngine`].
//! Missing fields take the values in [`crate::defaults`].

use serde::{Deserialize, Serialize};
use stitch_syntax::TraversalLimits;
use thiserror::Error;

use crate::defaults;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration text is not valid JSON for [`EngineConfig`].
    #[error("failed to parse engine configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the engine cannot work with.
    #[error("invalid engine configuration: {field} {message}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Settings for position-based lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PositionConfig {
    /// Maximum byte distance between the hint and an element start.
    pub tolerance_bytes: usize,
    /// Accept any element starting on the hinted line, however far away.
    pub same_line: bool,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            tolerance_bytes: defaults::default_position_tolerance(),
            same_line: defaults::enabled(),
        }
    }
}

/// Settings for text-based lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TextConfig {
    /// Lowest accepted similarity (shorter length over longer length) for a
    /// containment match.
    pub similarity_floor: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            similarity_floor: defaults::default_similarity_floor(),
        }
    }
}

/// Settings for the data-source fallback of text edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DataSourceConfig {
    /// Search string literals when no markup text matches.
    pub enabled: bool,
    /// Rank literals inside array literals first.
    pub prefer_array_literals: bool,
    /// Re-case replacement text to match a case-insensitive hit.
    pub preserve_case: bool,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            prefer_array_literals: defaults::enabled(),
            preserve_case: defaults::enabled(),
        }
    }
}

/// Configuration for [`crate::TransformEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineConfig {
    /// Marker attribute carrying stable element ids. It can never be edited.
    pub stable_id_attribute: String,
    /// Class attribute names in lookup order; the first is used when a class
    /// attribute has to be created.
    pub class_attributes: Vec<String>,
    /// Position lookup settings.
    pub position: PositionConfig,
    /// Text lookup settings.
    pub text: TextConfig,
    /// Data-source fallback settings.
    pub data_source: DataSourceConfig,
    /// Traversal depth ceiling.
    pub max_traversal_depth: usize,
    /// Express style edits as utility classes where a mapping exists.
    pub prefer_utility_classes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stable_id_attribute: defaults::default_stable_id_attribute(),
            class_attributes: defaults::default_class_attributes(),
            position: PositionConfig::default(),
            text: TextConfig::default(),
            data_source: DataSourceConfig::default(),
            max_traversal_depth: defaults::default_max_traversal_depth(),
            prefer_utility_classes: defaults::enabled(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a similarity floor outside
    /// `0.0..=1.0`, a zero depth ceiling, an empty stable-id attribute or an
    /// empty class attribute list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.text.similarity_floor) {
            return Err(ConfigError::invalid(
                "text.similarity_floor",
                format!("must be within 0.0..=1.0, got {}", self.text.similarity_floor),
            ));
        }
        if self.max_traversal_depth == 0 {
            return Err(ConfigError::invalid(
                "max_traversal_depth",
                "must be greater than zero",
            ));
        }
        if self.stable_id_attribute.trim().is_empty() {
            return Err(ConfigError::invalid("stable_id_attribute", "must not be empty"));
        }
        if self.class_attributes.iter().all(|name| name.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "class_attributes",
                "must name at least one attribute",
            ));
        }
        Ok(())
    }

    /// Returns the traversal bounds implied by this configuration.
    #[must_use]
    pub const fn limits(&self) -> TraversalLimits {
        TraversalLimits::with_max_depth(self.max_traversal_depth)
    }

    /// Returns the attribute used when a class list has to be created.
    #[must_use]
    pub fn primary_class_attribute(&self) -> &str {
        self.class_attributes
            .iter()
            .find(|name| !name.trim().is_empty())
            .map_or(defaults::DEFAULT_CLASS_ATTRIBUTE, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_json_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").expect("config");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.stable_id_attribute, "data-stitch-id");
        assert_eq!(config.position.tolerance_bytes, 50);
        assert_eq!(config.primary_class_attribute(), "className");
    }

    #[test]
    fn nested_sections_override_single_fields() {
        let config = EngineConfig::from_json_str(
            r#"{"position": {"tolerance_bytes": 10}, "prefer_utility_classes": false}"#,
        )
        .expect("config");
        assert_eq!(config.position.tolerance_bytes, 10);
        assert!(config.position.same_line);
        assert!(!config.prefer_utility_classes);
    }

    #[rstest]
    #[case(r#"{"text": {"similarity_floor": 1.5}}"#, "text.similarity_floor")]
    #[case(r#"{"max_traversal_depth": 0}"#, "max_traversal_depth")]
    #[case(r#"{"stable_id_attribute": " "}"#, "stable_id_attribute")]
    #[case(r#"{"class_attributes": []}"#, "class_attributes")]
    fn rejects_unusable_values(#[case] json: &str, #[case] expected: &str) {
        match EngineConfig::from_json_str(json) {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            EngineConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
