//! Configuration loading and management

use crate::core::category::{CategoryStyle, CategoryStyles};
use crate::core::error::ConfigError;
use crate::core::facility::Coordinate;
use crate::core::proximity::DEFAULT_RADIUS;
use serde::{Deserialize, Serialize};

/// Default collection key of the facility records
pub const DEFAULT_COLLECTION_KEY: &str = "ordo_facilities";

/// Initial map position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::new(28.0, 3.0),
            zoom: 5,
        }
    }
}

/// Style override for one facility `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// The `type` value to style, or `default` for the fallback
    pub name: String,
    pub icon: String,
    pub color: String,
    pub background: String,
}

/// Complete configuration of the map core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Key of the collection holding facility records
    pub collection_key: String,

    /// Proximity radius in raw degrees
    pub proximity_radius: f64,

    /// Map position before any interaction
    pub initial_view: ViewConfig,

    /// Zoom used when focusing a facility from the list
    pub focus_zoom: u8,

    /// Zoom used when centering on the user's location
    pub locate_zoom: u8,

    /// Style overrides applied on top of the built-in category table
    pub categories: Vec<CategoryConfig>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            collection_key: DEFAULT_COLLECTION_KEY.to_string(),
            proximity_radius: DEFAULT_RADIUS,
            initial_view: ViewConfig::default(),
            focus_zoom: 15,
            locate_zoom: 12,
            categories: Vec::new(),
        }
    }
}

impl MapConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// Missing keys take their default value.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Create the default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Reject values the core cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "collection_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if !(self.proximity_radius.is_finite() && self.proximity_radius > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "proximity_radius".to_string(),
                message: format!("must be a positive number, got {}", self.proximity_radius),
            });
        }

        Ok(())
    }

    /// Build the style lookup table from the configured overrides
    pub fn category_styles(&self) -> CategoryStyles {
        let mut styles = CategoryStyles::new();
        for category in &self.categories {
            styles.insert(
                category.name.clone(),
                CategoryStyle::new(&category.icon, &category.color, &category.background),
            );
        }
        styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MapConfig::default_config();

        assert_eq!(config.collection_key, "ordo_facilities");
        assert_eq!(config.proximity_radius, 0.5);
        assert_eq!(config.initial_view.center, Coordinate::new(28.0, 3.0));
        assert_eq!(config.focus_zoom, 15);
        assert_eq!(config.locate_zoom, 12);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = MapConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = MapConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = MapConfig::from_yaml_str(
            r##"
proximity_radius: 0.25
categories:
  - name: clinic
    icon: fas fa-stethoscope
    color: "#e53935"
    background: "#ffebee"
"##,
        )
        .unwrap();

        assert_eq!(config.proximity_radius, 0.25);
        assert_eq!(config.collection_key, "ordo_facilities");
        assert_eq!(config.category_styles().resolve("clinic").icon, "fas fa-stethoscope");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = MapConfig::from_yaml_str("proximity_radius: -1").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "proximity_radius"));

        let err = MapConfig::from_yaml_str("collection_key: '  '").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = MapConfig::from_yaml_str("focus_zoom: [1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = MapConfig::from_yaml_file("/nonexistent/ordo.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
