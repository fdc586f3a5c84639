//! Dashboard configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! category_order = "sorted"
//!
//! [sankey]
//! width = 620.0
//! height = 250.0
//! node_width = 15.0
//! node_padding = 10.0
//! align = "justify"
//! link_order = "by_opposite_node"
//! ```

use crate::error::ConfigError;
use salviz_flow::LayoutConfig;
use salviz_rollup::CategoryOrder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dashboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Sankey layout geometry
    pub sankey: LayoutConfig,
    /// Order of categories in rollups and flow tiers
    pub category_order: CategoryOrder,
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With Sankey layout settings
    #[inline]
    #[must_use]
    pub fn with_sankey(mut self, sankey: LayoutConfig) -> Self {
        self.sankey = sankey;
        self
    }

    /// With category ordering
    #[inline]
    #[must_use]
    pub fn with_category_order(mut self, order: CategoryOrder) -> Self {
        self.category_order = order;
        self
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Malformed TOML, unknown keys, or unusable geometry.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Unreadable file or any [`DashboardConfig::from_toml_str`] error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the settings are usable
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] for a non-positive extent, negative padding
    /// and similar geometry problems.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sankey.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use salviz_flow::{LinkOrder, VerticalAlign};

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(DashboardConfig::from_toml_str("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn partial_sankey_section_keeps_other_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            category_order = "sorted"

            [sankey]
            height = 400.0
            align = "justify"
            link_order = "by_opposite_node"
            "#,
        )
        .unwrap();

        assert_eq!(config.category_order, CategoryOrder::Sorted);
        assert_eq!(config.sankey.height, 400.0);
        assert_eq!(config.sankey.width, 620.0);
        assert_eq!(config.sankey.node_width, 15.0);
        assert_eq!(config.sankey.align, VerticalAlign::Justify);
        assert_eq!(config.sankey.link_order, LinkOrder::ByOppositeNode);
    }

    #[test]
    fn rejects_unusable_geometry() {
        for text in [
            "[sankey]\nwidth = 0.0",
            "[sankey]\nheight = -5.0",
            "[sankey]\nnode_padding = -1.0",
        ] {
            assert!(
                matches!(DashboardConfig::from_toml_str(text), Err(ConfigError::Invalid(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            DashboardConfig::from_toml_str("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn builder_methods() {
        let config = DashboardConfig::new()
            .with_category_order(CategoryOrder::Sorted)
            .with_sankey(LayoutConfig::default().with_extent(800.0, 300.0));
        assert_eq!(config.sankey.width, 800.0);
        assert!(config.validate().is_ok());
    }
}
