use serde::{Deserialize, Serialize};

use crate::core::ChartLayout;
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomConfig;
use crate::render::ChartStyle;

pub const DEFAULT_COST_UNIT_LABEL: &str = "$ CAD";

/// Construction-time configuration for [`super::ChartCollection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartCollectionConfig {
    #[serde(default)]
    pub layout: ChartLayout,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub style: ChartStyle,
    /// Unit label forced onto every cost chart, whatever the series unit.
    #[serde(default = "default_cost_unit_label")]
    pub cost_unit_label: String,
}

impl Default for ChartCollectionConfig {
    fn default() -> Self {
        Self::new(ChartLayout::default())
    }
}

impl ChartCollectionConfig {
    #[must_use]
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            zoom: ZoomConfig::default(),
            style: ChartStyle::default(),
            cost_unit_label: default_cost_unit_label(),
        }
    }

    /// Layout for a host of the given width, everything else default.
    #[must_use]
    pub fn for_host_width(outer_width: f64) -> Self {
        Self::new(ChartLayout::new(outer_width))
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_cost_unit_label(mut self, label: impl Into<String>) -> Self {
        self.cost_unit_label = label.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.layout.validate()?;
        self.zoom.validate()?;
        self.style.validate()?;
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_cost_unit_label() -> String {
    DEFAULT_COST_UNIT_LABEL.to_owned()
}

#[cfg(test)]
mod tests {
    use super::ChartCollectionConfig;

    #[test]
    fn sparse_json_fills_defaults() {
        let config =
            ChartCollectionConfig::from_json_str(r#"{"layout":{"outer_width":800.0}}"#)
                .expect("parse");
        assert_eq!(config.layout.content_width(), 650.0);
        assert_eq!(config.layout.content_height(), 150.0);
        assert_eq!(config.cost_unit_label, "$ CAD");
        assert_eq!(config.zoom.max_scale, 100.0);
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        let err = ChartCollectionConfig::from_json_str("{").expect_err("must fail");
        assert!(err.to_string().contains("failed to parse config"));
    }
}
