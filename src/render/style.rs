use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Visual parameters shared by every chart of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub series_line_color: Color,
    pub series_line_width: f64,
    /// Fill of the pixel surface behind the plotted line.
    pub plot_background_color: Color,
    pub axis_line_color: Color,
    pub axis_line_width: f64,
    pub axis_label_color: Color,
    pub axis_label_font_size_px: f64,
    pub title_color: Color,
    pub title_font_size_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            series_line_color: Color::from_hex(0xff0000),
            series_line_width: 10.0,
            plot_background_color: Color::from_hex(0xcccccc),
            axis_line_color: Color::BLACK,
            axis_line_width: 1.0,
            axis_label_color: Color::BLACK,
            axis_label_font_size_px: 10.0,
            title_color: Color::BLACK,
            title_font_size_px: 12.0,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.series_line_color,
            self.plot_background_color,
            self.axis_line_color,
            self.axis_label_color,
            self.title_color,
        ] {
            color.validate()?;
        }
        for (name, width) in [
            ("series_line_width", self.series_line_width),
            ("axis_line_width", self.axis_line_width),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
            ("title_font_size_px", self.title_font_size_px),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}
