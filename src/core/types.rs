use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of a raster target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned box in host pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            bottom: 100.0,
            left: 100.0,
            right: 50.0,
        }
    }
}

/// Geometry shared by every chart of a collection.
///
/// `outer_width` is the host width (the window width for a full-bleed page);
/// the plotted content box is what remains after the margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub outer_width: f64,
    #[serde(default = "default_base_height")]
    pub base_height: f64,
    #[serde(default)]
    pub margin: Margin,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::new(1280.0)
    }
}

impl ChartLayout {
    #[must_use]
    pub fn new(outer_width: f64) -> Self {
        Self {
            outer_width,
            base_height: default_base_height(),
            margin: Margin::default(),
        }
    }

    #[must_use]
    pub fn content_width(self) -> f64 {
        self.outer_width - self.margin.left - self.margin.right
    }

    #[must_use]
    pub fn content_height(self) -> f64 {
        self.base_height - self.margin.top - self.margin.bottom
    }

    #[must_use]
    pub fn outer_height(self) -> f64 {
        self.content_height() + self.margin.top + self.margin.bottom
    }

    /// Content rectangle in the chart's own coordinates (origin at the content corner).
    #[must_use]
    pub fn content_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.content_width(), self.content_height())
    }

    #[must_use]
    pub fn outer_viewport(self) -> Viewport {
        Viewport::new(
            self.outer_width.max(0.0).ceil() as u32,
            self.outer_height().max(0.0).ceil() as u32,
        )
    }

    pub fn validate(self) -> ChartResult<Self> {
        let width = self.content_width();
        let height = self.content_height();
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidViewport { width, height });
        }
        for (side, value) in [
            ("top", self.margin.top),
            ("bottom", self.margin.bottom),
            ("left", self.margin.left),
            ("right", self.margin.right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

fn default_base_height() -> f64 {
    300.0
}
