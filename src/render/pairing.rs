use serde::{Deserialize, Serialize};

use crate::core::{Margin, Rect};
use crate::render::{ContainerHandle, SurfaceKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Positioning {
    Relative,
    Absolute,
}

impl Positioning {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
        }
    }
}

/// Anchor name a renderer's vector surface publishes for its pixel overlay.
#[must_use]
pub fn anchor_name_for(slot: usize) -> String {
    format!("--chart-{slot}")
}

/// Alignment contract between one renderer's vector and pixel surfaces.
///
/// The vector surface is an in-flow element carrying `anchor_name`; the pixel
/// surface is absolutely positioned against that anchor, offset by the chart
/// margins so it covers exactly the content box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPairing {
    pub slot: usize,
    pub anchor_name: String,
    pub vector_positioning: Positioning,
    pub pixel_positioning: Positioning,
    pub top_offset: f64,
    pub left_offset: f64,
}

impl LayerPairing {
    #[must_use]
    pub fn for_slot(slot: usize, margin: Margin) -> Self {
        Self {
            slot,
            anchor_name: anchor_name_for(slot),
            vector_positioning: Positioning::Relative,
            pixel_positioning: Positioning::Absolute,
            top_offset: margin.top,
            left_offset: margin.left,
        }
    }

    #[must_use]
    pub fn vector_key(&self) -> SurfaceKey {
        SurfaceKey::vector(self.slot)
    }

    #[must_use]
    pub fn pixel_key(&self) -> SurfaceKey {
        SurfaceKey::pixel(self.slot)
    }

    /// Resolves the pixel surface's box from where the anchor currently sits in
    /// `main`. `None` until the vector surface is attached and anchored.
    #[must_use]
    pub fn resolve(&self, main: &ContainerHandle, content_width: f64, content_height: f64) -> Option<Rect> {
        let anchor = main.anchor_rect(&self.anchor_name)?;
        Some(Rect::new(
            anchor.x + self.left_offset,
            anchor.y + self.top_offset,
            content_width,
            content_height,
        ))
    }

    #[must_use]
    pub fn vector_declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("anchor-name", self.anchor_name.clone()),
            ("position", self.vector_positioning.as_css().to_owned()),
        ]
    }

    #[must_use]
    pub fn pixel_declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position-anchor", self.anchor_name.clone()),
            ("position", self.pixel_positioning.as_css().to_owned()),
            ("top", format!("calc(anchor(top) + {}px)", self.top_offset)),
            ("left", format!("calc(anchor(left) + {}px)", self.left_offset)),
        ]
    }
}
