use smallvec::SmallVec;

use crate::core::ticks::{DEFAULT_TICK_COUNT, format_linear_tick};
use crate::core::{LinearScale, TimeScale, format_date_tick};
use crate::render::{
    ChartStyle, LayerKind, LayeredRenderFrame, LinePrimitive, TextHAlign, TextPrimitive,
};

pub const TICK_SIZE_INNER: f64 = 6.0;
pub const TICK_SIZE_OUTER: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;
/// Half-pixel shift that keeps 1px strokes crisp on non-retina targets.
pub const PIXEL_OFFSET: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    /// Position along the axis, offset already applied.
    pub position: f64,
    pub label: String,
}

pub type AxisTicks = SmallVec<[AxisTick; 16]>;

/// Retained axis group: tick positions and labels relative to `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGroup {
    pub orientation: AxisOrientation,
    pub origin: (f64, f64),
    pub range: (f64, f64),
    pub ticks: AxisTicks,
}

impl AxisGroup {
    /// Bottom axis with `YYYY-MM-DD` labels.
    #[must_use]
    pub fn bottom(scale: TimeScale, origin: (f64, f64)) -> Self {
        let ticks = scale
            .default_ticks()
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: scale.map(value) + PIXEL_OFFSET,
                label: format_date_tick(value),
            })
            .collect();
        Self {
            orientation: AxisOrientation::Bottom,
            origin,
            range: scale.range(),
            ticks,
        }
    }

    #[must_use]
    pub fn left(scale: LinearScale, origin: (f64, f64)) -> Self {
        let step = scale.tick_step(DEFAULT_TICK_COUNT);
        let ticks = scale
            .default_ticks()
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: scale.map(value) + PIXEL_OFFSET,
                label: format_linear_tick(value, step),
            })
            .collect();
        Self {
            orientation: AxisOrientation::Left,
            origin,
            range: scale.range(),
            ticks,
        }
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|tick| tick.label.as_str()).collect()
    }

    pub fn append_primitives(&self, frame: &mut LayeredRenderFrame, style: &ChartStyle) {
        let (ox, oy) = self.origin;
        let (r0, r1) = (self.range.0 + PIXEL_OFFSET, self.range.1 + PIXEL_OFFSET);
        let line = |x1: f64, y1: f64, x2: f64, y2: f64| {
            LinePrimitive::new(
                ox + x1,
                oy + y1,
                ox + x2,
                oy + y2,
                style.axis_line_width,
                style.axis_line_color,
            )
        };
        let spacing = TICK_SIZE_INNER.max(0.0) + TICK_PADDING;
        let font = style.axis_label_font_size_px;

        match self.orientation {
            AxisOrientation::Bottom => {
                frame.push_line(LayerKind::Axis, line(r0, TICK_SIZE_OUTER, r0, PIXEL_OFFSET));
                frame.push_line(LayerKind::Axis, line(r0, PIXEL_OFFSET, r1, PIXEL_OFFSET));
                frame.push_line(LayerKind::Axis, line(r1, PIXEL_OFFSET, r1, TICK_SIZE_OUTER));
                for tick in &self.ticks {
                    frame.push_line(
                        LayerKind::Axis,
                        line(tick.position, 0.0, tick.position, TICK_SIZE_INNER),
                    );
                    frame.push_text(
                        LayerKind::Axis,
                        TextPrimitive::new(
                            tick.label.clone(),
                            ox + tick.position,
                            oy + spacing,
                            font,
                            style.axis_label_color,
                            TextHAlign::Center,
                        ),
                    );
                }
            }
            AxisOrientation::Left => {
                frame.push_line(LayerKind::Axis, line(-TICK_SIZE_OUTER, r0, PIXEL_OFFSET, r0));
                frame.push_line(LayerKind::Axis, line(PIXEL_OFFSET, r0, PIXEL_OFFSET, r1));
                frame.push_line(LayerKind::Axis, line(PIXEL_OFFSET, r1, -TICK_SIZE_OUTER, r1));
                for tick in &self.ticks {
                    frame.push_line(
                        LayerKind::Axis,
                        line(0.0, tick.position, -TICK_SIZE_INNER, tick.position),
                    );
                    frame.push_text(
                        LayerKind::Axis,
                        TextPrimitive::new(
                            tick.label.clone(),
                            ox - spacing,
                            oy + tick.position - font / 2.0,
                            font,
                            style.axis_label_color,
                            TextHAlign::Right,
                        ),
                    );
                }
            }
        }
    }
}
