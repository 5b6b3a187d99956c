use crate::core::{ChartLayout, LinearScale, TimeScale};
use crate::render::{
    AxisGroup, ChartStyle, Color, LayerKind, LayeredRenderFrame, LinePrimitive, RectPrimitive,
    TextHAlign, TextPrimitive,
};

/// Offset of the title baseline below the content box.
pub const TITLE_OFFSET_Y: f64 = 40.0;
/// Distance of the rotated unit label left of the content box.
pub const UNIT_OFFSET_X: f64 = 60.0;

/// Retained vector layer: axes, title and unit label.
///
/// Coordinates of its groups are in outer-chart space; the content box starts
/// at `(margin.left, margin.top)`.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSurface {
    layout: ChartLayout,
    title: Option<String>,
    unit: Option<String>,
    x_axis: Option<AxisGroup>,
    y_axis: Option<AxisGroup>,
}

impl VectorSurface {
    #[must_use]
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            title: None,
            unit: None,
            x_axis: None,
            y_axis: None,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.layout.outer_width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.layout.outer_height()
    }

    pub fn set_labels(&mut self, title: &str, unit: &str) {
        self.title = Some(title.to_owned());
        self.unit = Some(unit.to_owned());
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Replaces both axis groups. The time axis sits on the content bottom.
    pub fn set_axes(&mut self, time: TimeScale, value: LinearScale) {
        let left = self.layout.margin.left;
        let top = self.layout.margin.top;
        self.x_axis = Some(AxisGroup::bottom(
            time,
            (left, top + self.layout.content_height()),
        ));
        self.y_axis = Some(AxisGroup::left(value, (left, top)));
    }

    #[must_use]
    pub fn x_axis(&self) -> Option<&AxisGroup> {
        self.x_axis.as_ref()
    }

    #[must_use]
    pub fn y_axis(&self) -> Option<&AxisGroup> {
        self.y_axis.as_ref()
    }

    pub fn append_primitives(&self, frame: &mut LayeredRenderFrame, style: &ChartStyle) {
        let margin = self.layout.margin;
        let content_width = self.layout.content_width();
        let content_height = self.layout.content_height();

        if let Some(title) = self.title.as_deref().filter(|text| !text.is_empty()) {
            frame.push_text(
                LayerKind::Axis,
                TextPrimitive::new(
                    title,
                    margin.left + content_width / 2.0,
                    margin.top + content_height + TITLE_OFFSET_Y,
                    style.title_font_size_px,
                    style.title_color,
                    TextHAlign::Center,
                ),
            );
        }
        if let Some(unit) = self.unit.as_deref().filter(|text| !text.is_empty()) {
            // Rotated -90deg around its anchor: reads bottom-to-top, centred on the content box.
            frame.push_text(
                LayerKind::Axis,
                TextPrimitive::new(
                    unit,
                    margin.left - UNIT_OFFSET_X,
                    margin.top + content_height / 2.0,
                    style.title_font_size_px,
                    style.title_color,
                    TextHAlign::Center,
                )
                .rotated(-90.0),
            );
        }
        for axis in [&self.x_axis, &self.y_axis].into_iter().flatten() {
            axis.append_primitives(frame, style);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub color: Color,
}

/// Immediate-mode path with its own display transform.
///
/// Path points stay in content space; `scale_x` and `position` are applied
/// only when segments are read back, so a pan/zoom never rewrites the path.
#[derive(Debug, Clone, PartialEq)]
pub struct Graphics {
    pub commands: Vec<PathCommand>,
    pub line_style: Option<LineStyle>,
    pub scale_x: f64,
    pub position: (f64, f64),
}

impl Default for Graphics {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            line_style: None,
            scale_x: 1.0,
            position: (0.0, 0.0),
        }
    }
}

impl Graphics {
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo(x, y));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo(x, y));
    }

    /// Drops drawn geometry and the line style. The display transform is kept.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.line_style = None;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn to_display(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x * self.scale_x + self.position.0, y + self.position.1)
    }

    /// Stroked segments in display space.
    #[must_use]
    pub fn segments(&self) -> Vec<((f64, f64), (f64, f64))> {
        let mut segments = Vec::with_capacity(self.commands.len());
        let mut cursor: Option<(f64, f64)> = None;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(x, y) => cursor = Some(self.to_display((x, y))),
                PathCommand::LineTo(x, y) => {
                    let point = self.to_display((x, y));
                    if let Some(from) = cursor {
                        segments.push((from, point));
                    }
                    cursor = Some(point);
                }
            }
        }
        segments
    }
}

/// Immediate-mode pixel layer covering the chart content box.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    width: f64,
    height: f64,
    pub graphics: Graphics,
}

impl PixelSurface {
    #[must_use]
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            width: layout.content_width(),
            height: layout.content_height(),
            graphics: Graphics::default(),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Background plus the visible part of the path, offset by `origin`.
    pub fn append_primitives(
        &self,
        frame: &mut LayeredRenderFrame,
        origin: (f64, f64),
        style: &ChartStyle,
    ) {
        let (ox, oy) = origin;
        frame.push_rect(
            LayerKind::Background,
            RectPrimitive::filled(ox, oy, self.width, self.height, style.plot_background_color),
        );
        let Some(line_style) = self.graphics.line_style else {
            return;
        };
        for (from, to) in self.graphics.segments() {
            let Some(((x1, y1), (x2, y2))) = clip_segment(from, to, self.width, self.height)
            else {
                continue;
            };
            frame.push_line(
                LayerKind::Series,
                LinePrimitive::new(
                    ox + x1,
                    oy + y1,
                    ox + x2,
                    oy + y2,
                    line_style.width,
                    line_style.color,
                ),
            );
        }
    }
}

/// Liang-Barsky clip of a segment against `[0, width] x [0, height]`.
/// Segments with a non-finite endpoint are dropped.
#[must_use]
pub fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    if ![from.0, from.1, to.0, to.1].iter().all(|coord| coord.is_finite()) {
        return None;
    }
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, from.0),
        (dx, width - from.0),
        (-dy, from.1),
        (dy, height - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::{Graphics, clip_segment};

    #[test]
    fn segments_apply_horizontal_scale_and_position() {
        let mut graphics = Graphics::default();
        graphics.move_to(0.0, 10.0);
        graphics.line_to(0.0, 10.0);
        graphics.line_to(5.0, 20.0);
        graphics.scale_x = 2.0;
        graphics.position = (-3.0, 0.0);

        let segments = graphics.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], ((-3.0, 10.0), (7.0, 20.0)));
    }

    #[test]
    fn clear_keeps_the_display_transform() {
        let mut graphics = Graphics::default();
        graphics.line_to(1.0, 1.0);
        graphics.scale_x = 4.0;
        graphics.clear();
        assert!(graphics.is_empty());
        assert_eq!(graphics.scale_x, 4.0);
    }

    #[test]
    fn clipping_trims_to_the_box() {
        assert_eq!(
            clip_segment((-10.0, 5.0), (20.0, 5.0), 10.0, 10.0),
            Some(((0.0, 5.0), (10.0, 5.0)))
        );
        assert_eq!(clip_segment((-10.0, 5.0), (-1.0, 5.0), 10.0, 10.0), None);
        assert_eq!(
            clip_segment((2.0, 2.0), (3.0, 3.0), 10.0, 10.0),
            Some(((2.0, 2.0), (3.0, 3.0)))
        );
    }

    #[test]
    fn non_finite_endpoints_are_dropped() {
        assert_eq!(clip_segment((f64::NAN, 2.0), (3.0, 3.0), 10.0, 10.0), None);
        assert_eq!(clip_segment((2.0, 2.0), (3.0, f64::INFINITY), 10.0, 10.0), None);
    }
}
