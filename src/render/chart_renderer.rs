use tracing::trace;

use crate::core::{
    ChartLayout, ChartScales, LinearScale, MIN_DRAWABLE_POINTS, Rect, TimeScale, ZoomTransform,
    project_line_path,
};
use crate::error::ChartResult;
use crate::render::{
    ChartStyle, ContainerHandle, Flow, LayerKind, LayerPairing, LayeredRenderFrame, LinePrimitive,
    LineStyle, PixelSurface, RenderFrame, Renderer, VectorSurface,
};

/// Vertical offset of the plotted line inside the pixel surface.
pub const PIXEL_LINE_OFFSET_Y: f64 = 1.0;

/// Lifecycle of a pooled renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Initialized,
    Drawing,
}

/// Everything `ChartRenderer::init` binds for one pass.
#[derive(Debug, Clone, Copy)]
pub struct RendererInit<'a> {
    pub main_container: &'a ContainerHandle,
    pub overlay_container: &'a ContainerHandle,
    pub slot: usize,
    pub time_period_start: &'a [f64],
    pub values: &'a [f64],
    pub title: &'a str,
    pub unit: &'a str,
    pub scales: ChartScales,
}

/// One chart's dual-surface renderer.
///
/// Owns a vector surface (axes, labels) and a pixel surface (the line) and the
/// pairing that keeps the pixel surface over the vector surface's content box.
/// Instances are created once per slot and reused across passes.
#[derive(Debug)]
pub struct ChartRenderer {
    layout: ChartLayout,
    style: ChartStyle,
    vector: VectorSurface,
    pixel: PixelSurface,
    pairing: Option<LayerPairing>,
    main_container: Option<ContainerHandle>,
    state: RendererState,
    draw_count: u64,
}

impl ChartRenderer {
    #[must_use]
    pub fn new(layout: ChartLayout, style: ChartStyle) -> Self {
        Self {
            layout,
            style,
            vector: VectorSurface::new(layout),
            pixel: PixelSurface::new(layout),
            pairing: None,
            main_container: None,
            state: RendererState::Uninitialized,
            draw_count: 0,
        }
    }

    /// Removes drawn line geometry. Safe in any state.
    pub fn clear(&mut self) {
        self.pixel.graphics.clear();
    }

    /// Attaches both surfaces, records the pairing and draws the initial path.
    ///
    /// Re-running on a pooled renderer moves its surfaces to the end of the
    /// containers instead of duplicating them. With fewer than two points only
    /// the attachment happens.
    pub fn init(&mut self, init: RendererInit<'_>) {
        let pairing = LayerPairing::for_slot(init.slot, self.layout.margin);

        init.main_container.append(
            pairing.vector_key(),
            self.vector.width(),
            self.vector.height(),
            Flow::Block,
        );
        init.main_container
            .set_anchor_name(pairing.vector_key(), pairing.anchor_name.clone());
        init.overlay_container.append(
            pairing.pixel_key(),
            self.pixel.width(),
            self.pixel.height(),
            Flow::Absolute,
        );

        self.pairing = Some(pairing);
        self.main_container = Some(init.main_container.clone());
        if self.state == RendererState::Uninitialized {
            self.state = RendererState::Initialized;
        }

        if init.time_period_start.len() < MIN_DRAWABLE_POINTS {
            trace!(slot = init.slot, "degenerate series: surfaces attached only");
            return;
        }

        self.vector.set_labels(init.title, init.unit);

        let path = project_line_path(init.time_period_start, init.values, init.scales);
        let graphics = &mut self.pixel.graphics;
        graphics.line_style = Some(LineStyle {
            width: self.style.series_line_width,
            color: self.style.series_line_color,
        });
        // A non-finite point lifts the pen; the next finite point starts a new run.
        let mut pen_down = false;
        for &(x, y) in &path {
            if !(x.is_finite() && y.is_finite()) {
                pen_down = false;
                continue;
            }
            if !pen_down {
                graphics.move_to(x, y);
                pen_down = true;
            }
            graphics.line_to(x, y);
        }
    }

    /// Redraws axes for `transform` and moves the line geometry with it.
    ///
    /// The time axis uses `time` rescaled by the transform's x component, the
    /// value axis is left unscaled. The path is not rebuilt: only its
    /// horizontal scale and x position change. Its y position is pinned to
    /// [`PIXEL_LINE_OFFSET_Y`] whatever the transform's y.
    pub fn draw(&mut self, transform: ZoomTransform, time: TimeScale, value: LinearScale) {
        self.vector.set_axes(transform.rescale_x(time), value);

        let graphics = &mut self.pixel.graphics;
        graphics.scale_x = transform.k;
        graphics.position = (transform.x, PIXEL_LINE_OFFSET_Y);

        self.state = RendererState::Drawing;
        self.draw_count += 1;
    }

    #[must_use]
    pub fn state(&self) -> RendererState {
        self.state
    }

    #[must_use]
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    #[must_use]
    pub fn slot(&self) -> Option<usize> {
        self.pairing.as_ref().map(|pairing| pairing.slot)
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn vector(&self) -> &VectorSurface {
        &self.vector
    }

    #[must_use]
    pub fn pixel(&self) -> &PixelSurface {
        &self.pixel
    }

    #[must_use]
    pub fn pairing(&self) -> Option<&LayerPairing> {
        self.pairing.as_ref()
    }

    /// Host-space box of the pixel surface, resolved through its anchor.
    #[must_use]
    pub fn overlay_rect(&self) -> Option<Rect> {
        let pairing = self.pairing.as_ref()?;
        let main = self.main_container.as_ref()?;
        pairing.resolve(main, self.pixel.width(), self.pixel.height())
    }

    /// Both surfaces as layered primitives in outer-chart coordinates.
    #[must_use]
    pub fn compose_layers(&self) -> LayeredRenderFrame {
        let mut frame = LayeredRenderFrame::canonical(self.layout.outer_viewport());
        let origin = (self.layout.margin.left, self.layout.margin.top);
        self.pixel.append_primitives(&mut frame, origin, &self.style);
        self.vector.append_primitives(&mut frame, &self.style);
        frame
    }

    #[must_use]
    pub fn compose_frame(&self) -> RenderFrame {
        self.compose_layers().flatten()
    }

    /// Series geometry only; what the pixel surface currently shows.
    #[must_use]
    pub fn series_lines(&self) -> Vec<LinePrimitive> {
        self.compose_layers()
            .layer(LayerKind::Series)
            .map(|layer| layer.lines.clone())
            .unwrap_or_default()
    }

    pub fn render_with<R: Renderer>(&self, backend: &mut R) -> ChartResult<()> {
        let frame = self.compose_frame();
        trace!(slot = ?self.slot(), primitives = frame.primitive_count(), "render chart frame");
        backend.render(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartRenderer, PIXEL_LINE_OFFSET_Y, RendererInit, RendererState};
    use crate::core::{ChartLayout, ScaleState, ZoomTransform, build_scales};
    use crate::render::{ChartStyle, ContainerHandle, NullRenderer, PathCommand, SurfaceKey};

    const DAY: f64 = 86_400_000.0;

    fn fixture() -> (ChartRenderer, ContainerHandle, ContainerHandle) {
        (
            ChartRenderer::new(ChartLayout::new(1150.0), ChartStyle::default()),
            ContainerHandle::new("charts"),
            ContainerHandle::new("zoomboxes"),
        )
    }

    #[test]
    fn clear_before_init_is_safe() {
        let (mut renderer, _, _) = fixture();
        renderer.clear();
        assert_eq!(renderer.state(), RendererState::Uninitialized);
        assert!(renderer.overlay_rect().is_none());
    }

    #[test]
    fn init_draws_one_segment_per_point() {
        let (mut renderer, main, overlay) = fixture();
        let times = [0.0, DAY, 2.0 * DAY];
        let values = [10.0, 20.0, 15.0];
        let ScaleState::Ready(scales) =
            build_scales(&times, &values, renderer.layout()).expect("valid")
        else {
            panic!("expected ready scales");
        };

        renderer.init(RendererInit {
            main_container: &main,
            overlay_container: &overlay,
            slot: 0,
            time_period_start: &times,
            values: &values,
            title: "Usage",
            unit: "kWh",
            scales,
        });

        assert_eq!(renderer.state(), RendererState::Initialized);
        assert_eq!(renderer.pixel().graphics.commands.len(), 4);
        assert_eq!(renderer.vector().title(), Some("Usage"));
        assert!(main.contains(SurfaceKey::vector(0)));
        assert!(overlay.contains(SurfaceKey::pixel(0)));

        renderer.draw(ZoomTransform::IDENTITY, scales.time, scales.value);
        assert_eq!(renderer.state(), RendererState::Drawing);
        assert_eq!(renderer.series_lines().len(), 3);

        let mut backend = NullRenderer::default();
        renderer.render_with(&mut backend).expect("valid frame");
        assert!(backend.last_line_count > 3);
    }

    #[test]
    fn degenerate_init_only_attaches() {
        let (mut renderer, main, overlay) = fixture();
        renderer.init(RendererInit {
            main_container: &main,
            overlay_container: &overlay,
            slot: 2,
            time_period_start: &[0.0],
            values: &[1.0],
            title: "Lonely",
            unit: "kWh",
            scales: Default::default(),
        });

        assert!(renderer.pixel().graphics.is_empty());
        assert_eq!(renderer.vector().title(), None);
        assert_eq!(main.len(), 1);
        assert_eq!(overlay.len(), 1);
        assert_eq!(renderer.slot(), Some(2));
    }

    #[test]
    fn non_finite_values_break_the_line_into_runs() {
        let (mut renderer, main, overlay) = fixture();
        let times = [0.0, DAY, 2.0 * DAY, 3.0 * DAY];
        let values = [1.0, f64::NAN, 3.0, 4.0];
        let ScaleState::Ready(scales) =
            build_scales(&times, &values, renderer.layout()).expect("valid")
        else {
            panic!("expected ready scales");
        };

        renderer.init(RendererInit {
            main_container: &main,
            overlay_container: &overlay,
            slot: 0,
            time_period_start: &times,
            values: &values,
            title: "Gappy",
            unit: "kWh",
            scales,
        });
        let moves = renderer
            .pixel()
            .graphics
            .commands
            .iter()
            .filter(|command| matches!(command, PathCommand::MoveTo(..)))
            .count();
        assert_eq!(moves, 2);
        assert_eq!(renderer.pixel().graphics.commands.len(), 5);

        renderer.draw(ZoomTransform::new(2.0, -50.0, -30.0), scales.time, scales.value);
        assert_eq!(renderer.pixel().graphics.position, (-50.0, PIXEL_LINE_OFFSET_Y));
        let mut backend = NullRenderer::default();
        renderer.render_with(&mut backend).expect("gaps render");
    }
}
