mod axis;
mod chart_renderer;
mod container;
mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod pairing;
mod primitives;
mod style;
mod surface;

pub use axis::{
    AxisGroup, AxisOrientation, AxisTick, AxisTicks, PIXEL_OFFSET, TICK_PADDING, TICK_SIZE_INNER,
    TICK_SIZE_OUTER,
};
pub use chart_renderer::{ChartRenderer, PIXEL_LINE_OFFSET_Y, RendererInit, RendererState};
pub use container::{AttachedSurface, ContainerHandle, Flow, SurfaceKey, SurfaceKind};
pub use frame::RenderFrame;
pub use layer_stack::LayerKind;
pub use layered_frame::{LayerPrimitives, LayeredRenderFrame};
pub use null_renderer::NullRenderer;
pub use pairing::{LayerPairing, Positioning, anchor_name_for};
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use style::ChartStyle;
pub use surface::{
    Graphics, LineStyle, PathCommand, PixelSurface, TITLE_OFFSET_Y, UNIT_OFFSET_X, VectorSurface,
    clip_segment,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from scales, pooling and zoom state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
