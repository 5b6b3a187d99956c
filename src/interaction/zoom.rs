use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Rect, ZoomTransform};
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionMode;
use crate::reactive::{SignalReader, SignalWriter, signal};

/// Scale clamp and wheel tuning of the zoom surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Exponent applied per wheel pixel: `k' = k * 2^(-delta_y * factor)`.
    pub wheel_pixel_factor: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 100.0,
            wheel_pixel_factor: 0.002,
        }
    }
}

impl ZoomConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom scale extent must be finite and > 0".to_owned(),
            ));
        }
        if self.min_scale > self.max_scale {
            return Err(ChartError::InvalidData(format!(
                "zoom min scale {} exceeds max scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if !self.wheel_pixel_factor.is_finite() {
            return Err(ChartError::InvalidData(
                "wheel pixel factor must be finite".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp_scale(self, k: f64) -> f64 {
        k.clamp(self.min_scale, self.max_scale)
    }
}

/// Unit of a wheel event's delta, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelInput {
    pub pointer: (f64, f64),
    pub delta_y: f64,
    pub delta_mode: WheelDeltaMode,
    /// Pinch gestures arrive as ctrl+wheel and zoom ten times faster.
    pub ctrl_key: bool,
}

/// The single zoom-capable input region shared by every chart.
///
/// It is the only writer of the shared transform: every gesture computes a
/// new transform, clamps it, and replaces the shared value wholesale.
#[derive(Debug)]
pub struct ZoomSurface {
    config: ZoomConfig,
    extent: Rect,
    translate_extent: Rect,
    writer: SignalWriter<ZoomTransform>,
    mode: InteractionMode,
    pan_anchor: Option<(f64, f64)>,
    emitted: u64,
}

impl ZoomSurface {
    /// Creates a surface whose viewport and translate extent are both `extent`.
    pub fn new(config: ZoomConfig, extent: Rect) -> ChartResult<Self> {
        Self::with_translate_extent(config, extent, extent)
    }

    pub fn with_translate_extent(
        config: ZoomConfig,
        extent: Rect,
        translate_extent: Rect,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        for rect in [extent, translate_extent] {
            let valid = rect.width.is_finite()
                && rect.height.is_finite()
                && rect.width > 0.0
                && rect.height > 0.0;
            if !valid {
                return Err(ChartError::InvalidViewport {
                    width: rect.width,
                    height: rect.height,
                });
            }
        }
        let (writer, _) = signal(ZoomTransform::IDENTITY);
        Ok(Self {
            config,
            extent,
            translate_extent,
            writer,
            mode: InteractionMode::Idle,
            pan_anchor: None,
            emitted: 0,
        })
    }

    #[must_use]
    pub fn reader(&self) -> SignalReader<ZoomTransform> {
        self.writer.reader()
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        *self.writer.get()
    }

    #[must_use]
    pub fn config(&self) -> ZoomConfig {
        self.config
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Number of transforms broadcast so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Replaces the transform, clamped to the scale and translate extents.
    pub fn set_transform(&mut self, transform: ZoomTransform) -> ChartResult<()> {
        let scaled = self.scale(ZoomTransform::new(1.0, transform.x, transform.y), transform.k);
        let constrained = self.constrain(scaled);
        self.emit(constrained)
    }

    pub fn reset(&mut self) -> ChartResult<()> {
        self.emit(ZoomTransform::IDENTITY)
    }

    /// Zooms to `k` around `pointer` (the extent centre when `None`).
    pub fn scale_to(&mut self, k: f64, pointer: Option<(f64, f64)>) -> ChartResult<()> {
        let current = self.transform();
        let p0 = pointer.unwrap_or_else(|| self.centroid());
        let p1 = current.invert(p0);
        let next = self.constrain(anchor_point(self.scale(current, k), p0, p1));
        self.emit(next)
    }

    pub fn scale_by(&mut self, factor: f64, pointer: Option<(f64, f64)>) -> ChartResult<()> {
        let k = self.transform().k * factor;
        self.scale_to(k, pointer)
    }

    /// Pans by `(dx, dy)` content units.
    pub fn translate_by(&mut self, dx: f64, dy: f64) -> ChartResult<()> {
        let next = self.constrain(self.transform().translate(dx, dy));
        self.emit(next)
    }

    /// Applies one wheel event. Returns `false` when the scale is already at
    /// the clamp the wheel pushes towards, in which case nothing is emitted.
    pub fn wheel(&mut self, input: WheelInput) -> ChartResult<bool> {
        let current = self.transform();
        let mode_factor = match input.delta_mode {
            WheelDeltaMode::Pixel => self.config.wheel_pixel_factor,
            WheelDeltaMode::Line => 0.05,
            WheelDeltaMode::Page => 1.0,
        };
        let pinch = if input.ctrl_key { 10.0 } else { 1.0 };
        let exponent = -input.delta_y * mode_factor * pinch;
        let k = self.config.clamp_scale(current.k * exponent.exp2());
        if k == current.k {
            trace!(k, "wheel at scale clamp");
            return Ok(false);
        }

        let p1 = current.invert(input.pointer);
        let next = self.constrain(anchor_point(self.scale(current, k), input.pointer, p1));
        self.emit(next)?;
        Ok(true)
    }

    pub fn wheel_zoom(&mut self, pointer: (f64, f64), delta_y: f64) -> ChartResult<bool> {
        self.wheel(WheelInput {
            pointer,
            delta_y,
            ..WheelInput::default()
        })
    }

    pub fn pan_start(&mut self, pointer: (f64, f64)) {
        self.pan_anchor = Some(self.transform().invert(pointer));
        self.mode = InteractionMode::Panning;
    }

    /// Moves the content point grabbed at `pan_start` under `pointer`.
    /// Ignored when no pan is in progress.
    pub fn pan_move(&mut self, pointer: (f64, f64)) -> ChartResult<()> {
        let Some(anchor) = self.pan_anchor else {
            return Ok(());
        };
        let next = self.constrain(anchor_point(self.transform(), pointer, anchor));
        self.emit(next)
    }

    pub fn pan_end(&mut self) {
        self.pan_anchor = None;
        self.mode = InteractionMode::Idle;
    }

    fn centroid(&self) -> (f64, f64) {
        (
            self.extent.x + self.extent.width / 2.0,
            self.extent.y + self.extent.height / 2.0,
        )
    }

    fn scale(&self, transform: ZoomTransform, k: f64) -> ZoomTransform {
        let k = self.config.clamp_scale(k);
        if k == transform.k {
            transform
        } else {
            ZoomTransform::new(k, transform.x, transform.y)
        }
    }

    /// Shifts `transform` so the viewport extent never shows anything outside
    /// the translate extent; centres it when the content is smaller.
    fn constrain(&self, transform: ZoomTransform) -> ZoomTransform {
        let extent = self.extent;
        let limit = self.translate_extent;
        let dx0 = transform.invert_x(extent.x) - limit.x;
        let dx1 = transform.invert_x(extent.right()) - limit.right();
        let dy0 = transform.invert_y(extent.y) - limit.y;
        let dy1 = transform.invert_y(extent.bottom()) - limit.bottom();
        transform.translate(settle(dx0, dx1), settle(dy0, dy1))
    }

    fn emit(&mut self, transform: ZoomTransform) -> ChartResult<()> {
        self.emitted += 1;
        debug!(k = transform.k, x = transform.x, y = transform.y, "zoom transform");
        self.writer.set(transform)
    }
}

/// Translation along one axis that brings `[d0, d1]` back over zero.
fn settle(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        (d0 + d1) / 2.0
    } else if d0 < 0.0 {
        d0
    } else {
        d1.max(0.0)
    }
}

/// Returns `transform` translated so content point `content` sits under `screen`.
fn anchor_point(transform: ZoomTransform, screen: (f64, f64), content: (f64, f64)) -> ZoomTransform {
    let x = screen.0 - content.0 * transform.k;
    let y = screen.1 - content.1 * transform.k;
    ZoomTransform::new(transform.k, x, y)
}

#[cfg(test)]
mod tests {
    use super::{WheelDeltaMode, WheelInput, ZoomConfig, ZoomSurface};
    use crate::core::{Rect, ZoomTransform};
    use crate::interaction::InteractionMode;

    fn surface() -> ZoomSurface {
        ZoomSurface::new(ZoomConfig::default(), Rect::new(0.0, 0.0, 1000.0, 150.0))
            .expect("valid surface")
    }

    #[test]
    fn scale_to_clamps_to_the_extent() {
        let mut zoom = surface();
        zoom.scale_to(200.0, Some((0.0, 0.0))).expect("emit");
        assert_eq!(zoom.transform().k, 100.0);

        zoom.scale_to(0.1, None).expect("emit");
        assert_eq!(zoom.transform(), ZoomTransform::IDENTITY);
    }

    #[test]
    fn wheel_keeps_the_pointer_fixed() {
        let mut zoom = surface();
        let pointer = (400.0, 75.0);
        let before = zoom.transform().invert(pointer);
        assert!(zoom.wheel_zoom(pointer, -500.0).expect("emit"));

        let after = zoom.transform();
        assert!((after.k - 2.0).abs() < 1e-12);
        let (x, y) = after.invert(pointer);
        assert!((x - before.0).abs() < 1e-9);
        assert!((y - before.1).abs() < 1e-9);
    }

    #[test]
    fn wheel_out_at_minimum_scale_emits_nothing() {
        let mut zoom = surface();
        assert!(!zoom.wheel_zoom((10.0, 10.0), 100.0).expect("no-op"));
        assert_eq!(zoom.emitted(), 0);
    }

    #[test]
    fn line_mode_wheel_steps_faster() {
        let mut zoom = surface();
        zoom.wheel(WheelInput {
            pointer: (0.0, 0.0),
            delta_y: -20.0,
            delta_mode: WheelDeltaMode::Line,
            ctrl_key: false,
        })
        .expect("emit");
        assert!((zoom.transform().k - 2.0).abs() < 1e-12);
    }

    #[test]
    fn pan_is_clamped_to_the_content() {
        let mut zoom = surface();
        zoom.scale_to(2.0, Some((0.0, 0.0))).expect("emit");

        zoom.pan_start((500.0, 50.0));
        assert_eq!(zoom.mode(), InteractionMode::Panning);
        zoom.pan_move((900.0, 50.0)).expect("emit");
        assert_eq!(zoom.transform().x, 0.0);

        zoom.pan_move((-5_000.0, 50.0)).expect("emit");
        assert_eq!(zoom.transform().x, -1000.0);
        zoom.pan_end();
        assert_eq!(zoom.mode(), InteractionMode::Idle);

        zoom.pan_move((0.0, 0.0)).expect("ignored");
        assert_eq!(zoom.transform().x, -1000.0);
    }

    #[test]
    fn invalid_extents_are_rejected() {
        assert!(ZoomSurface::new(ZoomConfig::default(), Rect::new(0.0, 0.0, 0.0, 10.0)).is_err());
        let config = ZoomConfig {
            min_scale: 5.0,
            max_scale: 1.0,
            ..ZoomConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
