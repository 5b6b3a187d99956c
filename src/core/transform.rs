use serde::{Deserialize, Serialize};

use crate::core::TimeScale;

/// Pan/zoom state: uniform scale `k` followed by a translation `(x, y)`.
///
/// A point `p` in content space is displayed at `p * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// Multiplies the scale factor, keeping the translation.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        if factor == 1.0 {
            return self;
        }
        Self::new(self.k * factor, self.x, self.y)
    }

    /// Translates by `(dx, dy)` measured in content (unscaled) units.
    #[must_use]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        if dx == 0.0 && dy == 0.0 {
            return self;
        }
        Self::new(self.k, self.x + self.k * dx, self.y + self.k * dy)
    }

    #[must_use]
    pub fn apply(self, point: (f64, f64)) -> (f64, f64) {
        (self.apply_x(point.0), self.apply_y(point.1))
    }

    #[must_use]
    pub fn apply_x(self, x: f64) -> f64 {
        x * self.k + self.x
    }

    #[must_use]
    pub fn apply_y(self, y: f64) -> f64 {
        y * self.k + self.y
    }

    #[must_use]
    pub fn invert(self, point: (f64, f64)) -> (f64, f64) {
        (self.invert_x(point.0), self.invert_y(point.1))
    }

    #[must_use]
    pub fn invert_x(self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    #[must_use]
    pub fn invert_y(self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Returns `scale` with its domain narrowed to what is visible under this
    /// transform. The range is kept, so `rescaled.map(t) == k * scale.map(t) + x`.
    #[must_use]
    pub fn rescale_x(self, scale: TimeScale) -> TimeScale {
        let (range_start, range_end) = scale.range();
        let start = scale.invert(self.invert_x(range_start));
        let end = scale.invert(self.invert_x(range_end));
        scale.with_domain(start, end)
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}
