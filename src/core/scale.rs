use serde::{Deserialize, Serialize};

use crate::core::ticks::{DEFAULT_TICK_COUNT, linear_ticks, tick_step};
use crate::error::{ChartError, ChartResult, ScaleAxis};

/// Continuous linear mapping from a numeric domain onto a pixel range.
///
/// A zero-width domain is allowed (a flat series is still a series); every
/// value then maps to the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain_start: 0.0,
            domain_end: 1.0,
            range_start: 0.0,
            range_end: 1.0,
        }
    }
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidDomain {
                axis: ScaleAxis::Value,
                reason: format!("bounds must be finite, got [{domain_start}, {domain_end}]"),
            });
        }

        Ok(Self {
            domain_start,
            domain_end,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_range(mut self, range_start: f64, range_end: f64) -> Self {
        self.range_start = range_start;
        self.range_end = range_end;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let ratio = normalize(self.domain_start, self.domain_end, value);
        self.range_start + ratio * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let ratio = normalize(self.range_start, self.range_end, pixel);
        self.domain_start + ratio * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain_start, self.domain_end, count)
    }

    #[must_use]
    pub fn default_ticks(self) -> Vec<f64> {
        self.ticks(DEFAULT_TICK_COUNT)
    }

    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        tick_step(self.domain_start, self.domain_end, count)
    }
}

/// Position of `value` inside `[start, end]` as a ratio; `0.5` for an empty span.
pub(crate) fn normalize(start: f64, end: f64, value: f64) -> f64 {
    let span = end - start;
    if span == 0.0 {
        return if value.is_nan() { f64::NAN } else { 0.5 };
    }
    (value - start) / span
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn inverted_range_maps_zero_to_bottom() {
        let scale = LinearScale::new(0.0, 20.0)
            .expect("valid scale")
            .with_range(150.0, 0.0);
        assert_eq!(scale.map(0.0), 150.0);
        assert_eq!(scale.map(20.0), 0.0);
        assert_eq!(scale.map(10.0), 75.0);
        assert_eq!(scale.invert(75.0), 10.0);
    }

    #[test]
    fn flat_domain_maps_to_range_midpoint() {
        let scale = LinearScale::new(0.0, 0.0)
            .expect("flat domain is allowed")
            .with_range(150.0, 0.0);
        assert_eq!(scale.map(0.0), 75.0);
        assert_eq!(scale.map(42.0), 75.0);
    }

    #[test]
    fn non_finite_domain_is_rejected() {
        assert!(LinearScale::new(0.0, f64::NAN).is_err());
        assert!(LinearScale::new(f64::NEG_INFINITY, 1.0).is_err());
    }
}
