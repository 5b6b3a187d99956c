use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::scale::normalize;
use crate::core::ticks::DEFAULT_TICK_COUNT;
use crate::core::time_interval::TimeInterval;
use crate::error::{ChartError, ChartResult, ScaleAxis};

/// 2000-01-01T00:00:00Z, the start of the unconfigured default domain.
const DEFAULT_DOMAIN_START_MS: f64 = 946_684_800_000.0;

/// Time axis mapping: unix-millisecond domain onto a pixel range.
///
/// The scale is a value type. Rounding, rescaling and re-ranging all return a
/// new scale, so scales captured by a redraw closure never change under it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            domain_start: DEFAULT_DOMAIN_START_MS,
            domain_end: DEFAULT_DOMAIN_START_MS + crate::core::time_interval::MILLIS_PER_DAY,
            range_start: 0.0,
            range_end: 1.0,
        }
    }
}

impl TimeScale {
    pub fn new(start_ms: f64, end_ms: f64) -> ChartResult<Self> {
        if !start_ms.is_finite() || !end_ms.is_finite() {
            return Err(ChartError::InvalidDomain {
                axis: ScaleAxis::Time,
                reason: format!("bounds must be finite, got [{start_ms}, {end_ms}]"),
            });
        }

        Ok(Self {
            domain_start: start_ms,
            domain_end: end_ms,
            ..Self::default()
        })
    }

    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> ChartResult<Self> {
        Self::new(
            start.timestamp_millis() as f64,
            end.timestamp_millis() as f64,
        )
    }

    #[must_use]
    pub fn with_range(mut self, range_start: f64, range_end: f64) -> Self {
        self.range_start = range_start;
        self.range_end = range_end;
        self
    }

    /// Same range, different domain. Used by zoom rescaling.
    #[must_use]
    pub fn with_domain(mut self, start_ms: f64, end_ms: f64) -> Self {
        self.domain_start = start_ms;
        self.domain_end = end_ms;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn domain_datetimes(self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((
            DateTime::<Utc>::from_timestamp_millis(self.domain_start as i64)?,
            DateTime::<Utc>::from_timestamp_millis(self.domain_end as i64)?,
        ))
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, time_ms: f64) -> f64 {
        let ratio = normalize(self.domain_start, self.domain_end, time_ms);
        self.range_start + ratio * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn map_datetime(self, time: DateTime<Utc>) -> f64 {
        self.map(time.timestamp_millis() as f64)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let ratio = normalize(self.range_start, self.range_end, pixel);
        self.domain_start + ratio * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outward to the boundaries of the interval that
    /// would be used for ten ticks. Never moves a bound inward.
    #[must_use]
    pub fn nice(self) -> Self {
        self.nice_with_count(DEFAULT_TICK_COUNT)
    }

    #[must_use]
    pub fn nice_with_count(self, count: usize) -> Self {
        let reversed = self.domain_end < self.domain_start;
        let (low, high) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };
        let interval = TimeInterval::for_span(low, high, count);
        let (low, high) = (interval.floor(low), interval.ceil(high));
        if reversed {
            self.with_domain(high, low)
        } else {
            self.with_domain(low, high)
        }
    }

    /// Tick instants (unix ms) inside the domain, both ends inclusive.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let reversed = self.domain_end < self.domain_start;
        let (low, high) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };
        let interval = TimeInterval::for_span(low, high, count);
        let mut ticks = interval.range(low, high + 1.0);
        if reversed {
            ticks.reverse();
        }
        ticks
    }

    #[must_use]
    pub fn default_ticks(self) -> Vec<f64> {
        self.ticks(DEFAULT_TICK_COUNT)
    }
}

/// Formats a tick instant as `YYYY-MM-DD` (UTC).
#[must_use]
pub fn format_date_tick(time_ms: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(time_ms.floor() as i64)
        .map(|time| time.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
