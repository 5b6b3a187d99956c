//! Calendar intervals used to round time domains and place time ticks.
//!
//! All arithmetic is UTC. Timestamps are unix milliseconds as `f64`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ticks::tick_step;

pub const MILLIS_PER_SECOND: f64 = 1_000.0;
pub const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: f64 = 7.0 * MILLIS_PER_DAY;
/// Nominal month used only to pick an interval, never for calendar math.
pub const MILLIS_PER_MONTH: f64 = 30.0 * MILLIS_PER_DAY;
/// Nominal year used only to pick an interval, never for calendar math.
pub const MILLIS_PER_YEAR: f64 = 365.0 * MILLIS_PER_DAY;

/// Upper bound on generated instants so a bad request cannot spin forever.
const MAX_RANGE_LEN: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// A unit plus a step, e.g. "every 6 hours" or "every 3 months".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: i64,
}

const TICK_INTERVALS: [(TimeUnit, i64, f64); 18] = [
    (TimeUnit::Second, 1, MILLIS_PER_SECOND),
    (TimeUnit::Second, 5, 5.0 * MILLIS_PER_SECOND),
    (TimeUnit::Second, 15, 15.0 * MILLIS_PER_SECOND),
    (TimeUnit::Second, 30, 30.0 * MILLIS_PER_SECOND),
    (TimeUnit::Minute, 1, MILLIS_PER_MINUTE),
    (TimeUnit::Minute, 5, 5.0 * MILLIS_PER_MINUTE),
    (TimeUnit::Minute, 15, 15.0 * MILLIS_PER_MINUTE),
    (TimeUnit::Minute, 30, 30.0 * MILLIS_PER_MINUTE),
    (TimeUnit::Hour, 1, MILLIS_PER_HOUR),
    (TimeUnit::Hour, 3, 3.0 * MILLIS_PER_HOUR),
    (TimeUnit::Hour, 6, 6.0 * MILLIS_PER_HOUR),
    (TimeUnit::Hour, 12, 12.0 * MILLIS_PER_HOUR),
    (TimeUnit::Day, 1, MILLIS_PER_DAY),
    (TimeUnit::Day, 2, 2.0 * MILLIS_PER_DAY),
    (TimeUnit::Week, 1, MILLIS_PER_WEEK),
    (TimeUnit::Month, 1, MILLIS_PER_MONTH),
    (TimeUnit::Month, 3, 3.0 * MILLIS_PER_MONTH),
    (TimeUnit::Year, 1, MILLIS_PER_YEAR),
];

impl TimeInterval {
    #[must_use]
    pub const fn new(unit: TimeUnit, step: i64) -> Self {
        Self { unit, step }
    }

    /// Picks the interval whose duration is closest (by ratio) to `span / count`.
    #[must_use]
    pub fn for_span(start_ms: f64, stop_ms: f64, count: usize) -> Self {
        let target = (stop_ms - start_ms).abs() / count.max(1) as f64;
        let index = TICK_INTERVALS.partition_point(|(_, _, duration)| *duration <= target);

        if index == TICK_INTERVALS.len() {
            let years = tick_step(
                start_ms / MILLIS_PER_YEAR,
                stop_ms / MILLIS_PER_YEAR,
                count,
            );
            return Self::new(TimeUnit::Year, finite_step(years.floor()));
        }
        if index == 0 {
            let millis = tick_step(start_ms, stop_ms, count).max(1.0);
            return Self::new(TimeUnit::Millisecond, finite_step(millis.round()));
        }

        let (_, _, below) = TICK_INTERVALS[index - 1];
        let (_, _, above) = TICK_INTERVALS[index];
        let chosen = if target / below < above / target {
            index - 1
        } else {
            index
        };
        let (unit, step, _) = TICK_INTERVALS[chosen];
        Self::new(unit, step)
    }

    /// Latest aligned instant at or before `time_ms`.
    #[must_use]
    pub fn floor(self, time_ms: f64) -> f64 {
        if !time_ms.is_finite() {
            return time_ms;
        }
        let millis = time_ms.floor() as i64;
        match self.unit {
            TimeUnit::Millisecond | TimeUnit::Second | TimeUnit::Minute | TimeUnit::Hour => {
                let period = self.fixed_period_ms();
                millis.div_euclid(period).saturating_mul(period) as f64
            }
            _ => match date_of(millis) {
                Some(date) => millis_of(self.floor_date(date)),
                None => time_ms,
            },
        }
    }

    /// Earliest aligned instant at or after `time_ms`.
    #[must_use]
    pub fn ceil(self, time_ms: f64) -> f64 {
        let floored = self.floor(time_ms);
        if floored == time_ms || !time_ms.is_finite() {
            return floored;
        }
        self.next(floored)
    }

    /// The aligned instant following an aligned instant.
    #[must_use]
    pub fn next(self, aligned_ms: f64) -> f64 {
        let millis = aligned_ms as i64;
        match self.unit {
            TimeUnit::Millisecond | TimeUnit::Second | TimeUnit::Minute | TimeUnit::Hour => {
                millis.saturating_add(self.fixed_period_ms()) as f64
            }
            _ => match date_of(millis) {
                Some(date) => millis_of(self.next_date(date)),
                None => f64::INFINITY,
            },
        }
    }

    /// Aligned instants in `[start_ms, stop_ms)`.
    #[must_use]
    pub fn range(self, start_ms: f64, stop_ms: f64) -> Vec<f64> {
        let mut instants = Vec::new();
        if !start_ms.is_finite() || !stop_ms.is_finite() || self.step <= 0 {
            return instants;
        }
        let mut current = self.ceil(start_ms);
        while current < stop_ms && instants.len() < MAX_RANGE_LEN {
            instants.push(current);
            let following = self.next(current);
            if !(following > current) {
                break;
            }
            current = following;
        }
        instants
    }

    fn fixed_period_ms(self) -> i64 {
        let unit_ms = match self.unit {
            TimeUnit::Millisecond => 1,
            TimeUnit::Second => 1_000,
            TimeUnit::Minute => 60_000,
            TimeUnit::Hour => 3_600_000,
            _ => 86_400_000,
        };
        unit_ms * self.step.max(1)
    }

    fn floor_date(self, date: NaiveDate) -> NaiveDate {
        let step = self.step.max(1);
        match self.unit {
            TimeUnit::Day => {
                let mut date = date;
                while i64::from(date.day0()) % step != 0 {
                    date -= Duration::days(1);
                }
                date
            }
            TimeUnit::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
            }
            TimeUnit::Month => {
                let mut month0 = i64::from(date.month0());
                month0 -= month0 % step;
                first_of_month(date.year(), month0).unwrap_or(date)
            }
            TimeUnit::Year => {
                let year = i64::from(date.year());
                let aligned = year.div_euclid(step) * step;
                i32::try_from(aligned)
                    .ok()
                    .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
                    .unwrap_or(date)
            }
            _ => date,
        }
    }

    fn next_date(self, date: NaiveDate) -> NaiveDate {
        let step = self.step.max(1);
        match self.unit {
            TimeUnit::Day => {
                let mut date = date + Duration::days(1);
                while i64::from(date.day0()) % step != 0 {
                    date += Duration::days(1);
                }
                date
            }
            TimeUnit::Week => date + Duration::days(7 * step),
            TimeUnit::Month => {
                let month0 = i64::from(date.month0()) + step;
                first_of_month(date.year(), month0).unwrap_or(NaiveDate::MAX)
            }
            TimeUnit::Year => i32::try_from(i64::from(date.year()) + step)
                .ok()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
                .unwrap_or(NaiveDate::MAX),
            _ => date,
        }
    }
}

fn finite_step(value: f64) -> i64 {
    if value.is_finite() && value >= 1.0 {
        value as i64
    } else {
        1
    }
}

fn first_of_month(year: i32, month0: i64) -> Option<NaiveDate> {
    let year = i64::from(year) + month0.div_euclid(12);
    let month = month0.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)
}

fn date_of(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|time| time.date_naive())
}

fn millis_of(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map(|time| time.and_utc().timestamp_millis() as f64)
        .unwrap_or(f64::NAN)
}
