use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Which numeric sequence of a series a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesChannel {
    Value,
    Cost,
}

/// One titled, time-indexed dataset as handed over by the provider.
///
/// `time_period_start` holds unix milliseconds. `values` and `cost` are
/// index-aligned with it; an empty `cost` means the provider has no cost data.
/// The chart layer treats a series as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    title: String,
    unit: String,
    time_period_start: Vec<f64>,
    values: Vec<f64>,
    #[serde(default)]
    cost: Vec<f64>,
}

impl TimeSeries {
    pub fn new(
        title: impl Into<String>,
        unit: impl Into<String>,
        time_period_start: Vec<f64>,
        values: Vec<f64>,
    ) -> ChartResult<Self> {
        check_aligned("values", time_period_start.len(), values.len())?;
        Ok(Self {
            title: title.into(),
            unit: unit.into(),
            time_period_start,
            values,
            cost: Vec::new(),
        })
    }

    pub fn from_datetimes(
        title: impl Into<String>,
        unit: impl Into<String>,
        times: &[DateTime<Utc>],
        values: Vec<f64>,
    ) -> ChartResult<Self> {
        let millis = times
            .iter()
            .map(|time| time.timestamp_millis() as f64)
            .collect();
        Self::new(title, unit, millis, values)
    }

    /// Attaches a cost sequence aligned with the timestamps.
    pub fn with_cost(mut self, cost: Vec<f64>) -> ChartResult<Self> {
        if !cost.is_empty() {
            check_aligned("cost", self.time_period_start.len(), cost.len())?;
        }
        self.cost = cost;
        Ok(self)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn time_period_start(&self) -> &[f64] {
        &self.time_period_start
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time_period_start.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time_period_start.is_empty()
    }

    /// A series carries a cost channel only if some cost is finite and non-zero.
    #[must_use]
    pub fn has_cost(&self) -> bool {
        self.cost.iter().any(|cost| cost.is_finite() && *cost != 0.0)
    }

    #[must_use]
    pub fn channel(&self, channel: SeriesChannel) -> &[f64] {
        match channel {
            SeriesChannel::Value => &self.values,
            SeriesChannel::Cost => &self.cost,
        }
    }
}

fn check_aligned(field: &'static str, expected: usize, actual: usize) -> ChartResult<()> {
    if expected != actual {
        return Err(ChartError::MisalignedSeries {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}
