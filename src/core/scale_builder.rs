use ordered_float::OrderedFloat;

use crate::core::{ChartLayout, LinearScale, TimeScale};
use crate::error::{ChartError, ChartResult, ScaleAxis};

/// Minimum number of points for which a line (and so a domain) makes sense.
pub const MIN_DRAWABLE_POINTS: usize = 2;

/// The pair of scales one chart plots with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartScales {
    pub time: TimeScale,
    pub value: LinearScale,
}

/// Outcome of scale construction for one series channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleState {
    /// Fewer than two points: nothing to plot, default scales stand in.
    Degenerate,
    Ready(ChartScales),
}

impl ScaleState {
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        matches!(self, Self::Degenerate)
    }

    #[must_use]
    pub fn scales(self) -> ChartScales {
        match self {
            Self::Degenerate => ChartScales::default(),
            Self::Ready(scales) => scales,
        }
    }
}

/// `[min, max]` over the finite entries of `values`.
fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    let mut finite = values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .map(OrderedFloat);
    let first = finite.next()?;
    let (min, max) = finite.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    });
    Some((min.into_inner(), max.into_inner()))
}

pub fn date_extent(time_period_start: &[f64]) -> ChartResult<(f64, f64)> {
    finite_extent(time_period_start).ok_or_else(|| ChartError::InvalidDomain {
        axis: ScaleAxis::Time,
        reason: format!(
            "none of {} timestamps is a valid instant",
            time_period_start.len()
        ),
    })
}

pub fn numeric_extent(values: &[f64]) -> ChartResult<(f64, f64)> {
    finite_extent(values).ok_or_else(|| ChartError::InvalidDomain {
        axis: ScaleAxis::Value,
        reason: format!("none of {} values is finite", values.len()),
    })
}

/// Builds the time and value scales for one chart.
///
/// The time domain is the timestamp extent rounded outward; the value domain
/// always starts at zero so every chart shows its baseline. Series with fewer
/// than [`MIN_DRAWABLE_POINTS`] timestamps short-circuit to
/// [`ScaleState::Degenerate`] before any extent is computed.
pub fn build_scales(
    time_period_start: &[f64],
    values: &[f64],
    layout: ChartLayout,
) -> ChartResult<ScaleState> {
    if time_period_start.len() < MIN_DRAWABLE_POINTS {
        return Ok(ScaleState::Degenerate);
    }

    let (first, last) = date_extent(time_period_start)?;
    let time = TimeScale::new(first, last)?
        .nice()
        .with_range(0.0, layout.content_width());

    let (_, max_value) = numeric_extent(values)?;
    let value = LinearScale::new(0.0, max_value)?.with_range(layout.content_height(), 0.0);

    Ok(ScaleState::Ready(ChartScales { time, value }))
}
