#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::ChartScales;

/// Maps every `(timestamp, value)` pair into content pixel space.
///
/// Pairs are zipped, so a shorter `values` slice truncates the path.
#[must_use]
pub fn project_line_path(
    time_period_start: &[f64],
    values: &[f64],
    scales: ChartScales,
) -> Vec<(f64, f64)> {
    let project = |(time, value): (&f64, &f64)| (scales.time.map(*time), scales.value.map(*value));

    #[cfg(feature = "parallel-projection")]
    {
        time_period_start
            .par_iter()
            .zip(values.par_iter())
            .map(project)
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        time_period_start.iter().zip(values).map(project).collect()
    }
}
