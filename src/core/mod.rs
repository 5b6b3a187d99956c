pub mod projection;
pub mod scale;
pub mod scale_builder;
pub mod series;
pub mod ticks;
pub mod time_interval;
pub mod time_scale;
pub mod transform;
pub mod types;

pub use projection::project_line_path;
pub use scale::LinearScale;
pub use scale_builder::{ChartScales, MIN_DRAWABLE_POINTS, ScaleState, build_scales};
pub use series::{SeriesChannel, TimeSeries};
pub use time_interval::{TimeInterval, TimeUnit};
pub use time_scale::{TimeScale, format_date_tick};
pub use transform::ZoomTransform;
pub use types::{ChartLayout, Margin, Rect, Viewport};
