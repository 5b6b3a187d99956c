//! datechart: pooled, zoom-synchronized dual-layer time-series line charts.
//!
//! Each chart pairs a retained vector layer (axes, title, unit label) with an
//! immediate-mode pixel layer (the plotted line). A [`ChartCollection`] binds
//! every loaded series to a pooled renderer and redraws all of them in
//! lockstep whenever the shared pan/zoom transform changes.
//!
//! The crate is split the same way the work flows:
//! - `core`: series, scales, ticks and the zoom transform (pure math)
//! - `render`: surfaces, layer pairing, composed frames and backends
//! - `reactive`: single-writer signals with disposable subscriptions
//! - `interaction`: the zoom input surface
//! - `api`: renderer pool, chart instances and the collection

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod reactive;
pub mod render;
pub mod telemetry;

pub use api::{ChartCollection, ChartCollectionConfig};
pub use error::{ChartError, ChartResult};
