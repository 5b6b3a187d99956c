//! Public chart-collection API: pooled renderers bound to series channels and
//! redrawn in lockstep under one shared pan/zoom transform.

mod chart_collection;
mod chart_config;
mod chart_instance;
mod renderer_pool;
mod snapshot;

pub use chart_collection::ChartCollection;
pub use chart_config::{ChartCollectionConfig, DEFAULT_COST_UNIT_LABEL};
pub use chart_instance::{ChartInstance, ChartInstanceArgs};
pub use renderer_pool::{RendererPool, SharedRenderer};
pub use snapshot::{
    COLLECTION_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, CollectionSnapshot,
    CollectionSnapshotJsonContractV1,
};
