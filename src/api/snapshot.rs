use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, Rect, SeriesChannel, ZoomTransform};
use crate::error::{ChartError, ChartResult};

pub const COLLECTION_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable state of one live chart, for regression tests and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub slot: usize,
    pub channel: SeriesChannel,
    pub title: String,
    pub unit: String,
    pub degenerate: bool,
    pub subscribed: bool,
    pub time_domain: (f64, f64),
    pub value_domain: (f64, f64),
    pub path_commands: usize,
    pub draw_count: u64,
    pub overlay_rect: Option<Rect>,
}

/// Serializable state of a whole collection. Charts are keyed by slot in
/// ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub layout: ChartLayout,
    pub transform: ZoomTransform,
    pub pool_len: usize,
    pub passes: u64,
    pub charts: IndexMap<usize, ChartSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: CollectionSnapshot,
}

impl CollectionSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = CollectionSnapshotJsonContractV1 {
            schema_version: COLLECTION_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<CollectionSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: CollectionSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != COLLECTION_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
