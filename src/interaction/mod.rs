//! Pointer and wheel input that drives the shared pan/zoom transform.

mod zoom;

use serde::{Deserialize, Serialize};

pub use zoom::{WheelDeltaMode, WheelInput, ZoomConfig, ZoomSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}
