use serde::{Deserialize, Serialize};

/// Paint layers of one chart, bottom to top.
///
/// `Background` and `Series` belong to the pixel surface; `Axis` holds
/// everything the vector surface draws (axes, title, unit label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Background,
    Series,
    Axis,
}

impl LayerKind {
    pub const CANONICAL: [Self; 3] = [Self::Background, Self::Series, Self::Axis];
    pub const PIXEL: [Self; 2] = [Self::Background, Self::Series];
    pub const VECTOR: [Self; 1] = [Self::Axis];
}
