use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Which axis a domain belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    Time,
    Value,
}

impl std::fmt::Display for ScaleAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time => f.write_str("time"),
            Self::Value => f.write_str("value"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid {axis} domain: {reason}")]
    InvalidDomain { axis: ScaleAxis, reason: String },

    #[error("misaligned series `{field}`: expected {expected} entries, got {actual}")]
    MisalignedSeries {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
