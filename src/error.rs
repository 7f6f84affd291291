use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("series `{series}` needs at least {required} points, got {actual}")]
    DataGap {
        series: String,
        required: usize,
        actual: usize,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Returns `true` for errors that only drop one series from the output.
    #[must_use]
    pub fn is_data_gap(&self) -> bool {
        matches!(self, Self::DataGap { .. })
    }
}
