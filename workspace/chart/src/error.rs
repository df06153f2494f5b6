use thiserror::Error;

/// Error types for the chart pipeline
#[derive(Error, Debug)]
pub enum ChartError {
    /// Error from (de)serializing chart descriptions
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The rendering surface refused to draw
    #[error("Render error: {0}")]
    Render(String),
}

/// Type alias for Result with ChartError
pub type Result<T> = std::result::Result<T, ChartError>;
