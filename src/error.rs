use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series must contain at least 3 candles, got {len}")]
    SeriesTooShort { len: usize },

    #[error("initial visible candle count must be >= 3, got {count}")]
    InvalidVisibleCandleCount { count: usize },

    #[error("invalid style: {0}")]
    InvalidStyle(String),
}
