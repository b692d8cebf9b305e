use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport: start={start}, end={end}")]
    InvalidViewport { start: f64, end: f64 },

    #[error("invalid canvas size: width={width}, height={height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("unknown series: {0}")]
    UnknownSeries(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
