use chrono::NaiveDate;
use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("invalid axis range: start={start}, end={end}")]
    InvalidRange { start: f64, end: f64 },
    #[error("invalid date range: start={start}, end={end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("a date range must be set before adding date brackets")]
    MissingDateRange,
    #[error("invalid data: {0}")]
    InvalidData(String),
}
