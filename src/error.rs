//! Error taxonomy for the ridership pipeline.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A requested line has no station definition in the configuration.
    #[error("no line definition configured for `{0}`")]
    Configuration(String),

    /// A raw record failed validation: unparseable service date, or a zero
    /// or negative entry count.
    #[error("bad ridership record at row {row}: {reason}")]
    DataQuality { row: usize, reason: String },

    /// The baseline window holds no data or averages to zero, so a percent
    /// change cannot be computed.
    #[error("zero ridership baseline for {line} between {start} and {end}")]
    ZeroBaseline {
        line: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
