//! Error types for tp-output.

use thiserror::Error;

/// Errors that can occur when writing or reading extracted tables.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("row does not match schema of table `{table}`: {detail}")]
    SchemaMismatch { table: &'static str, detail: String },

    #[error("column `{0}` not found in table")]
    MissingColumn(String),

    #[error("column `{0}` is not a text column")]
    NotText(String),

    #[error("sink for table `{0}` is already finished")]
    Finished(&'static str),

    #[error("table format `{0}` is not compiled in (enable the `{0}` feature)")]
    Unsupported(&'static str),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
