use thiserror::Error;
use tp_output::OutputError;

#[derive(Debug, Error)]
pub enum KpiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading table failed: {0}")]
    Output(#[from] OutputError),

    #[error("table `{table}` column `{column}` holds a non-numeric value: {value:?}")]
    BadNumber {
        table:  &'static str,
        column: &'static str,
        value:  String,
    },
}

pub type KpiResult<T> = Result<T, KpiError>;

/// Parse a text-typed numeric cell.
pub(crate) fn number(table: &'static str, column: &'static str, value: &str) -> KpiResult<f64> {
    value.trim().parse().map_err(|_| KpiError::BadNumber {
        table,
        column,
        value: value.to_owned(),
    })
}
