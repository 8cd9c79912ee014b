//! The `BatchWriter` trait implemented by all table backends.

use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use tp_core::TableFormat;

use crate::OutputResult;

/// Trait implemented by the Arrow IPC, Parquet and CSV writers.
///
/// A writer owns one output file and receives whole record batches; the
/// row buffering happens in [`ColumnarBatchSink`](crate::ColumnarBatchSink).
pub trait BatchWriter {
    /// Append one batch to the file.
    fn write_batch(&mut self, batch: &RecordBatch) -> OutputResult<()>;

    /// Write any footer and close the file.
    ///
    /// Idempotent: calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Create the backend for `format` at `path`, truncating any existing file.
pub fn open_writer(
    path:   &Path,
    format: TableFormat,
    schema: SchemaRef,
) -> OutputResult<Box<dyn BatchWriter>> {
    Ok(match format {
        TableFormat::Arrow => Box::new(crate::ipc::IpcStreamWriter::new(path, &schema)?),
        TableFormat::Csv   => Box::new(crate::csv::CsvBatchWriter::new(path, &schema)?),
        #[cfg(feature = "parquet")]
        TableFormat::Parquet => Box::new(crate::parquet::ParquetBatchWriter::new(path, schema)?),
        #[cfg(not(feature = "parquet"))]
        TableFormat::Parquet => return Err(crate::OutputError::Unsupported("parquet")),
    })
}
