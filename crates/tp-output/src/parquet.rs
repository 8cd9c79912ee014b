//! Parquet output backend (feature `parquet`).
//!
//! Each flushed batch becomes its own row group, so the file layout mirrors
//! the batching of the other backends.

use std::fs::File;
use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::OutputResult;
use crate::writer::BatchWriter;

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// `finish()` **must** be called to write the Parquet footer; the sink does
/// this on drop as a last resort.
pub struct ParquetBatchWriter {
    inner: Option<ArrowWriter<File>>,
}

impl ParquetBatchWriter {
    pub fn new(path: &Path, schema: SchemaRef) -> OutputResult<Self> {
        let file = File::create(path)?;
        let inner = ArrowWriter::try_new(file, schema, Some(snappy_props()))?;
        Ok(Self { inner: Some(inner) })
    }
}

impl BatchWriter for ParquetBatchWriter {
    fn write_batch(&mut self, batch: &RecordBatch) -> OutputResult<()> {
        let Some(w) = self.inner.as_mut() else {
            return Ok(());
        };
        w.write(batch)?;
        w.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.inner.take() {
            w.close()?;
        }
        Ok(())
    }
}
