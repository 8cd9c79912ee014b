//! CSV output backend.
//!
//! Writes a header row followed by one record per table row.  Every column
//! is text, so values are written verbatim.

use std::fs::File;
use std::path::Path;

use arrow::array::{Array, StringArray};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;

use crate::writer::BatchWriter;
use crate::{OutputError, OutputResult};

pub struct CsvBatchWriter {
    inner: Option<csv::Writer<File>>,
}

impl CsvBatchWriter {
    pub fn new(path: &Path, schema: &Schema) -> OutputResult<Self> {
        let mut w = csv::Writer::from_path(path)?;
        w.write_record(schema.fields().iter().map(|f| f.name().as_str()))?;
        Ok(Self { inner: Some(w) })
    }
}

impl BatchWriter for CsvBatchWriter {
    fn write_batch(&mut self, batch: &RecordBatch) -> OutputResult<()> {
        let Some(w) = self.inner.as_mut() else {
            return Ok(());
        };
        let schema = batch.schema();
        let columns = batch
            .columns()
            .iter()
            .zip(schema.fields())
            .map(|(col, field)| {
                col.as_any()
                    .downcast_ref::<StringArray>()
                    .ok_or_else(|| OutputError::NotText(field.name().clone()))
            })
            .collect::<OutputResult<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            w.write_record(columns.iter().map(|c| c.value(row)))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(mut w) = self.inner.take() {
            w.flush()?;
        }
        Ok(())
    }
}
