//! `ColumnarBatchSink`: row-at-a-time appends, batch-at-a-time writes.
//!
//! The sink keeps one `StringBuilder` per column.  When the number of
//! buffered rows reaches the batch size, the builders are frozen into a
//! `RecordBatch` and handed to the backend writer.  `finish` writes the
//! remaining rows (if any) and closes the writer; a table that received no
//! rows therefore contains only its schema.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringBuilder};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use tp_core::TableFormat;
use tracing::{debug, warn};

use crate::schema::{TableRow, TableSchema};
use crate::writer::{BatchWriter, open_writer};
use crate::{OutputError, OutputResult};

/// Rows per batch unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 50_000;

/// Counters reported by [`ColumnarBatchSink::finish`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub rows_written:    u64,
    pub batches_written: u64,
}

pub struct ColumnarBatchSink {
    schema:       TableSchema,
    arrow_schema: SchemaRef,
    columns:      Vec<StringBuilder>,
    buffered:     usize,
    batch_size:   usize,
    writer:       Box<dyn BatchWriter>,
    stats:        SinkStats,
    finished:     bool,
}

impl ColumnarBatchSink {
    /// Open a sink writing `schema` to `path` in `format`.
    pub fn create(path: &Path, format: TableFormat, schema: TableSchema) -> OutputResult<Self> {
        let arrow_schema = schema.arrow_schema();
        let writer = open_writer(path, format, Arc::clone(&arrow_schema))?;
        debug!(table = schema.name, path = %path.display(), ?format, "opened table sink");
        Ok(Self::with_writer(writer, schema, arrow_schema))
    }

    /// Wrap an already opened backend.
    pub fn from_writer(writer: Box<dyn BatchWriter>, schema: TableSchema) -> Self {
        let arrow_schema = schema.arrow_schema();
        Self::with_writer(writer, schema, arrow_schema)
    }

    fn with_writer(writer: Box<dyn BatchWriter>, schema: TableSchema, arrow_schema: SchemaRef) -> Self {
        Self {
            columns: (0..schema.len()).map(|_| StringBuilder::new()).collect(),
            schema,
            arrow_schema,
            buffered: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            writer,
            stats: SinkStats::default(),
            finished: false,
        }
    }

    /// Set the flush threshold (values below 1 are treated as 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn schema(&self) -> TableSchema {
        self.schema
    }

    /// Rows appended but not yet written.
    pub fn buffered(&self) -> usize {
        self.buffered
    }

    pub fn stats(&self) -> SinkStats {
        self.stats
    }

    /// Append one row given as values in schema order.
    pub fn append(&mut self, values: Vec<String>) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished(self.schema.name));
        }
        if values.len() != self.columns.len() {
            return Err(OutputError::SchemaMismatch {
                table:  self.schema.name,
                detail: format!("expected {} values, got {}", self.columns.len(), values.len()),
            });
        }
        for (builder, value) in self.columns.iter_mut().zip(&values) {
            builder.append_value(value);
        }
        self.push_row()
    }

    /// Append a typed row.  The row type must belong to this table.
    pub fn append_row<R: TableRow>(&mut self, row: R) -> OutputResult<()> {
        if R::SCHEMA != self.schema {
            return Err(OutputError::SchemaMismatch {
                table:  self.schema.name,
                detail: format!("row type belongs to table `{}`", R::SCHEMA.name),
            });
        }
        self.append(row.into_values())
    }

    /// Append a row given as a field-name map.  The key set must equal the
    /// schema's field set exactly.
    pub fn append_map(&mut self, row: &HashMap<String, String>) -> OutputResult<()> {
        if row.len() != self.schema.len() {
            return Err(OutputError::SchemaMismatch {
                table:  self.schema.name,
                detail: format!("expected {} fields, got {}", self.schema.len(), row.len()),
            });
        }
        let values = self
            .schema
            .fields
            .iter()
            .map(|field| {
                row.get(*field).cloned().ok_or_else(|| OutputError::SchemaMismatch {
                    table:  self.schema.name,
                    detail: format!("missing field `{field}`"),
                })
            })
            .collect::<OutputResult<Vec<_>>>()?;
        self.append(values)
    }

    fn push_row(&mut self) -> OutputResult<()> {
        self.buffered += 1;
        if self.buffered >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Write the buffered rows as one batch.  No-op when nothing is buffered.
    ///
    /// The builders are drained before the write, so rows of a batch the
    /// backend rejected are gone and are not counted as written.
    pub fn flush(&mut self) -> OutputResult<()> {
        let rows = std::mem::take(&mut self.buffered);
        if rows == 0 {
            return Ok(());
        }
        let arrays: Vec<ArrayRef> = self
            .columns
            .iter_mut()
            .map(|b| Arc::new(b.finish()) as ArrayRef)
            .collect();
        let batch = RecordBatch::try_new(Arc::clone(&self.arrow_schema), arrays)?;
        self.writer.write_batch(&batch)?;

        self.stats.rows_written += rows as u64;
        self.stats.batches_written += 1;
        debug!(table = self.schema.name, rows, "wrote batch");
        Ok(())
    }

    /// Write the remainder and close the backend.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<SinkStats> {
        if !self.finished {
            self.flush()?;
            self.writer.finish()?;
            self.finished = true;
        }
        Ok(self.stats)
    }
}

impl Drop for ColumnarBatchSink {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.finish() {
                warn!(table = self.schema.name, error = %e, "failed to finish table on drop");
            }
        }
    }
}
