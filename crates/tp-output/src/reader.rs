//! Reading extracted tables back for the KPI stage.
//!
//! [`open_table`] yields record batches regardless of backend;
//! [`read_rows`] goes one step further and decodes each row into a
//! [`TableRow`] type, looking columns up by name.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::ipc::reader::StreamReader;
use arrow::record_batch::RecordBatch;
use tp_core::TableFormat;

use crate::schema::TableRow;
use crate::{OutputError, OutputResult};

/// Boxed stream of record batches.
pub type BatchIter = Box<dyn Iterator<Item = OutputResult<RecordBatch>>>;

/// Rows per batch when reading CSV.
const CSV_READ_BATCH: usize = 8_192;

/// Open a table written by [`ColumnarBatchSink`](crate::ColumnarBatchSink).
pub fn open_table(path: &Path, format: TableFormat) -> OutputResult<BatchIter> {
    match format {
        TableFormat::Arrow => {
            let reader = StreamReader::try_new(BufReader::new(File::open(path)?), None)?;
            Ok(Box::new(reader.map(|b| b.map_err(OutputError::from))))
        }
        TableFormat::Csv => Ok(Box::new(CsvBatches::open(path)?)),
        #[cfg(feature = "parquet")]
        TableFormat::Parquet => {
            use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
            let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?.build()?;
            Ok(Box::new(reader.map(|b| b.map_err(OutputError::from))))
        }
        #[cfg(not(feature = "parquet"))]
        TableFormat::Parquet => Err(OutputError::Unsupported("parquet")),
    }
}

/// The text column `name` of `batch`.
pub fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> OutputResult<&'a StringArray> {
    batch
        .column_by_name(name)
        .ok_or_else(|| OutputError::MissingColumn(name.to_owned()))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| OutputError::NotText(name.to_owned()))
}

/// Iterate the rows of a table as `R`.
pub fn read_rows<R: TableRow>(path: &Path, format: TableFormat) -> OutputResult<RowReader<R>> {
    Ok(RowReader {
        batches: open_table(path, format)?,
        pending: Vec::new().into_iter(),
    })
}

/// Convenience: collect all rows of a table.
pub fn read_all<R: TableRow>(path: &Path, format: TableFormat) -> OutputResult<Vec<R>> {
    read_rows(path, format)?.collect()
}

pub struct RowReader<R> {
    batches: BatchIter,
    pending: std::vec::IntoIter<R>,
}

impl<R: TableRow> Iterator for RowReader<R> {
    type Item = OutputResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.pending.next() {
                return Some(Ok(row));
            }
            match self.batches.next()? {
                Ok(batch) => match rows_from_batch::<R>(&batch) {
                    Ok(rows) => self.pending = rows.into_iter(),
                    Err(e) => return Some(Err(e)),
                },
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

fn rows_from_batch<R: TableRow>(batch: &RecordBatch) -> OutputResult<Vec<R>> {
    let columns = R::SCHEMA
        .fields
        .iter()
        .map(|f| string_column(batch, f))
        .collect::<OutputResult<Vec<_>>>()?;
    Ok((0..batch.num_rows())
        .map(|i| R::from_values(columns.iter().map(|c| c.value(i).to_owned()).collect()))
        .collect())
}

// ── CSV ───────────────────────────────────────────────────────────────────────

/// Reads a header-first CSV file into all-text record batches.
struct CsvBatches {
    reader: csv::Reader<File>,
    schema: SchemaRef,
    record: csv::StringRecord,
    done:   bool,
}

impl CsvBatches {
    fn open(path: &Path) -> OutputResult<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let schema = Arc::new(Schema::new(
            reader
                .headers()?
                .iter()
                .map(|h| Field::new(h, DataType::Utf8, false))
                .collect::<Vec<_>>(),
        ));
        Ok(Self { reader, schema, record: csv::StringRecord::new(), done: false })
    }

    fn next_batch(&mut self) -> OutputResult<Option<RecordBatch>> {
        let width = self.schema.fields().len();
        let mut builders: Vec<StringBuilder> = (0..width).map(|_| StringBuilder::new()).collect();
        let mut rows = 0;
        while rows < CSV_READ_BATCH {
            if !self.reader.read_record(&mut self.record)? {
                self.done = true;
                break;
            }
            for (i, b) in builders.iter_mut().enumerate() {
                b.append_value(self.record.get(i).unwrap_or(""));
            }
            rows += 1;
        }
        if rows == 0 {
            return Ok(None);
        }
        let arrays: Vec<ArrayRef> = builders
            .iter_mut()
            .map(|b| Arc::new(b.finish()) as ArrayRef)
            .collect();
        Ok(Some(RecordBatch::try_new(Arc::clone(&self.schema), arrays)?))
    }
}

impl Iterator for CsvBatches {
    type Item = OutputResult<RecordBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_batch() {
            Ok(Some(batch)) => Some(Ok(batch)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Total number of rows across all batches.
pub fn count_rows(path: &Path, format: TableFormat) -> OutputResult<usize> {
    let mut n = 0;
    for batch in open_table(path, format)? {
        n += batch?.num_rows();
    }
    Ok(n)
}
