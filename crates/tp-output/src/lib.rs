//! `tp-output` — batched columnar tables for extracted event data.
//!
//! Every extractor writes one all-text table through a
//! [`ColumnarBatchSink`], which buffers rows column by column and hands
//! full batches to a backend:
//!
//! | Format    | Feature   | Backend                  | Extension  |
//! |-----------|-----------|--------------------------|------------|
//! | `arrow`   | *(none)*  | [`IpcStreamWriter`]      | `.arrow`   |
//! | `csv`     | *(none)*  | [`CsvBatchWriter`]       | `.csv`     |
//! | `parquet` | `parquet` | `ParquetBatchWriter`     | `.parquet` |
//!
//! The KPI stage reads the tables back with [`open_table`] (record
//! batches) or [`read_rows`] (typed rows).
//!
//! # Usage
//!
//! ```rust,ignore
//! use tp_output::{ColumnarBatchSink, TableRow};
//! use tp_core::TableFormat;
//!
//! let mut sink = ColumnarBatchSink::create(path, TableFormat::Arrow, MyRow::SCHEMA)?
//!     .with_batch_size(50_000);
//! sink.append_row(row)?;
//! let stats = sink.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod ipc;
pub mod reader;
pub mod schema;
pub mod sink;
pub mod writer;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvBatchWriter;
pub use error::{OutputError, OutputResult};
pub use ipc::IpcStreamWriter;
pub use reader::{BatchIter, RowReader, count_rows, open_table, read_all, read_rows, string_column};
pub use schema::{TableRow, TableSchema};
pub use sink::{ColumnarBatchSink, DEFAULT_BATCH_SIZE, SinkStats};
pub use writer::{BatchWriter, open_writer};

#[cfg(feature = "parquet")]
pub use parquet::ParquetBatchWriter;
