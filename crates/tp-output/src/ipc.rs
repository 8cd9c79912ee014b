//! Arrow IPC stream backend.
//!
//! The file is a plain IPC *stream* (schema message, one record-batch
//! message per flushed batch, end-of-stream marker), readable by
//! `pyarrow.ipc.open_stream` as well as by [`open_table`](crate::open_table).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use arrow::datatypes::Schema;
use arrow::ipc::writer::StreamWriter;
use arrow::record_batch::RecordBatch;

use crate::OutputResult;
use crate::writer::BatchWriter;

pub struct IpcStreamWriter {
    inner: Option<StreamWriter<BufWriter<File>>>,
}

impl IpcStreamWriter {
    pub fn new(path: &Path, schema: &Schema) -> OutputResult<Self> {
        let file = BufWriter::new(File::create(path)?);
        let inner = StreamWriter::try_new(file, schema)?;
        Ok(Self { inner: Some(inner) })
    }
}

impl BatchWriter for IpcStreamWriter {
    fn write_batch(&mut self, batch: &RecordBatch) -> OutputResult<()> {
        if let Some(w) = self.inner.as_mut() {
            w.write(batch)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(mut w) = self.inner.take() {
            w.finish()?;
            let mut file = w.into_inner()?;
            file.flush()?;
        }
        Ok(())
    }
}
