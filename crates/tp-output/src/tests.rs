//! Integration tests for tp-output.

#[cfg(test)]
mod support {
    crate::table_row! {
        pub struct Pair("pairs") {
            left  => "left",
            right => "right",
        }
    }

    crate::table_row! {
        pub struct Single("singles") {
            value => "value",
        }
    }

    pub fn pair(l: &str, r: &str) -> Pair {
        Pair { left: l.into(), right: r.into() }
    }
}

// ── Schema ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod schema_tests {
    use arrow::datatypes::DataType;

    use super::support::{Pair, pair};
    use crate::TableRow;

    #[test]
    fn arrow_schema_is_all_text() {
        let schema = Pair::SCHEMA.arrow_schema();
        assert_eq!(schema.fields().len(), 2);
        for f in schema.fields() {
            assert_eq!(f.data_type(), &DataType::Utf8);
            assert!(!f.is_nullable());
        }
        assert_eq!(Pair::SCHEMA.index_of("right"), Some(1));
        assert_eq!(Pair::SCHEMA.index_of("nope"), None);
    }

    #[test]
    fn values_follow_schema_order() {
        assert_eq!(pair("a", "b").into_values(), ["a", "b"]);
        assert_eq!(Pair::from_values(vec!["x".into()]), pair("x", ""));
    }
}

// ── Sink ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sink_tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use arrow::record_batch::RecordBatch;
    use tempfile::TempDir;
    use tp_core::TableFormat;

    use super::support::{Pair, Single, pair};
    use crate::{
        BatchWriter, ColumnarBatchSink, OutputError, SinkStats, TableRow, count_rows, open_table,
        read_all,
    };

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn flushes_at_threshold_and_writes_remainder() {
        let dir = tmp();
        let path = dir.path().join("pairs.arrow");
        let mut sink = ColumnarBatchSink::create(&path, TableFormat::Arrow, Pair::SCHEMA)
            .unwrap()
            .with_batch_size(50_000);
        for i in 0..50_001 {
            sink.append_row(pair(&i.to_string(), "r")).unwrap();
        }
        assert_eq!(sink.buffered(), 1, "first 50 000 rows already flushed");
        let stats = sink.finish().unwrap();
        assert_eq!(stats.batches_written, 2);
        assert_eq!(stats.rows_written, 50_001);

        let sizes: Vec<usize> = open_table(&path, TableFormat::Arrow)
            .unwrap()
            .map(|b| b.unwrap().num_rows())
            .collect();
        assert_eq!(sizes, [50_000, 1]);
    }

    #[test]
    fn exact_multiple_writes_no_empty_batch() {
        let dir = tmp();
        let path = dir.path().join("pairs.arrow");
        let mut sink = ColumnarBatchSink::create(&path, TableFormat::Arrow, Pair::SCHEMA)
            .unwrap()
            .with_batch_size(2);
        for i in 0..4 {
            sink.append_row(pair(&i.to_string(), "r")).unwrap();
        }
        let stats = sink.finish().unwrap();
        assert_eq!(stats.batches_written, 2);
        assert_eq!(open_table(&path, TableFormat::Arrow).unwrap().count(), 2);
    }

    #[test]
    fn empty_table_has_schema_only() {
        let dir = tmp();
        let path = dir.path().join("pairs.arrow");
        let mut sink = ColumnarBatchSink::create(&path, TableFormat::Arrow, Pair::SCHEMA).unwrap();
        let stats = sink.finish().unwrap();
        assert_eq!(stats.batches_written, 0);
        assert_eq!(count_rows(&path, TableFormat::Arrow).unwrap(), 0);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let path = dir.path().join("pairs.arrow");
        let mut sink = ColumnarBatchSink::create(&path, TableFormat::Arrow, Pair::SCHEMA).unwrap();
        sink.append_row(pair("a", "b")).unwrap();
        let first = sink.finish().unwrap();
        let second = sink.finish().unwrap();
        assert_eq!(first, second);
        assert!(matches!(sink.append_row(pair("c", "d")), Err(OutputError::Finished("pairs"))));
    }

    #[test]
    fn drop_finishes_the_file() {
        let dir = tmp();
        let path = dir.path().join("pairs.arrow");
        {
            let mut sink =
                ColumnarBatchSink::create(&path, TableFormat::Arrow, Pair::SCHEMA).unwrap();
            sink.append_row(pair("a", "b")).unwrap();
        }
        let rows: Vec<Pair> = read_all(&path, TableFormat::Arrow).unwrap();
        assert_eq!(rows, [pair("a", "b")]);
    }

    #[test]
    fn wrong_arity_rejected() {
        let dir = tmp();
        let mut sink =
            ColumnarBatchSink::create(&dir.path().join("p.arrow"), TableFormat::Arrow, Pair::SCHEMA)
                .unwrap();
        let err = sink.append(vec!["only one".into()]).unwrap_err();
        assert!(matches!(err, OutputError::SchemaMismatch { table: "pairs", .. }));
        assert_eq!(sink.buffered(), 0);
    }

    #[test]
    fn foreign_row_type_rejected() {
        let dir = tmp();
        let mut sink =
            ColumnarBatchSink::create(&dir.path().join("p.arrow"), TableFormat::Arrow, Pair::SCHEMA)
                .unwrap();
        let err = sink.append_row(Single { value: "v".into() }).unwrap_err();
        assert!(matches!(err, OutputError::SchemaMismatch { .. }));
    }

    #[test]
    fn append_map_checks_field_set() {
        let dir = tmp();
        let path = dir.path().join("p.arrow");
        let mut sink = ColumnarBatchSink::create(&path, TableFormat::Arrow, Pair::SCHEMA).unwrap();

        let mut row = HashMap::new();
        row.insert("right".to_owned(), "2".to_owned());
        row.insert("left".to_owned(), "1".to_owned());
        sink.append_map(&row).unwrap();

        row.remove("left");
        row.insert("middle".to_owned(), "x".to_owned());
        assert!(sink.append_map(&row).is_err());

        sink.finish().unwrap();
        let rows: Vec<Pair> = read_all(&path, TableFormat::Arrow).unwrap();
        assert_eq!(rows, [pair("1", "2")]);
    }

    #[test]
    fn csv_round_trip() {
        let dir = tmp();
        let path = dir.path().join("pairs.csv");
        let mut sink = ColumnarBatchSink::create(&path, TableFormat::Csv, Pair::SCHEMA)
            .unwrap()
            .with_batch_size(3);
        let expected: Vec<Pair> = (0..10).map(|i| pair(&i.to_string(), "with, comma")).collect();
        for row in expected.iter().cloned() {
            sink.append_row(row).unwrap();
        }
        sink.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("left,right"));

        let rows: Vec<Pair> = read_all(&path, TableFormat::Csv).unwrap();
        assert_eq!(rows, expected);
    }

    #[test]
    fn missing_column_reported() {
        let dir = tmp();
        let path = dir.path().join("singles.arrow");
        let mut sink = ColumnarBatchSink::create(&path, TableFormat::Arrow, Single::SCHEMA).unwrap();
        sink.append_row(Single { value: "v".into() }).unwrap();
        sink.finish().unwrap();

        let err = read_all::<Pair>(&path, TableFormat::Arrow).unwrap_err();
        assert!(matches!(err, OutputError::MissingColumn(ref c) if c == "left"));
    }

    /// Backend that rejects every batch and records what it was handed.
    struct RejectingWriter {
        seen: Arc<Mutex<Vec<usize>>>,
    }

    impl BatchWriter for RejectingWriter {
        fn write_batch(&mut self, batch: &RecordBatch) -> crate::OutputResult<()> {
            self.seen.lock().unwrap().push(batch.num_rows());
            Err(std::io::Error::other("disk full").into())
        }

        fn finish(&mut self) -> crate::OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_batch_is_not_counted_or_rewritten() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let writer = RejectingWriter { seen: Arc::clone(&seen) };
        let mut sink = ColumnarBatchSink::from_writer(Box::new(writer), Pair::SCHEMA).with_batch_size(2);

        sink.append_row(pair("a", "b")).unwrap();
        let err = sink.append_row(pair("c", "d")).unwrap_err();
        assert!(matches!(err, OutputError::Io(_)));
        assert_eq!(sink.buffered(), 0);

        let stats = sink.finish().unwrap();
        assert_eq!(stats, SinkStats::default());
        assert_eq!(*seen.lock().unwrap(), [2], "no empty batch after the failure");
    }

    #[cfg(not(feature = "parquet"))]
    #[test]
    fn parquet_requires_feature() {
        let dir = tmp();
        let res = ColumnarBatchSink::create(
            &dir.path().join("p.parquet"),
            TableFormat::Parquet,
            Pair::SCHEMA,
        );
        assert!(matches!(res, Err(OutputError::Unsupported("parquet"))));
    }
}

// ── Parquet ───────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use parquet::file::reader::{FileReader, SerializedFileReader};
    use tp_core::TableFormat;

    use super::support::{Pair, pair};
    use crate::{ColumnarBatchSink, TableRow, open_table, read_all};

    #[test]
    fn one_row_group_per_batch() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("pairs.parquet");
        let mut sink = ColumnarBatchSink::create(&path, TableFormat::Parquet, Pair::SCHEMA)
            .unwrap()
            .with_batch_size(4);
        for i in 0..10 {
            sink.append_row(pair(&i.to_string(), "r")).unwrap();
        }
        let stats = sink.finish().unwrap();
        assert_eq!(stats.batches_written, 3);

        let file = std::fs::File::open(&path).unwrap();
        let reader = SerializedFileReader::new(file).unwrap();
        assert_eq!(reader.metadata().num_row_groups(), 3);

        let total: usize = open_table(&path, TableFormat::Parquet)
            .unwrap()
            .map(|b| b.unwrap().num_rows())
            .sum();
        assert_eq!(total, 10);
        let rows: Vec<Pair> = read_all(&path, TableFormat::Parquet).unwrap();
        assert_eq!(rows[9], pair("9", "r"));
    }
}
