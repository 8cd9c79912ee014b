//! `ExtractionEngine`: drives extractors over the event log and writes
//! their rows to per-table sinks.
//!
//! Two schedules produce identical tables:
//!
//! * **fused**: one traversal of the log, every event offered to every
//!   extractor in registration order;
//! * **separate**: one full traversal per extractor, each with a freshly
//!   opened reader.
//!
//! Extractor state is never shared between passes.  A sink is finished when its pass ends; if a pass fails the
//! sink is still closed (on drop) so that what was written stays readable.

use std::path::Path;

use tp_core::{DriverPrefix, Params, ScenarioPaths, TableFormat};
use tp_network::{EntityMaps, ZoneGenerator};
use tp_output::{ColumnarBatchSink, OutputError, TableRow, TableSchema};
use tracing::{debug, info, warn};

use crate::extractors::{
    BoardingExtractor, BusDelayExtractor, BusLinkTripExtractor, PersonTripExtractor,
    TravelTimeExtractor,
};
use crate::{
    BoardingRow, BusDelayRow, BusLinkTripRow, Event, EventReader, EventResult, Extractor,
    PersonTripRow, TravelTimeRow,
};

/// Events between two progress messages.
const PROGRESS_EVERY: u64 = 1_000_000;

/// Outcome of one extraction pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassSummary {
    pub table:           &'static str,
    pub rows:            u64,
    pub batches:         u64,
    /// Entries still open at end of stream; never written.
    pub dropped_pending: usize,
    /// Entries closed without producing a row.
    pub discarded:       u64,
}

/// Type-erased extraction pass, so that passes over different row types
/// can share one engine.
pub trait EventConsumer {
    fn table(&self) -> &'static str;

    fn consume(&mut self, event: &Event) -> EventResult<()>;

    /// Flush the sink and report.  Consumes the pass.
    fn finish(self: Box<Self>) -> EventResult<PassSummary>;
}

/// An extractor bound to the sink of its table.
pub struct ExtractionPass<E: Extractor> {
    extractor: E,
    sink:      ColumnarBatchSink,
}

impl<E: Extractor> ExtractionPass<E> {
    /// Pair `extractor` with an open sink.  The sink must hold the
    /// extractor's table.
    pub fn new(extractor: E, sink: ColumnarBatchSink) -> EventResult<Self> {
        let expected = <E::Row as TableRow>::SCHEMA;
        if sink.schema() != expected {
            return Err(OutputError::SchemaMismatch {
                table:  expected.name,
                detail: format!("sink is open for table `{}`", sink.schema().name),
            }
            .into());
        }
        Ok(Self { extractor, sink })
    }

    /// Open a sink for the extractor's table at `path`.
    pub fn create(
        extractor: E,
        path: &Path,
        format: TableFormat,
        batch_size: usize,
    ) -> EventResult<Self> {
        let sink = ColumnarBatchSink::create(path, format, <E::Row as TableRow>::SCHEMA)?
            .with_batch_size(batch_size);
        Self::new(extractor, sink)
    }
}

impl<E: Extractor> EventConsumer for ExtractionPass<E> {
    fn table(&self) -> &'static str {
        <E::Row as TableRow>::SCHEMA.name
    }

    fn consume(&mut self, event: &Event) -> EventResult<()> {
        if let Some(row) = self.extractor.on_event(event)? {
            self.sink.append_row(row)?;
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> EventResult<PassSummary> {
        let stats = self.sink.finish()?;
        let summary = PassSummary {
            table:           self.table(),
            rows:            stats.rows_written,
            batches:         stats.batches_written,
            dropped_pending: self.extractor.pending(),
            discarded:       self.extractor.discarded(),
        };
        if summary.dropped_pending > 0 {
            debug!(
                table = summary.table,
                dropped = summary.dropped_pending,
                "pending entries left open at end of stream"
            );
        }
        info!(
            table = summary.table,
            rows = summary.rows,
            batches = summary.batches,
            discarded = summary.discarded,
            "table written"
        );
        Ok(summary)
    }
}

/// A set of extraction passes run over one event log.
#[derive(Default)]
pub struct ExtractionEngine<'a> {
    passes: Vec<Box<dyn EventConsumer + 'a>>,
}

impl<'a> ExtractionEngine<'a> {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    pub fn add<E: Extractor + 'a>(&mut self, pass: ExtractionPass<E>) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Offer every event of one traversal to all passes.
    pub fn run_fused<I>(self, events: I) -> EventResult<Vec<PassSummary>>
    where
        I: IntoIterator<Item = EventResult<Event>>,
    {
        let mut passes = self.passes;
        let mut seen = 0u64;
        for event in events {
            let event = event?;
            for pass in passes.iter_mut() {
                pass.consume(&event)?;
            }
            seen += 1;
            if seen % PROGRESS_EVERY == 0 {
                debug!(events = seen, "extraction progress");
            }
        }
        info!(events = seen, passes = passes.len(), "fused extraction finished");
        passes.into_iter().map(|p| p.finish()).collect()
    }

    /// Run each pass over its own traversal.  `open` is called once per pass.
    pub fn run_separate<I, F>(self, mut open: F) -> EventResult<Vec<PassSummary>>
    where
        I: IntoIterator<Item = EventResult<Event>>,
        F: FnMut() -> EventResult<I>,
    {
        let mut summaries = Vec::with_capacity(self.passes.len());
        for mut pass in self.passes {
            let mut seen = 0u64;
            for event in open()? {
                pass.consume(&event?)?;
                seen += 1;
                if seen % PROGRESS_EVERY == 0 {
                    debug!(table = pass.table(), events = seen, "extraction progress");
                }
            }
            summaries.push(pass.finish()?);
        }
        Ok(summaries)
    }
}

/// Extract all five tables of one scenario into `paths.output_dir`.
///
/// Table files are named after their schema (`bus_trip.arrow`, ...).  The
/// output directory must exist.
pub fn extract_scenario(
    maps: &EntityMaps,
    zones: &dyn ZoneGenerator,
    params: &Params,
    paths: &ScenarioPaths,
) -> EventResult<Vec<PassSummary>> {
    let format = params.output.format;
    let batch = params.output.batch_size;
    let trip_driver = DriverPrefix::new(params.trip_driver_prefix.as_str());
    let table = |schema: TableSchema| paths.table(schema.name, format);

    let mut engine = ExtractionEngine::new();
    engine
        .add(ExtractionPass::create(
            BusDelayExtractor::new(maps),
            &table(BusDelayRow::SCHEMA),
            format,
            batch,
        )?)
        .add(ExtractionPass::create(
            BoardingExtractor::new(maps, DriverPrefix::new(params.boarding_driver_prefix.as_str())),
            &table(BoardingRow::SCHEMA),
            format,
            batch,
        )?)
        .add(ExtractionPass::create(
            TravelTimeExtractor::new(maps, trip_driver.clone()),
            &table(TravelTimeRow::SCHEMA),
            format,
            batch,
        )?)
        .add(ExtractionPass::create(
            PersonTripExtractor::new(maps, zones, trip_driver),
            &table(PersonTripRow::SCHEMA),
            format,
            batch,
        )?)
        .add(ExtractionPass::create(
            BusLinkTripExtractor::new(maps),
            &table(BusLinkTripRow::SCHEMA),
            format,
            batch,
        )?);

    let summaries = if params.output.fused {
        engine.run_fused(EventReader::open(&paths.events)?)?
    } else {
        engine.run_separate(|| EventReader::open(&paths.events))?
    };

    let dropped: usize = summaries.iter().map(|s| s.dropped_pending).sum();
    if dropped > 0 {
        warn!(scenario = %paths.scenario, dropped, "open entries dropped at end of event log");
    }
    Ok(summaries)
}
