//! The `Extractor` trait: one state machine per derived table.

use tp_output::TableRow;

use crate::{Event, EventResult};

#[cfg(feature = "fx-hash")]
pub(crate) type PendingMap<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type PendingMap<K, V> = std::collections::HashMap<K, V>;

/// A deterministic event-driven state machine producing rows of one table.
///
/// Extractors see every event of the log in order and return at most one
/// finished row per event.  Events referring to unknown or filtered
/// entities are ignored.  An `Err` is reserved for events the extractor
/// acts on but cannot interpret (missing or unparsable time/coordinates).
pub trait Extractor {
    type Row: TableRow;

    fn on_event(&mut self, event: &Event) -> EventResult<Option<Self::Row>>;

    /// Entries opened but not yet closed.  Whatever is left at end of stream
    /// is dropped without being written.
    fn pending(&self) -> usize;

    /// Entries closed without producing a row (e.g. walk-only trips).
    fn discarded(&self) -> u64 {
        0
    }
}

/// Join ids with `;` the way the list columns are stored.
pub(crate) fn join_list(items: &[String]) -> String {
    items.join(";")
}

/// The `time` attribute as written in the log, after checking it parses.
pub(crate) fn raw_time(event: &Event) -> EventResult<String> {
    event.time()?;
    Ok(event.require("time")?.to_owned())
}
