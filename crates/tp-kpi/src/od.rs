//! Origin-destination trip counts between grid zones.

use std::collections::HashMap;
use std::path::Path;

use csv::Writer;
use tp_core::UNDEFINED;
use tp_events::PersonTripRow;

use crate::KpiResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OdPair {
    pub origin:      String,
    pub destination: String,
    pub trips:       u64,
}

/// Trip counts keyed by `(origin zone, destination zone)`.  Trips with an
/// undefined zone at either end are not counted.
#[derive(Clone, Debug, Default)]
pub struct OdMatrix {
    counts: HashMap<(String, String), u64>,
}

impl OdMatrix {
    pub fn add(&mut self, row: &PersonTripRow) {
        if row.origin_zone == UNDEFINED || row.dest_zone == UNDEFINED {
            return;
        }
        *self
            .counts
            .entry((row.origin_zone.clone(), row.dest_zone.clone()))
            .or_default() += 1;
    }

    /// Number of distinct OD pairs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn trips(&self, origin: &str, destination: &str) -> u64 {
        self.counts
            .get(&(origin.to_owned(), destination.to_owned()))
            .copied()
            .unwrap_or(0)
    }

    /// The `n` busiest pairs, by trips descending, ties by origin then
    /// destination.
    pub fn top(&self, n: usize) -> Vec<OdPair> {
        let mut pairs: Vec<OdPair> = self
            .counts
            .iter()
            .map(|((o, d), &trips)| OdPair { origin: o.clone(), destination: d.clone(), trips })
            .collect();
        pairs.sort_by(|a, b| {
            b.trips
                .cmp(&a.trips)
                .then_with(|| a.origin.cmp(&b.origin))
                .then_with(|| a.destination.cmp(&b.destination))
        });
        pairs.truncate(n);
        pairs
    }

    /// Write the top `n` pairs as `origin,destination,trips`.
    pub fn write_csv(&self, path: &Path, n: usize) -> KpiResult<()> {
        let mut w = Writer::from_path(path)?;
        w.write_record(["origin", "destination", "trips"])?;
        for pair in self.top(n) {
            w.write_record([pair.origin, pair.destination, pair.trips.to_string()])?;
        }
        w.flush()?;
        Ok(())
    }
}
