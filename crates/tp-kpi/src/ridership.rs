//! Ridership: distinct persons that boarded a bus at least once.

use std::collections::HashSet;

use tp_events::BoardingRow;

#[derive(Clone, Debug, Default)]
pub struct Ridership {
    riders: HashSet<String>,
}

impl Ridership {
    pub fn add(&mut self, row: &BoardingRow) {
        self.riders.insert(row.person_id.clone());
    }

    pub fn count(&self) -> u64 {
        self.riders.len() as u64
    }
}

/// Number of distinct `person_id`s in the boarding table.
pub fn ridership<'r>(rows: impl IntoIterator<Item = &'r BoardingRow>) -> u64 {
    let mut r = Ridership::default();
    rows.into_iter().for_each(|row| r.add(row));
    r.count()
}
