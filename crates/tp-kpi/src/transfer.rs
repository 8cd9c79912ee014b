//! Bus-to-bus transfers per public-transport trip.

use tp_core::BusHint;
use tp_events::PersonTripRow;

/// Over person trips with main mode `pt`, counts adjacent legs that are both
/// buses.
#[derive(Clone, Debug)]
pub struct TransferRate {
    hint:          BusHint,
    pub transfers: u64,
    pub pt_trips:  u64,
}

impl TransferRate {
    pub fn new(hint: BusHint) -> Self {
        Self { hint, transfers: 0, pt_trips: 0 }
    }

    pub fn add(&mut self, row: &PersonTripRow) {
        if row.main_mode != "pt" {
            return;
        }
        self.pt_trips += 1;
        if row.veh_types.is_empty() {
            return;
        }
        let buses: Vec<bool> = row.veh_types.split(';').map(|t| self.hint.matches(t)).collect();
        self.transfers += buses.windows(2).filter(|w| w[0] && w[1]).count() as u64;
    }

    /// Transfers per pt trip, `0.0` without pt trips.
    pub fn rate(&self) -> f64 {
        if self.pt_trips == 0 { 0.0 } else { self.transfers as f64 / self.pt_trips as f64 }
    }
}
