//! Bus service totals and the productivity / efficiency indices.

use tp_events::BusLinkTripRow;
use tp_output::TableRow;

use crate::KpiResult;
use crate::error::number;

/// Floor applied to a non-positive total distance before it enters `exp`.
const DISTANCE_FLOOR: f64 = 1e9;

/// Totals over the `bus_trip` table.  Revenue figures only count links
/// traversed with at least one passenger aboard.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ServiceMetrics {
    pub service_hours: f64,
    pub revenue_hours: f64,
    pub total_km:      f64,
    pub effective_km:  f64,
}

impl ServiceMetrics {
    pub fn add(&mut self, row: &BusLinkTripRow) -> KpiResult<()> {
        let table = BusLinkTripRow::SCHEMA.name;
        let hours = number(table, "travelTime", &row.travel_time)? / 3600.0;
        let km = number(table, "linkLen", &row.link_len)? / 1000.0;
        self.service_hours += hours;
        self.total_km += km;
        if row.have_passenger == "true" {
            self.revenue_hours += hours;
            self.effective_km += km;
        }
        Ok(())
    }

    pub fn from_rows<'r>(rows: impl IntoIterator<Item = &'r BusLinkTripRow>) -> KpiResult<Self> {
        let mut m = Self::default();
        for row in rows {
            m.add(row)?;
        }
        Ok(m)
    }
}

/// `exp(-baseline * service_hours / passengers)`; `0.0` without passengers.
pub fn productivity_index(service_hours: f64, passengers: u64, baseline: f64) -> f64 {
    if passengers == 0 {
        return 0.0;
    }
    (-baseline * service_hours / passengers as f64).exp()
}

/// `exp(-total_km / passengers)`; `0.0` without passengers.
pub fn efficiency_index(total_km: f64, passengers: u64) -> f64 {
    if passengers == 0 {
        return 0.0;
    }
    let distance = if total_km > 0.0 { total_km } else { DISTANCE_FLOOR };
    (-distance / passengers as f64).exp()
}

/// Share of the bus distance driven with passengers; `0.0` for no distance.
pub fn effective_distance_ratio(effective_km: f64, total_km: f64) -> f64 {
    if total_km == 0.0 { 0.0 } else { effective_km / total_km }
}
