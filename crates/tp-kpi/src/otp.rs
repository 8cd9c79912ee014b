//! On-time performance of bus arrivals.

use tp_events::BusDelayRow;
use tp_output::TableRow;

use crate::KpiResult;
use crate::error::number;

/// Arrivals whose delay lies in `[min_delay, max_delay]` (seconds, both
/// ends inclusive).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OnTime {
    min_delay:   f64,
    max_delay:   f64,
    pub on_time: u64,
    pub total:   u64,
}

impl OnTime {
    pub fn new(min_delay: f64, max_delay: f64) -> Self {
        Self { min_delay, max_delay, on_time: 0, total: 0 }
    }

    pub fn add(&mut self, row: &BusDelayRow) -> KpiResult<()> {
        let delay = number(BusDelayRow::SCHEMA.name, "arrDelay", &row.arr_delay)?;
        self.total += 1;
        if (self.min_delay..=self.max_delay).contains(&delay) {
            self.on_time += 1;
        }
        Ok(())
    }

    /// Share of on-time arrivals in percent, `0.0` without arrivals.
    pub fn percent(&self) -> f64 {
        crate::percent(self.on_time, self.total)
    }
}

/// `(on_time, total, percent)` over the bus-delay table.
pub fn on_time_performance<'r>(
    rows: impl IntoIterator<Item = &'r BusDelayRow>,
    min_delay: f64,
    max_delay: f64,
) -> KpiResult<(u64, u64, f64)> {
    let mut otp = OnTime::new(min_delay, max_delay);
    for row in rows {
        otp.add(row)?;
    }
    Ok((otp.on_time, otp.total, otp.percent()))
}
