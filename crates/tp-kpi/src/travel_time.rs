//! Average trip times by mode and the two travel-time ratio KPIs.

use tp_core::BusHint;
use tp_events::TravelTimeRow;
use tp_output::TableRow;

use crate::KpiResult;
use crate::error::number;

/// Running mean of trip durations.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ModeAverage {
    total_s: f64,
    trips:   u64,
}

impl ModeAverage {
    pub fn add(&mut self, seconds: f64) {
        self.total_s += seconds;
        self.trips += 1;
    }

    pub fn trips(&self) -> u64 {
        self.trips
    }

    /// Mean duration in seconds, `0.0` without trips.
    pub fn mean(&self) -> f64 {
        if self.trips == 0 { 0.0 } else { self.total_s / self.trips as f64 }
    }
}

/// Bus and car averages over the `travel_time_all_vehicle` table.
///
/// A trip counts as a bus trip when its joined vehicle-type list matches the
/// bus hint, i.e. when any leg used a bus.  A car trip is one whose main
/// mode is exactly `car`.  A row may count for both.
#[derive(Clone, Debug)]
pub struct TravelTimeStats {
    hint:    BusHint,
    pub bus: ModeAverage,
    pub car: ModeAverage,
}

impl TravelTimeStats {
    pub fn new(hint: BusHint) -> Self {
        Self { hint, bus: ModeAverage::default(), car: ModeAverage::default() }
    }

    pub fn add(&mut self, row: &TravelTimeRow) -> KpiResult<()> {
        let is_bus = self.hint.matches(&row.veh_types);
        let is_car = row.main_mode == "car";
        if !is_bus && !is_car {
            return Ok(());
        }
        let seconds = number(TravelTimeRow::SCHEMA.name, "travelTime", &row.travel_time)?;
        if is_bus {
            self.bus.add(seconds);
        }
        if is_car {
            self.car.add(seconds);
        }
        Ok(())
    }
}

/// Mean bus trip time and the number of bus trips.
pub fn average_bus_travel_time<'r>(
    rows: impl IntoIterator<Item = &'r TravelTimeRow>,
    hint: &BusHint,
) -> KpiResult<(f64, u64)> {
    let mut stats = TravelTimeStats::new(hint.clone());
    for row in rows {
        stats.add(row)?;
    }
    Ok((stats.bus.mean(), stats.bus.trips()))
}

/// Mean car trip time and the number of car trips.
pub fn average_car_travel_time<'r>(
    rows: impl IntoIterator<Item = &'r TravelTimeRow>,
) -> KpiResult<(f64, u64)> {
    let mut car = ModeAverage::default();
    for row in rows.into_iter().filter(|r| r.main_mode == "car") {
        car.add(number(TravelTimeRow::SCHEMA.name, "travelTime", &row.travel_time)?);
    }
    Ok((car.mean(), car.trips()))
}

/// `exp(-after / before)`: 1 when bus trips became instant, `1/e` when
/// unchanged.  `0.0` for a zero reference time.
pub fn bus_travel_time_ratio(before_s: f64, after_s: f64) -> f64 {
    if before_s == 0.0 { 0.0 } else { (-after_s / before_s).exp() }
}

/// `exp(-bus / car)`.  `0.0` when there is no car average.
pub fn travel_time_ratio(bus_s: f64, car_s: f64) -> f64 {
    if car_s == 0.0 { 0.0 } else { (-bus_s / car_s).exp() }
}
