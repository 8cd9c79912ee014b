use tp_core::VehicleId;
use tp_network::EntityMaps;

use crate::event::kinds::{VEHICLE_ARRIVES_AT_FACILITY, VEHICLE_DEPARTS_AT_FACILITY};
use crate::extractor::{PendingMap, raw_time};
use crate::{BusDelayRow, Event, EventResult, Extractor};

/// Pairs each bus arrival at a facility with the following departure.
///
/// Only events carrying a `delay` take part: an arrival without one opens
/// nothing, and a departure without one leaves the open arrival in place.
/// Delays and times are copied verbatim from the log.
pub struct BusDelayExtractor<'a> {
    maps:    &'a EntityMaps,
    pending: PendingMap<VehicleId, BusDelayRow>,
}

impl<'a> BusDelayExtractor<'a> {
    pub fn new(maps: &'a EntityMaps) -> Self {
        Self { maps, pending: PendingMap::default() }
    }

    fn on_arrival(&mut self, event: &Event) -> EventResult<Option<BusDelayRow>> {
        let Some(vehicle) = event.get("vehicle") else { return Ok(None) };
        let Some(vehicle_type) = self.maps.vehicle_type(vehicle) else { return Ok(None) };
        if !self.maps.bus_hint.matches(vehicle_type) {
            return Ok(None);
        }
        let Some(delay) = event.get("delay") else { return Ok(None) };
        let arr_time = raw_time(event)?;

        self.pending.insert(VehicleId::new(vehicle), BusDelayRow {
            vehicle_id:   vehicle.to_owned(),
            vehicle_type: vehicle_type.to_owned(),
            facility:     event.get("facility").unwrap_or_default().to_owned(),
            arr_delay:    delay.to_owned(),
            dep_delay:    "0.0".to_owned(),
            arr_time,
            dep_time:     "0.0".to_owned(),
        });
        Ok(None)
    }

    fn on_departure(&mut self, event: &Event) -> EventResult<Option<BusDelayRow>> {
        let Some(vehicle) = event.get("vehicle") else { return Ok(None) };
        if !self.pending.contains_key(vehicle) {
            return Ok(None);
        }
        let Some(delay) = event.get("delay") else { return Ok(None) };
        let dep_time = raw_time(event)?;

        Ok(self.pending.remove(vehicle).map(|mut row| {
            row.dep_delay = delay.to_owned();
            row.dep_time = dep_time;
            row
        }))
    }
}

impl Extractor for BusDelayExtractor<'_> {
    type Row = BusDelayRow;

    fn on_event(&mut self, event: &Event) -> EventResult<Option<BusDelayRow>> {
        match event.kind() {
            VEHICLE_ARRIVES_AT_FACILITY => self.on_arrival(event),
            VEHICLE_DEPARTS_AT_FACILITY => self.on_departure(event),
            _ => Ok(None),
        }
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }
}
