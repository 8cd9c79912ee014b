use tp_core::{PersonId, VehicleId, fmt_bool, fmt_f64};
use tp_network::EntityMaps;
use tracing::warn;

use crate::event::kinds::{
    ENTERED_LINK, LEFT_LINK, PERSON_ENTERS_VEHICLE, PERSON_LEAVES_VEHICLE, TRANSIT_DRIVER_STARTS,
    VEHICLE_ENTERS_TRAFFIC, VEHICLE_LEAVES_TRAFFIC,
};
use crate::extractor::PendingMap;
use crate::{BusLinkTripRow, Event, EventResult, Extractor};

/// Per-bus state between `vehicle enters traffic` and `vehicle leaves traffic`.
#[derive(Debug)]
struct BusState {
    link:       String,
    /// Occupancy snapshot taken when the current link was entered.
    passengers: u32,
    /// Running occupancy, updated on every boarding and alighting.
    onboard:    u32,
    enter_time: f64,
}

/// Emits one row per link traversed by a bus, flagging whether it carried
/// passengers.
///
/// Occupancy is counted continuously but only sampled on `entered link`,
/// so a boarding in the middle of a link shows up on the next one.  The
/// registered transit driver never counts as a passenger, and alighting
/// from an empty bus leaves the count at zero.
pub struct BusLinkTripExtractor<'a> {
    maps:    &'a EntityMaps,
    drivers: PendingMap<VehicleId, PersonId>,
    trips:   PendingMap<VehicleId, BusState>,
}

impl<'a> BusLinkTripExtractor<'a> {
    pub fn new(maps: &'a EntityMaps) -> Self {
        Self { maps, drivers: PendingMap::default(), trips: PendingMap::default() }
    }

    fn on_driver_starts(&mut self, event: &Event) {
        let (Some(vehicle), Some(driver)) = (event.get("vehicleId"), event.get("driverId")) else {
            return;
        };
        if self.maps.is_bus(vehicle) {
            self.drivers.insert(VehicleId::new(vehicle), PersonId::new(driver));
        }
    }

    fn on_enters_traffic(&mut self, event: &Event) -> EventResult<()> {
        let Some(vehicle) = event.get("vehicle") else { return Ok(()) };
        if !self.maps.is_bus(vehicle) {
            return Ok(());
        }
        let enter_time = event.time()?;
        self.trips.insert(VehicleId::new(vehicle), BusState {
            link: event.get("link").unwrap_or_default().to_owned(),
            passengers: 0,
            onboard: 0,
            enter_time,
        });
        Ok(())
    }

    fn on_entered_link(&mut self, event: &Event) -> EventResult<()> {
        let Some(vehicle) = event.get("vehicle") else { return Ok(()) };
        if !self.trips.contains_key(vehicle) {
            return Ok(());
        }
        let time = event.time()?;
        if let Some(state) = self.trips.get_mut(vehicle) {
            state.link = event.get("link").unwrap_or_default().to_owned();
            state.passengers = state.onboard;
            state.enter_time = time;
        }
        Ok(())
    }

    /// Boarding or alighting of anyone but the registered driver.
    fn on_person(&mut self, event: &Event, boarding: bool) {
        let (Some(person), Some(vehicle)) = (event.get("person"), event.get("vehicle")) else {
            return;
        };
        if self.drivers.get(vehicle).is_some_and(|d| d.as_str() == person) {
            return;
        }
        if let Some(state) = self.trips.get_mut(vehicle) {
            state.onboard = if boarding {
                state.onboard + 1
            } else {
                state.onboard.saturating_sub(1)
            };
        }
    }

    fn row(&self, vehicle: &str, state: &BusState, time: f64) -> BusLinkTripRow {
        BusLinkTripRow {
            bus_id:         vehicle.to_owned(),
            link_id:        state.link.clone(),
            link_len:       fmt_f64(self.maps.link_length(&state.link).unwrap_or(0.0)),
            have_passenger: fmt_bool(state.passengers > 0).to_owned(),
            travel_time:    fmt_f64(time - state.enter_time),
        }
    }

    fn on_left_link(&mut self, event: &Event) -> EventResult<Option<BusLinkTripRow>> {
        let Some(vehicle) = event.get("vehicle") else { return Ok(None) };
        let Some(state) = self.trips.get(vehicle) else { return Ok(None) };
        Ok(Some(self.row(vehicle, state, event.time()?)))
    }

    fn on_leaves_traffic(&mut self, event: &Event) -> EventResult<Option<BusLinkTripRow>> {
        let Some(vehicle) = event.get("vehicle") else { return Ok(None) };
        if !self.trips.contains_key(vehicle) {
            return Ok(None);
        }
        let time = event.time()?;
        let Some(state) = self.trips.remove(vehicle) else { return Ok(None) };
        if state.onboard != 0 {
            warn!(vehicle, onboard = state.onboard, "bus left traffic with passengers aboard");
        }
        self.drivers.remove(vehicle);
        Ok(Some(self.row(vehicle, &state, time)))
    }
}

impl Extractor for BusLinkTripExtractor<'_> {
    type Row = BusLinkTripRow;

    fn on_event(&mut self, event: &Event) -> EventResult<Option<BusLinkTripRow>> {
        match event.kind() {
            TRANSIT_DRIVER_STARTS => self.on_driver_starts(event),
            VEHICLE_ENTERS_TRAFFIC => self.on_enters_traffic(event)?,
            ENTERED_LINK => self.on_entered_link(event)?,
            PERSON_ENTERS_VEHICLE => self.on_person(event, true),
            PERSON_LEAVES_VEHICLE => self.on_person(event, false),
            LEFT_LINK => return self.on_left_link(event),
            VEHICLE_LEAVES_TRAFFIC => return self.on_leaves_traffic(event),
            _ => {}
        }
        Ok(None)
    }

    fn pending(&self) -> usize {
        self.trips.len()
    }
}
