use tp_core::{DriverPrefix, PT_INTERACTION, PersonId, UNDEFINED, fmt_f64};
use tp_network::EntityMaps;

use crate::event::kinds::{ACT_START, DEPARTURE, PERSON_ENTERS_VEHICLE};
use crate::extractor::{PendingMap, join_list};
use crate::{Event, EventResult, Extractor, TravelTimeRow};

struct OpenTrip {
    vehicles:   Vec<String>,
    types:      Vec<String>,
    main_mode:  String,
    start_time: f64,
}

/// Measures departure→activity travel time of trips that boarded at least
/// one vehicle.  Transit drivers are excluded; walk-only trips are
/// discarded when they close.
pub struct TravelTimeExtractor<'a> {
    maps:      &'a EntityMaps,
    driver:    DriverPrefix,
    pending:   PendingMap<PersonId, OpenTrip>,
    walk_only: u64,
}

impl<'a> TravelTimeExtractor<'a> {
    pub fn new(maps: &'a EntityMaps, driver: DriverPrefix) -> Self {
        Self { maps, driver, pending: PendingMap::default(), walk_only: 0 }
    }

    fn on_departure(&mut self, event: &Event) -> EventResult<Option<TravelTimeRow>> {
        let Some(person) = event.get("person") else { return Ok(None) };
        if self.pending.contains_key(person) || self.driver.is_driver(person) {
            return Ok(None);
        }
        let start_time = event.time()?;
        let main_mode = event.get("computationalRoutingMode").unwrap_or(UNDEFINED);
        self.pending.insert(PersonId::new(person), OpenTrip {
            vehicles: Vec::new(),
            types: Vec::new(),
            main_mode: main_mode.to_owned(),
            start_time,
        });
        Ok(None)
    }

    fn on_enter(&mut self, event: &Event) -> Option<TravelTimeRow> {
        let (Some(person), Some(vehicle)) = (event.get("person"), event.get("vehicle")) else {
            return None;
        };
        if self.driver.is_driver(person) {
            return None;
        }
        if let Some(trip) = self.pending.get_mut(person) {
            trip.vehicles.push(vehicle.to_owned());
            trip.types.push(self.maps.vehicle_type(vehicle).unwrap_or(UNDEFINED).to_owned());
        }
        None
    }

    fn on_act_start(&mut self, event: &Event) -> EventResult<Option<TravelTimeRow>> {
        let Some(person) = event.get("person") else { return Ok(None) };
        if !self.pending.contains_key(person)
            || self.driver.is_driver(person)
            || event.get("actType") == Some(PT_INTERACTION)
        {
            return Ok(None);
        }
        let time = event.time()?;
        let Some(trip) = self.pending.remove(person) else { return Ok(None) };
        if trip.vehicles.is_empty() || trip.types.is_empty() {
            self.walk_only += 1;
            return Ok(None);
        }
        Ok(Some(TravelTimeRow {
            veh_ids:     join_list(&trip.vehicles),
            veh_types:   join_list(&trip.types),
            main_mode:   trip.main_mode,
            start_time:  fmt_f64(trip.start_time),
            travel_time: fmt_f64(time - trip.start_time),
        }))
    }
}

impl Extractor for TravelTimeExtractor<'_> {
    type Row = TravelTimeRow;

    fn on_event(&mut self, event: &Event) -> EventResult<Option<TravelTimeRow>> {
        match event.kind() {
            DEPARTURE => self.on_departure(event),
            PERSON_ENTERS_VEHICLE => Ok(self.on_enter(event)),
            ACT_START => self.on_act_start(event),
            _ => Ok(None),
        }
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn discarded(&self) -> u64 {
        self.walk_only
    }
}
