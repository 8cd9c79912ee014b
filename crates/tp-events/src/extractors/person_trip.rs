use tp_core::{DriverPrefix, PT_INTERACTION, PersonId, Point, UNDEFINED, fmt_f64};
use tp_network::{EntityMaps, ZoneGenerator, ZoneId};

use crate::event::kinds::{ACT_END, ACT_START, DEPARTURE, PERSON_ENTERS_VEHICLE};
use crate::extractor::{PendingMap, join_list};
use crate::{Event, EventResult, Extractor, PersonTripRow};

struct OpenTrip {
    act_start: String,
    origin:    Point,
    zone:      ZoneId,
    vehicles:  Vec<String>,
    types:     Vec<String>,
    /// Set by the first `departure` after the trip opened.
    main_mode:  Option<String>,
    start_time: Option<f64>,
}

/// Builds activity-to-activity trips with origin/destination zones.
///
/// A trip opens on `actend`, takes mode and start time from the first
/// following `departure`, collects boarded vehicles, and closes on the next
/// non-interaction `actstart`.  A trip that closes without ever seeing a
/// departure has no start time and is discarded.
pub struct PersonTripExtractor<'a> {
    maps:      &'a EntityMaps,
    zones:     &'a dyn ZoneGenerator,
    driver:    DriverPrefix,
    pending:   PendingMap<PersonId, OpenTrip>,
    discarded: u64,
}

impl<'a> PersonTripExtractor<'a> {
    pub fn new(maps: &'a EntityMaps, zones: &'a dyn ZoneGenerator, driver: DriverPrefix) -> Self {
        Self { maps, zones, driver, pending: PendingMap::default(), discarded: 0 }
    }

    fn skip(&self, person: &str, event: &Event) -> bool {
        self.driver.is_driver(person) || event.get("actType") == Some(PT_INTERACTION)
    }

    fn on_act_end(&mut self, event: &Event) -> EventResult<Option<PersonTripRow>> {
        let Some(person) = event.get("person") else { return Ok(None) };
        if self.pending.contains_key(person) || self.skip(person, event) {
            return Ok(None);
        }
        let origin = Point::new(event.require_f64("x")?, event.require_f64("y")?);
        self.pending.insert(PersonId::new(person), OpenTrip {
            act_start:  event.get("actType").unwrap_or_default().to_owned(),
            origin,
            zone:       self.zones.find_zone_id(origin),
            vehicles:   Vec::new(),
            types:      Vec::new(),
            main_mode:  None,
            start_time: None,
        });
        Ok(None)
    }

    fn on_departure(&mut self, event: &Event) -> EventResult<Option<PersonTripRow>> {
        let Some(person) = event.get("person") else { return Ok(None) };
        if let Some(trip) = self.pending.get_mut(person) {
            if trip.start_time.is_none() {
                trip.start_time = Some(event.time()?);
                trip.main_mode = Some(
                    event.get("computationalRoutingMode").unwrap_or(UNDEFINED).to_owned(),
                );
            }
        }
        Ok(None)
    }

    fn on_enter(&mut self, event: &Event) -> Option<PersonTripRow> {
        let (Some(person), Some(vehicle)) = (event.get("person"), event.get("vehicle")) else {
            return None;
        };
        if let Some(trip) = self.pending.get_mut(person) {
            trip.vehicles.push(vehicle.to_owned());
            trip.types.push(self.maps.vehicle_type(vehicle).unwrap_or(UNDEFINED).to_owned());
        }
        None
    }

    fn on_act_start(&mut self, event: &Event) -> EventResult<Option<PersonTripRow>> {
        let Some(person) = event.get("person") else { return Ok(None) };
        if !self.pending.contains_key(person) || self.skip(person, event) {
            return Ok(None);
        }
        let time = event.time()?;
        let dest = Point::new(event.require_f64("x")?, event.require_f64("y")?);
        let Some(trip) = self.pending.remove(person) else { return Ok(None) };
        let (Some(start_time), Some(main_mode)) = (trip.start_time, trip.main_mode) else {
            self.discarded += 1;
            return Ok(None);
        };

        Ok(Some(PersonTripRow {
            veh_ids:     join_list(&trip.vehicles),
            veh_types:   join_list(&trip.types),
            main_mode,
            travel_time: fmt_f64(time - start_time),
            start_time:  fmt_f64(start_time),
            act_start:   trip.act_start,
            act_end:     event.get("actType").unwrap_or_default().to_owned(),
            origin_zone: trip.zone.to_string(),
            dest_zone:   self.zones.find_zone_id(dest).to_string(),
            x_origin:    fmt_f64(trip.origin.x),
            y_origin:    fmt_f64(trip.origin.y),
            x_dest:      fmt_f64(dest.x),
            y_dest:      fmt_f64(dest.y),
        }))
    }
}

impl Extractor for PersonTripExtractor<'_> {
    type Row = PersonTripRow;

    fn on_event(&mut self, event: &Event) -> EventResult<Option<PersonTripRow>> {
        match event.kind() {
            ACT_END => self.on_act_end(event),
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
        self.discarded
    }
}
