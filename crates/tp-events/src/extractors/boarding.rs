use tp_core::DriverPrefix;
use tp_network::EntityMaps;

use crate::event::kinds::PERSON_ENTERS_VEHICLE;
use crate::{BoardingRow, Event, EventResult, Extractor};

/// Emits one row per non-driver boarding of a bus.  Keeps no state.
pub struct BoardingExtractor<'a> {
    maps:   &'a EntityMaps,
    driver: DriverPrefix,
}

impl<'a> BoardingExtractor<'a> {
    pub fn new(maps: &'a EntityMaps, driver: DriverPrefix) -> Self {
        Self { maps, driver }
    }
}

impl Extractor for BoardingExtractor<'_> {
    type Row = BoardingRow;

    fn on_event(&mut self, event: &Event) -> EventResult<Option<BoardingRow>> {
        if event.kind() != PERSON_ENTERS_VEHICLE {
            return Ok(None);
        }
        let (Some(person), Some(vehicle)) = (event.get("person"), event.get("vehicle")) else {
            return Ok(None);
        };
        if !self.maps.is_bus(vehicle) || self.driver.is_driver(person) {
            return Ok(None);
        }
        Ok(Some(BoardingRow { person_id: person.to_owned(), vehicle_id: vehicle.to_owned() }))
    }

    fn pending(&self) -> usize {
        0
    }
}
