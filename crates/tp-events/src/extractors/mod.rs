//! The five extractors.
//!
//! | Extractor               | Opens on                    | Closes on                  | Table                      |
//! |-------------------------|-----------------------------|----------------------------|----------------------------|
//! | [`BusDelayExtractor`]   | `VehicleArrivesAtFacility`  | `VehicleDepartsAtFacility` | `bus_delay_at_facilities`  |
//! | [`BoardingExtractor`]   | (stateless)                 | `PersonEntersVehicle`      | `person_enter_bus`         |
//! | [`TravelTimeExtractor`] | `departure`                 | `actstart`                 | `travel_time_all_vehicle`  |
//! | [`PersonTripExtractor`] | `actend`                    | `actstart`                 | `people_trip`              |
//! | [`BusLinkTripExtractor`]| `vehicle enters traffic`    | `left link` / `vehicle leaves traffic` | `bus_trip`     |

mod boarding;
mod bus_delay;
mod bus_link_trip;
mod person_trip;
mod travel_time;

pub use boarding::BoardingExtractor;
pub use bus_delay::BusDelayExtractor;
pub use bus_link_trip::BusLinkTripExtractor;
pub use person_trip::PersonTripExtractor;
pub use travel_time::TravelTimeExtractor;
