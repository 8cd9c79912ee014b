//! `tp-network` — static entity maps for the transit KPI toolkit.
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`network`]    | Nodes and link lengths from `network.xml`                  |
//! | [`schedule`]   | Bus routes and bus stops from `transitSchedule.xml`        |
//! | [`vehicles`]   | Vehicle id → type from the vehicle definitions             |
//! | [`population`] | Selected-plan activity coordinates per person              |
//! | [`zone`]       | [`ZoneGenerator`] trait and the uniform [`GridZones`]      |
//! | [`stops`]      | R-tree [`StopIndex`] for stop-radius queries               |
//! | [`maps`]       | [`EntityMaps`], all of the above for one scenario          |
//! | [`xml`]        | Streaming reader helpers (gzip aware), shared with events  |
//!
//! All readers stream their input with `quick_xml`; none builds a DOM.

pub mod error;
pub mod maps;
pub mod network;
pub mod population;
pub mod schedule;
pub mod stops;
pub mod vehicles;
pub mod xml;
pub mod zone;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use maps::EntityMaps;
pub use network::{Link, Network, NetworkBuilder};
pub use population::{Person, Population};
pub use schedule::{StopFacility, TransitRoute, TransitSchedule};
pub use stops::StopIndex;
pub use vehicles::VehicleTypes;
pub use zone::{GridZones, Zone, ZoneGenerator, ZoneId};
