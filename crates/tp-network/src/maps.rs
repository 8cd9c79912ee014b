//! `EntityMaps`: every static lookup a scenario needs, loaded once.

use tp_core::{BoundingBox, BusHint, ScenarioPaths};
use tracing::info;

use crate::{Network, NetworkResult, Population, StopIndex, TransitSchedule, VehicleTypes};

/// Read-only after construction; extractors and KPI calculators borrow it.
#[derive(Clone, Debug, Default)]
pub struct EntityMaps {
    pub network:    Network,
    pub schedule:   TransitSchedule,
    pub vehicles:   VehicleTypes,
    pub population: Population,
    pub bus_hint:   BusHint,
}

impl EntityMaps {
    /// Load network, bus schedule, vehicle types and plans of one scenario.
    pub fn load(paths: &ScenarioPaths, bus_hint: BusHint) -> NetworkResult<Self> {
        let maps = Self {
            network:    Network::load(&paths.network)?,
            schedule:   TransitSchedule::load(&paths.transit_schedule, &bus_hint)?,
            vehicles:   VehicleTypes::load(&paths.transit_vehicles)?,
            population: Population::load(&paths.plans)?,
            bus_hint,
        };
        info!(scenario = %paths.scenario, "entity maps ready");
        Ok(maps)
    }

    /// Extent of the zone grid: network nodes plus plan activities.
    pub fn zone_bbox(&self) -> BoundingBox {
        self.network.bbox().union(self.population.bbox())
    }

    #[inline]
    pub fn vehicle_type(&self, vehicle: &str) -> Option<&str> {
        self.vehicles.type_of(vehicle)
    }

    #[inline]
    pub fn is_bus(&self, vehicle: &str) -> bool {
        self.vehicles.is_bus(vehicle, &self.bus_hint)
    }

    #[inline]
    pub fn link_length(&self, link: &str) -> Option<f64> {
        self.network.link_length(link)
    }

    /// Spatial index over the bus stops of the schedule.
    pub fn stop_index(&self) -> StopIndex {
        StopIndex::new(self.schedule.stops().map(|s| (&s.id, s.pos)))
    }
}
