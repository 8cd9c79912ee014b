//! Static statistics of the bus network.

use tp_network::{Network, TransitSchedule};

/// Per-route means over all bus routes of the schedule.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NetworkStats {
    pub routes:               usize,
    pub mean_stops_per_route: f64,
    /// Mean physical route length in kilometres.
    pub mean_route_km:        f64,
}

/// Mean stop count and mean length of the bus routes.  Links missing from
/// the network count as zero metres; no routes give zeros.
pub fn bus_network_stats(schedule: &TransitSchedule, network: &Network) -> NetworkStats {
    let mut stops = 0usize;
    let mut metres = 0.0;
    for route in schedule.routes() {
        stops += route.stops.len();
        metres += route
            .links
            .iter()
            .map(|l| network.link_length(l.as_str()).unwrap_or(0.0))
            .sum::<f64>();
    }
    let routes = schedule.route_count();
    if routes == 0 {
        return NetworkStats::default();
    }
    NetworkStats {
        routes,
        mean_stops_per_route: stops as f64 / routes as f64,
        mean_route_km:        metres / routes as f64 / 1000.0,
    }
}
