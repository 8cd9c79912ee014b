//! `tp-kpi` — key performance indicators over the extracted tables.
//!
//! | Module          | KPI                                                        |
//! |-----------------|------------------------------------------------------------|
//! | [`route_info`]  | Mean stops and mean length of bus routes                    |
//! | [`travel_time`] | Bus / car mean trip time, before/after and bus/car ratios   |
//! | [`coverage`]    | Persons with a bus stop within a radius of an activity      |
//! | [`ridership`]   | Distinct bus riders                                         |
//! | [`otp`]         | On-time performance of bus arrivals                         |
//! | [`service`]     | Service hours and distance, productivity and efficiency     |
//! | [`transfer`]    | Bus-to-bus transfers per pt trip                            |
//! | [`od`]          | Zone-to-zone trip counts and the top-N CSV export           |
//! | [`report`]      | Plain-text [`KpiReport`]                                    |
//! | [`scenario`]    | [`compute_kpis`]: all of the above for one scenario         |
//!
//! Every calculator returns `0.0` rather than failing when a divisor is zero.

pub mod coverage;
pub mod error;
pub mod od;
pub mod otp;
pub mod report;
pub mod ridership;
pub mod route_info;
pub mod scenario;
pub mod service;
pub mod transfer;
pub mod travel_time;


pub use coverage::{Coverage, service_coverage};
pub use error::{KpiError, KpiResult};
pub use od::{OdMatrix, OdPair};
pub use otp::{OnTime, on_time_performance};
pub use report::{KpiReport, reset_report};
pub use ridership::{Ridership, ridership};
pub use route_info::{NetworkStats, bus_network_stats};
pub use scenario::{ScenarioKpis, compute_kpis};
pub use service::{ServiceMetrics, effective_distance_ratio, efficiency_index, productivity_index};
pub use transfer::TransferRate;
pub use travel_time::{
    ModeAverage, TravelTimeStats, average_bus_travel_time, average_car_travel_time,
    bus_travel_time_ratio, travel_time_ratio,
};

/// `part / whole` in percent, `0.0` when `whole` is zero.
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 * 100.0 }
}
