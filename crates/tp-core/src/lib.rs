//! `tp-core` — foundational types for the transit KPI toolkit.
//!
//! This crate is a dependency of every other `tp-*` crate.  It has no `tp-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `LinkId`, `LineId`, `RouteId`, `StopId`, `VehicleId`, `PersonId` |
//! | [`geo`]         | `Point`, `BoundingBox`                                     |
//! | [`classify`]    | `BusHint`, `DriverPrefix`, sentinels, table number text    |
//! | [`config`]      | `PipelineConfig`, `Params`, `ScenarioPaths`, `TableFormat` |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |

pub mod classify;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use classify::{BusHint, DriverPrefix, PT_INTERACTION, UNDEFINED, fmt_bool, fmt_f64};
pub use config::{Params, PathTemplates, PipelineConfig, ScenarioPaths, TableFormat};
pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, Point};
pub use ids::{LineId, LinkId, NodeId, PersonId, RouteId, StopId, VehicleId};
