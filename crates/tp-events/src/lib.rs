//! `tp-events` — streaming extraction of derived tables from a MATSim event
//! log.
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`event`]       | [`Event`]: kind plus raw string attributes                   |
//! | [`reader`]      | [`EventReader`]: bounded-memory iterator over `<event>`s     |
//! | [`extractor`]   | The [`Extractor`] state-machine trait                        |
//! | [`extractors`]  | Bus delay, boarding, travel time, person trip, bus link trip |
//! | [`rows`]        | Output row types, one per table                              |
//! | [`engine`]      | [`ExtractionEngine`]: fused or per-extractor passes          |
//!
//! # Feature flags
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the pending-entry maps    |

pub mod engine;
pub mod error;
pub mod event;
pub mod extractor;
pub mod extractors;
pub mod reader;
pub mod rows;


pub use engine::{EventConsumer, ExtractionEngine, ExtractionPass, PassSummary, extract_scenario};
pub use error::{EventError, EventResult};
pub use event::{Event, kinds};
pub use extractor::Extractor;
pub use extractors::{
    BoardingExtractor, BusDelayExtractor, BusLinkTripExtractor, PersonTripExtractor,
    TravelTimeExtractor,
};
pub use reader::EventReader;
pub use rows::{BoardingRow, BusDelayRow, BusLinkTripRow, PersonTripRow, TravelTimeRow};
