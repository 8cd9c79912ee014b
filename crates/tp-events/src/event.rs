//! One record of the event log.

use crate::{EventError, EventResult};

/// Event `type` values the extractors react to.  Anything else is ignored.
pub mod kinds {
    pub const VEHICLE_ARRIVES_AT_FACILITY: &str = "VehicleArrivesAtFacility";
    pub const VEHICLE_DEPARTS_AT_FACILITY: &str = "VehicleDepartsAtFacility";
    pub const PERSON_ENTERS_VEHICLE:       &str = "PersonEntersVehicle";
    pub const PERSON_LEAVES_VEHICLE:       &str = "PersonLeavesVehicle";
    pub const DEPARTURE:                   &str = "departure";
    pub const ACT_START:                   &str = "actstart";
    pub const ACT_END:                     &str = "actend";
    pub const TRANSIT_DRIVER_STARTS:       &str = "TransitDriverStarts";
    pub const VEHICLE_ENTERS_TRAFFIC:      &str = "vehicle enters traffic";
    pub const ENTERED_LINK:                &str = "entered link";
    pub const LEFT_LINK:                   &str = "left link";
    pub const VEHICLE_LEAVES_TRAFFIC:      &str = "vehicle leaves traffic";
}

/// An event's `type` plus its remaining attributes as raw strings.
///
/// Events carry a handful of attributes, so they are kept in insertion
/// order in a small vector and looked up linearly.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Event {
    kind:  String,
    attrs: Vec<(String, String)>,
}

impl Event {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), attrs: Vec::new() }
    }

    /// Build an event from parsed attributes; `type` becomes the kind.
    pub(crate) fn from_attributes(attrs: Vec<(String, String)>) -> EventResult<Self> {
        let mut kind = None;
        let mut rest = Vec::with_capacity(attrs.len());
        for (k, v) in attrs {
            if k == "type" {
                kind = Some(v);
            } else {
                rest.push((k, v));
            }
        }
        let kind = kind.ok_or_else(|| EventError::MissingAttribute {
            kind:      "event".into(),
            attribute: "type",
        })?;
        Ok(Self { kind, attrs: rest })
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Attribute that must be present for the event to be usable.
    pub fn require(&self, name: &'static str) -> EventResult<&str> {
        self.get(name).ok_or_else(|| EventError::MissingAttribute {
            kind:      self.kind.clone(),
            attribute: name,
        })
    }

    /// Required numeric attribute.
    pub fn require_f64(&self, name: &'static str) -> EventResult<f64> {
        let text = self.require(name)?;
        text.trim().parse().map_err(|_| EventError::BadNumber {
            kind:      self.kind.clone(),
            attribute: name,
            value:     text.to_owned(),
        })
    }

    /// Simulation time in seconds.
    #[inline]
    pub fn time(&self) -> EventResult<f64> {
        self.require_f64("time")
    }
}
