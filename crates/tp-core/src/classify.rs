//! Classification rules shared by the extractors and KPI calculators.
//!
//! Vehicle and person classification in the event log is purely textual:
//! a vehicle is a bus when its *type* string contains a configured hint, and
//! a person is a transit driver when their id starts with a configured prefix.

/// Sentinel written wherever a lookup fails (unmapped vehicle type,
/// point outside the zone grid, missing routing mode).
pub const UNDEFINED: &str = "undefined";

/// Activity type MATSim inserts between transit legs.  Never a trip end.
pub const PT_INTERACTION: &str = "pt interaction";

/// Case-insensitive substring test classifying a vehicle type as "bus".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusHint {
    needle: String,
}

impl BusHint {
    pub fn new(hint: &str) -> Self {
        Self { needle: hint.to_lowercase() }
    }

    /// `true` if `vehicle_type` contains the hint, ignoring case.
    ///
    /// ASCII type names are compared in place; only non-ASCII names are
    /// lowercased into a temporary.
    #[inline]
    pub fn matches(&self, vehicle_type: &str) -> bool {
        let needle = self.needle.as_bytes();
        if needle.is_empty() {
            return true;
        }
        if !vehicle_type.is_ascii() {
            return vehicle_type.to_lowercase().contains(&self.needle);
        }
        vehicle_type
            .as_bytes()
            .windows(needle.len())
            .any(|w| w.eq_ignore_ascii_case(needle))
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }
}

impl Default for BusHint {
    fn default() -> Self {
        Self::new("bus")
    }
}

/// Prefix identifying transit-driver person ids (e.g. `pt_bus_1_0`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverPrefix(String);

impl DriverPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    #[inline]
    pub fn is_driver(&self, person_id: &str) -> bool {
        person_id.starts_with(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Render a float the way the interchange tables store numbers: the shortest
/// text that parses back to the same value, always with a fractional part
/// (`120.0`, `0.30000000000000004`).
#[inline]
pub fn fmt_f64(value: f64) -> String {
    format!("{value:?}")
}

/// Textual boolean used in the tables (`"true"` / `"false"`).
#[inline]
pub fn fmt_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
