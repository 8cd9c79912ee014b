//! Strongly typed identifier wrappers around the string ids used by
//! MATSim-style inputs.
//!
//! Every id is `Clone + Ord + Hash` and implements `Borrow<str>`, so a
//! `HashMap<VehicleId, _>` can be queried directly with the raw `&str` taken
//! from an event attribute without allocating a new id.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed ID wrapper around an owned `String`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        $vis struct $name(pub String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }
    };
}

typed_id! {
    /// Network node id.
    pub struct NodeId;
}

typed_id! {
    /// Directed network link id.
    pub struct LinkId;
}

typed_id! {
    /// Transit line id (owner of one or more routes).
    pub struct LineId;
}

typed_id! {
    /// Transit route id.
    pub struct RouteId;
}

typed_id! {
    /// Stop facility id.
    pub struct StopId;
}

typed_id! {
    /// Vehicle id as it appears in the vehicle definitions and the event log.
    pub struct VehicleId;
}

typed_id! {
    /// Person (agent) id.  Transit drivers are persons too.
    pub struct PersonId;
}
