//! Vehicle id → vehicle type lookup from a MATSim vehicle definitions file.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use tp_core::{BusHint, VehicleId};
use tracing::info;

use crate::NetworkResult;
use crate::xml::{open_input, required, xml_reader};

#[derive(Clone, Debug, Default)]
pub struct VehicleTypes {
    by_vehicle: HashMap<VehicleId, String>,
}

impl VehicleTypes {
    /// Read `<vehicle id=".." type=".."/>` entries, namespaced or not.
    pub fn load(path: &Path) -> NetworkResult<Self> {
        let types = Self::from_reader(open_input(path)?)?;
        info!(path = %path.display(), vehicles = types.len(), "loaded vehicle types");
        Ok(types)
    }

    pub fn from_reader<R: BufRead>(source: R) -> NetworkResult<Self> {
        let mut reader = xml_reader(source);
        let mut buf = Vec::new();
        let mut by_vehicle = HashMap::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"vehicle" => {
                    let id = required(&e, "vehicle", "id")?;
                    let kind = required(&e, "vehicle", "type")?;
                    by_vehicle.insert(VehicleId::new(id), kind);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(Self { by_vehicle })
    }

    pub fn insert(&mut self, vehicle: impl Into<VehicleId>, kind: impl Into<String>) {
        self.by_vehicle.insert(vehicle.into(), kind.into());
    }

    /// Type of `vehicle`, if the vehicle is known.
    #[inline]
    pub fn type_of(&self, vehicle: &str) -> Option<&str> {
        self.by_vehicle.get(vehicle).map(String::as_str)
    }

    /// `true` if `vehicle` is known and its type matches `hint`.
    #[inline]
    pub fn is_bus(&self, vehicle: &str, hint: &BusHint) -> bool {
        self.type_of(vehicle).is_some_and(|t| hint.matches(t))
    }

    pub fn len(&self) -> usize {
        self.by_vehicle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_vehicle.is_empty()
    }
}

impl<V: Into<VehicleId>, T: Into<String>> FromIterator<(V, T)> for VehicleTypes {
    fn from_iter<I: IntoIterator<Item = (V, T)>>(iter: I) -> Self {
        let mut types = Self::default();
        for (v, t) in iter {
            types.insert(v, t);
        }
        types
    }
}
