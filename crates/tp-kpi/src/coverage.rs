//! Service coverage: people living (or working, ...) near a bus stop.

use tp_network::{Population, StopIndex};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Persons whose activity lies within the radius of some stop.
    pub covered:    usize,
    /// All persons of the population, with or without that activity.
    pub population: usize,
}

impl Coverage {
    pub fn percent(&self) -> f64 {
        crate::percent(self.covered as u64, self.population as u64)
    }
}

/// Count persons whose `activity` location has a bus stop within
/// `radius_m` (boundary included).  Persons without that activity are
/// never covered but still count towards the population.
pub fn service_coverage(
    population: &Population,
    stops: &StopIndex,
    activity: &str,
    radius_m: f64,
) -> Coverage {
    let covered = population
        .iter()
        .filter_map(|p| p.activity(activity))
        .filter(|&pos| stops.any_within(pos, radius_m))
        .count();
    Coverage { covered, population: population.len() }
}
