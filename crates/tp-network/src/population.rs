//! Population plans: per-person activity locations.
//!
//! For each person only the selected plan is read.  Every activity records
//! its coordinate under its type; a person whose same activity type appears
//! at two different coordinates is flagged invalid (the later coordinate
//! wins).  The flag never clears once set.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use tp_core::{BoundingBox, PersonId, Point};
use tracing::{info, warn};

use crate::NetworkResult;
use crate::xml::{attr, open_input, parse_f64, required, xml_reader};

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: PersonId,
    activities: HashMap<String, Point>,
    valid: bool,
}

impl Person {
    pub fn new(id: impl Into<PersonId>) -> Self {
        Self { id: id.into(), activities: HashMap::new(), valid: true }
    }

    /// Record that activity `act` takes place at `pos`.
    pub fn add_activity_coord(&mut self, act: &str, pos: Point) {
        match self.activities.get_mut(act) {
            None => {
                self.activities.insert(act.to_owned(), pos);
            }
            Some(seen) if *seen != pos => {
                self.valid = false;
                *seen = pos;
            }
            Some(_) => {}
        }
    }

    pub fn activity(&self, act: &str) -> Option<Point> {
        self.activities.get(act).copied()
    }

    pub fn activities(&self) -> impl Iterator<Item = (&str, Point)> {
        self.activities.iter().map(|(k, p)| (k.as_str(), *p))
    }

    /// `false` once an activity type was seen at two different places.
    pub fn is_coord_valid(&self) -> bool {
        self.valid
    }
}

#[derive(Clone, Debug, Default)]
pub struct Population {
    persons: HashMap<PersonId, Person>,
}

impl Population {
    /// Read the selected plan of every `<person>` in a MATSim `plans.xml`.
    pub fn load(path: &Path) -> NetworkResult<Self> {
        let population = Self::from_reader(open_input(path)?)?;
        let invalid = population.invalid_count();
        info!(path = %path.display(), persons = population.len(), "loaded population");
        if invalid > 0 {
            warn!(persons = invalid, "persons with inconsistent activity coordinates");
        }
        Ok(population)
    }

    pub fn from_reader<R: BufRead>(source: R) -> NetworkResult<Self> {
        let mut reader = xml_reader(source);
        let mut buf = Vec::new();
        let mut persons = HashMap::new();
        let mut person: Option<Person> = None;
        // Only the first selected plan of a person counts.
        let mut in_selected = false;
        let mut selected_seen = false;
        let mut no_coord = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                    b"person" => {
                        person = Some(Person::new(required(&e, "person", "id")?));
                        selected_seen = false;
                    }
                    b"plan" => {
                        let selected = attr(&e, "selected")?.is_some_and(|s| s == "yes");
                        in_selected = selected && !selected_seen;
                        selected_seen |= selected;
                    }
                    b"act" | b"activity" if in_selected => {
                        if let Some(p) = person.as_mut() {
                            let kind = required(&e, "act", "type")?;
                            match (attr(&e, "x")?, attr(&e, "y")?) {
                                (Some(x), Some(y)) => {
                                    let x = parse_f64(&x, "act", "x")?;
                                    let y = parse_f64(&y, "act", "y")?;
                                    p.add_activity_coord(&kind, Point::new(x, y));
                                }
                                _ => no_coord += 1,
                            }
                        }
                    }
                    _ => {}
                },
                Event::End(e) => match e.local_name().as_ref() {
                    b"plan" => in_selected = false,
                    b"person" => {
                        if let Some(p) = person.take() {
                            persons.insert(p.id.clone(), p);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        if no_coord > 0 {
            warn!(activities = no_coord, "skipped plan activities without coordinates");
        }
        Ok(Self { persons })
    }

    pub fn insert(&mut self, person: Person) {
        self.persons.insert(person.id.clone(), person);
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.persons.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn invalid_count(&self) -> usize {
        self.persons.values().filter(|p| !p.is_coord_valid()).count()
    }

    /// Extent of every recorded activity coordinate.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_points(self.persons.values().flat_map(|p| p.activities.values().copied()))
    }
}
