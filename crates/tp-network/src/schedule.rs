//! Transit schedule: bus routes and the stops they serve.
//!
//! Only routes whose `<transportMode>` matches the bus hint are kept, and
//! only stop facilities referenced by at least one kept route end up in the
//! bus-stop set.  A route referencing an unknown stop keeps the reference in
//! its stop list, but the stop simply does not appear in the stop set.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use tp_core::{BusHint, LineId, LinkId, Point, RouteId, StopId};
use tracing::{debug, info};

use crate::NetworkResult;
use crate::xml::{attr, open_input, required, required_f64, xml_reader};

#[derive(Clone, Debug, PartialEq)]
pub struct StopFacility {
    pub id:    StopId,
    pub pos:   Point,
    pub link:  Option<LinkId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitRoute {
    pub id:    RouteId,
    pub line:  LineId,
    /// Physical path, in driving order.
    pub links: Vec<LinkId>,
    /// Served stops, in route-profile order.
    pub stops: Vec<StopId>,
}

/// Bus routes and bus stops of one scenario.
#[derive(Clone, Debug, Default)]
pub struct TransitSchedule {
    routes: HashMap<RouteId, TransitRoute>,
    stops:  HashMap<StopId, StopFacility>,
}

/// Route under construction while its element is open.
struct OpenRoute {
    id:    String,
    mode:  String,
    links: Vec<LinkId>,
    stops: Vec<StopId>,
}

impl TransitSchedule {
    /// Read a MATSim `transitSchedule.xml`, keeping bus routes only.
    pub fn load(path: &Path, hint: &BusHint) -> NetworkResult<Self> {
        let schedule = Self::from_reader(open_input(path)?, hint)?;
        info!(
            path = %path.display(),
            routes = schedule.route_count(),
            stops = schedule.stop_count(),
            "loaded bus routes"
        );
        Ok(schedule)
    }

    pub fn from_reader<R: BufRead>(source: R, hint: &BusHint) -> NetworkResult<Self> {
        let mut reader = xml_reader(source);
        let mut buf = Vec::new();

        let mut all_stops: HashMap<StopId, StopFacility> = HashMap::new();
        let mut routes: HashMap<RouteId, TransitRoute> = HashMap::new();
        let mut line: Option<String> = None;
        let mut route: Option<OpenRoute> = None;
        let mut in_mode = false;
        let mut skipped = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"transportMode" => in_mode = true,
                Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                    b"stopFacility" => {
                        let id = StopId::new(required(&e, "stopFacility", "id")?);
                        let x = required_f64(&e, "stopFacility", "x")?;
                        let y = required_f64(&e, "stopFacility", "y")?;
                        let link = attr(&e, "linkRefId")?.map(LinkId::new);
                        all_stops.insert(id.clone(), StopFacility { id, pos: Point::new(x, y), link });
                    }
                    b"transitLine" => line = Some(required(&e, "transitLine", "id")?),
                    b"transitRoute" => {
                        route = Some(OpenRoute {
                            id:    required(&e, "transitRoute", "id")?,
                            mode:  String::new(),
                            links: Vec::new(),
                            stops: Vec::new(),
                        });
                    }
                    b"stop" => {
                        if let (Some(r), Some(id)) = (route.as_mut(), attr(&e, "refId")?) {
                            r.stops.push(StopId::new(id));
                        }
                    }
                    b"link" => {
                        if let (Some(r), Some(id)) = (route.as_mut(), attr(&e, "refId")?) {
                            r.links.push(LinkId::new(id));
                        }
                    }
                    _ => {}
                },
                Event::Text(t) if in_mode => {
                    if let Some(r) = route.as_mut() {
                        r.mode.push_str(t.unescape()?.trim());
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"transportMode" => in_mode = false,
                    b"transitRoute" => {
                        if let Some(r) = route.take() {
                            if hint.matches(&r.mode) {
                                let id = RouteId::new(r.id);
                                routes.insert(id.clone(), TransitRoute {
                                    id,
                                    line:  LineId::new(line.clone().unwrap_or_default()),
                                    links: r.links,
                                    stops: r.stops,
                                });
                            } else {
                                skipped += 1;
                            }
                        }
                    }
                    b"transitLine" => line = None,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let mut stops = HashMap::new();
        for stop_id in routes.values().flat_map(|r| &r.stops) {
            if let Some(stop) = all_stops.get(stop_id) {
                stops.entry(stop_id.clone()).or_insert_with(|| stop.clone());
            }
        }
        debug!(skipped_routes = skipped, all_stops = all_stops.len(), "filtered non-bus routes");
        Ok(Self { routes, stops })
    }

    pub fn add_route(&mut self, route: TransitRoute) {
        self.routes.insert(route.id.clone(), route);
    }

    pub fn add_stop(&mut self, stop: StopFacility) {
        self.stops.insert(stop.id.clone(), stop);
    }

    pub fn route(&self, id: &str) -> Option<&TransitRoute> {
        self.routes.get(id)
    }

    pub fn stop(&self, id: &str) -> Option<&StopFacility> {
        self.stops.get(id)
    }

    pub fn routes(&self) -> impl Iterator<Item = &TransitRoute> {
        self.routes.values()
    }

    pub fn stops(&self) -> impl Iterator<Item = &StopFacility> {
        self.stops.values()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}
