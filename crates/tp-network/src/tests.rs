//! Unit tests for tp-network.

#[cfg(test)]
mod network_tests {
    use std::io::Cursor;

    use tp_core::Point;

    use crate::{Network, NetworkError};

    const NETWORK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<network name="tiny">
  <nodes>
    <node id="1" x="0.0" y="0.0"/>
    <node id="2" x="100.0" y="0.0"/>
    <node id="3" x="100.0" y="50.0"/>
  </nodes>
  <links capperiod="01:00:00">
    <link id="1_2" from="1" to="2" length="100.0" freespeed="13.9" capacity="600" permlanes="1"/>
    <link id="2_3" from="2" to="3" length="50.5" freespeed="13.9" capacity="600" permlanes="1"/>
  </links>
</network>"#;

    #[test]
    fn nodes_and_links() {
        let net = Network::from_reader(Cursor::new(NETWORK)).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.link_count(), 2);
        assert_eq!(net.node("3"), Some(Point::new(100.0, 50.0)));
        assert_eq!(net.link_length("2_3"), Some(50.5));
        assert_eq!(net.link("1_2").unwrap().to.as_str(), "2");
        assert_eq!(net.link_length("9_9"), None);
    }

    #[test]
    fn bbox_spans_nodes() {
        let net = Network::from_reader(Cursor::new(NETWORK)).unwrap();
        let b = net.bbox();
        assert_eq!(b.min, Point::new(0.0, 0.0));
        assert_eq!(b.max, Point::new(100.0, 50.0));
    }

    #[test]
    fn missing_length_is_fatal() {
        let xml = r#"<network><links><link id="a" from="1" to="2"/></links></network>"#;
        let err = Network::from_reader(Cursor::new(xml)).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::MissingAttribute { element: "link", attribute: "length" }
        ));
    }

    #[test]
    fn bad_coordinate_is_fatal() {
        let xml = r#"<network><nodes><node id="1" x="east" y="0"/></nodes></network>"#;
        assert!(matches!(
            Network::from_reader(Cursor::new(xml)),
            Err(NetworkError::BadNumber { attribute: "x", .. })
        ));
    }

    #[test]
    fn gzip_input() {
        use std::io::Write;

        use flate2::Compression;
        use flate2::write::GzEncoder;

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("network.xml.gz");
        let mut enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        enc.write_all(NETWORK.as_bytes()).unwrap();
        enc.finish().unwrap();

        let net = Network::load(&path).unwrap();
        assert_eq!(net.link_count(), 2);
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule_tests {
    use std::io::Cursor;

    use tp_core::{BusHint, Point};

    use crate::TransitSchedule;

    const SCHEDULE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<transitSchedule>
  <transitStops>
    <stopFacility id="s1" x="0.0" y="0.0" linkRefId="1_2"/>
    <stopFacility id="s2" x="100.0" y="0.0" linkRefId="2_3"/>
    <stopFacility id="t1" x="500.0" y="500.0" linkRefId="9_9"/>
  </transitStops>
  <transitLine id="L1">
    <transitRoute id="L1_r1">
      <transportMode>bus</transportMode>
      <routeProfile>
        <stop refId="s1" departureOffset="00:00:00"/>
        <stop refId="s2" arrivalOffset="00:02:00"/>
        <stop refId="ghost" arrivalOffset="00:04:00"/>
      </routeProfile>
      <route>
        <link refId="1_2"/>
        <link refId="2_3"/>
      </route>
      <departures>
        <departure id="d1" departureTime="06:00:00" vehicleRefId="bus_1"/>
      </departures>
    </transitRoute>
  </transitLine>
  <transitLine id="T1">
    <transitRoute id="T1_r1">
      <transportMode>tram</transportMode>
      <routeProfile><stop refId="t1"/></routeProfile>
      <route><link refId="9_9"/></route>
    </transitRoute>
  </transitLine>
</transitSchedule>"#;

    #[test]
    fn keeps_bus_routes_only() {
        let s = TransitSchedule::from_reader(Cursor::new(SCHEDULE), &BusHint::default()).unwrap();
        assert_eq!(s.route_count(), 1);
        let r = s.route("L1_r1").unwrap();
        assert_eq!(r.line.as_str(), "L1");
        assert_eq!(r.links.len(), 2);
        assert_eq!(r.stops.len(), 3, "unknown stop refs stay on the route");
        assert!(s.route("T1_r1").is_none());
    }

    #[test]
    fn bus_stops_are_referenced_and_known() {
        let s = TransitSchedule::from_reader(Cursor::new(SCHEDULE), &BusHint::default()).unwrap();
        assert_eq!(s.stop_count(), 2);
        assert_eq!(s.stop("s2").unwrap().pos, Point::new(100.0, 0.0));
        assert_eq!(s.stop("s1").unwrap().link.as_ref().unwrap().as_str(), "1_2");
        assert!(s.stop("t1").is_none(), "tram-only stop excluded");
        assert!(s.stop("ghost").is_none());
    }

    #[test]
    fn hint_is_case_insensitive() {
        let xml = SCHEDULE.replace("<transportMode>bus", "<transportMode>CityBus");
        let s = TransitSchedule::from_reader(Cursor::new(xml), &BusHint::new("BUS")).unwrap();
        assert_eq!(s.route_count(), 1);
    }
}

// ── Vehicles ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicle_tests {
    use std::io::Cursor;

    use tp_core::BusHint;

    use crate::VehicleTypes;

    const VEHICLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<vehicleDefinitions xmlns="http://www.matsim.org/files/dtd">
  <vehicleType id="Bus_Standard"><capacity seats="40" standingRoomInPersons="30"/></vehicleType>
  <vehicleType id="Tram"/>
  <vehicle id="bus_1" type="Bus_Standard"/>
  <vehicle id="tram_1" type="Tram"/>
</vehicleDefinitions>"#;

    #[test]
    fn namespaced_vehicles() {
        let v = VehicleTypes::from_reader(Cursor::new(VEHICLES)).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.type_of("bus_1"), Some("Bus_Standard"));
        let hint = BusHint::default();
        assert!(v.is_bus("bus_1", &hint));
        assert!(!v.is_bus("tram_1", &hint));
        assert!(!v.is_bus("car_7", &hint), "unknown vehicle is not a bus");
    }

    #[test]
    fn from_iter() {
        let v: VehicleTypes = [("a", "bus"), ("b", "car")].into_iter().collect();
        assert_eq!(v.type_of("b"), Some("car"));
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population_tests {
    use std::io::Cursor;

    use tp_core::Point;

    use crate::{Person, Population};

    const PLANS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<population>
  <person id="p1">
    <plan score="1.0" selected="no">
      <act type="home" x="999.0" y="999.0" end_time="07:00:00"/>
    </plan>
    <plan score="2.0" selected="yes">
      <act type="home" x="10.0" y="20.0" end_time="07:00:00"/>
      <leg mode="pt"/>
      <act type="work" x="300.0" y="40.0" end_time="17:00:00"/>
      <leg mode="pt"/>
      <act type="home" x="10.0" y="20.0"/>
    </plan>
  </person>
  <person id="p2">
    <plan selected="yes">
      <act type="home" x="0.0" y="0.0"/>
      <act type="home" x="5.0" y="5.0"/>
      <act type="shop" link="l1"/>
    </plan>
  </person>
</population>"#;

    #[test]
    fn selected_plan_only() {
        let pop = Population::from_reader(Cursor::new(PLANS)).unwrap();
        assert_eq!(pop.len(), 2);
        let p1 = pop.get("p1").unwrap();
        assert_eq!(p1.activity("home"), Some(Point::new(10.0, 20.0)));
        assert_eq!(p1.activity("work"), Some(Point::new(300.0, 40.0)));
        assert!(p1.is_coord_valid(), "same place twice is consistent");
    }

    #[test]
    fn inconsistent_coordinates_flagged() {
        let pop = Population::from_reader(Cursor::new(PLANS)).unwrap();
        let p2 = pop.get("p2").unwrap();
        assert!(!p2.is_coord_valid());
        assert_eq!(p2.activity("home"), Some(Point::new(5.0, 5.0)), "later coordinate wins");
        assert_eq!(p2.activity("shop"), None, "activity without coordinates skipped");
        assert_eq!(pop.invalid_count(), 1);
    }

    #[test]
    fn invalid_flag_is_sticky() {
        let mut p = Person::new("x");
        p.add_activity_coord("home", Point::new(0.0, 0.0));
        p.add_activity_coord("home", Point::new(1.0, 0.0));
        p.add_activity_coord("home", Point::new(1.0, 0.0));
        assert!(!p.is_coord_valid());
    }

    #[test]
    fn bbox_over_activities() {
        let pop = Population::from_reader(Cursor::new(PLANS)).unwrap();
        let b = pop.bbox();
        assert_eq!(b.min, Point::new(5.0, 5.0));
        assert_eq!(b.max, Point::new(300.0, 40.0));
    }
}

// ── Zones ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod zone_tests {
    use tp_core::{BoundingBox, Point};

    use crate::{GridZones, NetworkError, ZoneGenerator, ZoneId};

    fn grid() -> GridZones {
        GridZones::new(BoundingBox::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0)), 5, 10).unwrap()
    }

    #[test]
    fn interior_point() {
        assert_eq!(grid().find_zone_id(Point::new(15.0, 25.0)), ZoneId::Cell { row: 2, col: 1 });
        assert_eq!(grid().find_zone_id(Point::new(15.0, 25.0)).to_string(), "z_2_1");
    }

    #[test]
    fn max_edge_maps_to_last_cell() {
        assert_eq!(grid().find_zone_id(Point::new(100.0, 50.0)), ZoneId::Cell { row: 4, col: 9 });
        assert_eq!(grid().find_zone_id(Point::new(0.0, 0.0)), ZoneId::Cell { row: 0, col: 0 });
    }

    #[test]
    fn outside_is_undefined() {
        let g = grid();
        assert_eq!(g.find_zone_id(Point::new(-0.1, 10.0)), ZoneId::Undefined);
        assert_eq!(g.find_zone_id(Point::new(10.0, 50.1)), ZoneId::Undefined);
        assert_eq!(ZoneId::Undefined.to_string(), "undefined");
    }

    #[test]
    fn degenerate_box_is_undefined() {
        let line = BoundingBox::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let g = GridZones::new(line, 2, 2).unwrap();
        assert_eq!(g.find_zone_id(Point::new(50.0, 0.0)), ZoneId::Undefined);
    }

    #[test]
    fn every_inside_point_has_valid_indices() {
        let g = grid();
        for i in 0..=40 {
            for j in 0..=20 {
                let p = Point::new(i as f64 * 2.5, j as f64 * 2.5);
                match g.find_zone_id(p) {
                    ZoneId::Cell { row, col } => assert!(row < 5 && col < 10, "{p}"),
                    ZoneId::Undefined => panic!("{p} should be inside"),
                }
            }
        }
    }

    #[test]
    fn generate_covers_grid() {
        let zones = grid().generate();
        assert_eq!(zones.len(), 50);
        let z = zones.iter().find(|z| z.id == ZoneId::Cell { row: 1, col: 2 }).unwrap();
        assert_eq!(z.boundary[0], Point::new(20.0, 10.0));
        assert_eq!(z.boundary[2], Point::new(30.0, 20.0));
        assert!(z.contains(Point::new(25.0, 15.0)));
        assert!(z.contains(Point::new(30.0, 20.0)), "border counts");
    }

    #[test]
    fn generated_zone_agrees_with_lookup() {
        let g = grid();
        let p = Point::new(42.0, 33.0);
        let id = g.find_zone_id(p);
        let zone = g.generate().into_iter().find(|z| z.id == id).unwrap();
        assert!(zone.contains(p));
    }

    #[test]
    fn zero_rows_rejected() {
        let b = BoundingBox::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!(matches!(GridZones::new(b, 0, 3), Err(NetworkError::InvalidGrid(_))));
    }
}

// ── Stop index ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop_index_tests {
    use tp_core::{Point, StopId};

    use crate::StopIndex;

    fn index() -> StopIndex {
        let ids = [StopId::new("a"), StopId::new("b")];
        StopIndex::new([(&ids[0], Point::new(0.0, 0.0)), (&ids[1], Point::new(1000.0, 0.0))])
    }

    #[test]
    fn radius_is_inclusive() {
        let idx = index();
        assert!(idx.any_within(Point::new(400.0, 0.0), 400.0));
        assert!(!idx.any_within(Point::new(500.0, 0.0), 400.0));
        assert!(idx.any_within(Point::new(700.0, 0.0), 400.0));
    }

    #[test]
    fn nearest_stop() {
        let idx = index();
        let (id, d) = idx.nearest(Point::new(900.0, 0.0)).unwrap();
        assert_eq!(id.as_str(), "b");
        assert!((d - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_index() {
        let idx = StopIndex::new(std::iter::empty());
        assert!(idx.is_empty());
        assert!(!idx.any_within(Point::new(0.0, 0.0), 1e9));
    }
}

// ── EntityMaps ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod maps_tests {
    use tp_core::{BusHint, Point};

    use crate::{EntityMaps, NetworkBuilder, Person, Population, VehicleTypes};

    #[test]
    fn zone_bbox_is_union_of_network_and_plans() {
        let mut nb = NetworkBuilder::new();
        nb.add_node("1", Point::new(0.0, 0.0)).add_node("2", Point::new(10.0, 10.0));
        let mut person = Person::new("p");
        person.add_activity_coord("home", Point::new(-5.0, 20.0));
        let mut population = Population::default();
        population.insert(person);

        let maps = EntityMaps {
            network: nb.build(),
            population,
            vehicles: VehicleTypes::from_iter([("bus_1", "Bus")]),
            bus_hint: BusHint::default(),
            ..EntityMaps::default()
        };
        let b = maps.zone_bbox();
        assert_eq!(b.min, Point::new(-5.0, 0.0));
        assert_eq!(b.max, Point::new(10.0, 20.0));
        assert!(maps.is_bus("bus_1"));
        assert_eq!(maps.vehicle_type("nope"), None);
    }
}
