//! Unit tests for tp-core primitives.

#[cfg(test)]
mod ids {
    use std::collections::HashMap;

    use crate::{LinkId, VehicleId};

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(VehicleId::new("bus_1"), "Bus");
        assert_eq!(map.get("bus_1"), Some(&"Bus"));
        assert_eq!(map.get("bus_2"), None);
    }

    #[test]
    fn display_is_raw_id() {
        assert_eq!(LinkId::from("12_3").to_string(), "12_3");
    }
}

#[cfg(test)]
mod geo {
    use crate::{BoundingBox, Point};

    #[test]
    fn distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn empty_bbox() {
        let b = BoundingBox::empty();
        assert!(b.is_empty());
        assert!(!b.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn bbox_from_points() {
        let b = BoundingBox::from_points([
            Point::new(1.0, 5.0),
            Point::new(-2.0, 3.0),
            Point::new(4.0, -1.0),
        ]);
        assert_eq!(b.min, Point::new(-2.0, -1.0));
        assert_eq!(b.max, Point::new(4.0, 5.0));
        assert!(b.contains(Point::new(4.0, 5.0)), "border is inside");
    }

    #[test]
    fn union_with_empty_is_identity() {
        let b = BoundingBox::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert_eq!(b.union(BoundingBox::empty()), b);
        assert_eq!(BoundingBox::empty().union(b), b);
    }

    #[test]
    fn union_covers_both() {
        let a = BoundingBox::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = BoundingBox::new(Point::new(-1.0, 0.5), Point::new(0.5, 3.0));
        let u = a.union(b);
        assert_eq!(u.min, Point::new(-1.0, 0.0));
        assert_eq!(u.max, Point::new(1.0, 3.0));
    }
}

#[cfg(test)]
mod classify {
    use crate::{BusHint, DriverPrefix, fmt_bool, fmt_f64};

    #[test]
    fn bus_hint_is_case_insensitive() {
        let hint = BusHint::new("Bus");
        assert!(hint.matches("CityBus_12m"));
        assert!(hint.matches("bus"));
        assert!(!hint.matches("tram"));
        assert!(hint.matches("MINIBUS"));
        assert!(!hint.matches("bu"), "type shorter than the hint");
    }

    #[test]
    fn bus_hint_edge_cases() {
        assert!(BusHint::new("").matches("tram"), "empty hint matches everything");
        let hint = BusHint::new("Öbus");
        assert!(hint.matches("GROSSÖBUS"));
        assert!(!hint.matches("GROSSOBUS"));
    }

    #[test]
    fn driver_prefix() {
        let p = DriverPrefix::new("pt_");
        assert!(p.is_driver("pt_bus1_0"));
        assert!(!p.is_driver("ptolemy"));
        assert!(!p.is_driver("42"));
    }

    #[test]
    fn float_text_keeps_fraction() {
        assert_eq!(fmt_f64(120.0), "120.0");
        assert_eq!(fmt_f64(-3.5), "-3.5");
        assert_eq!(fmt_f64(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(fmt_bool(true), "true");
    }
}

#[cfg(test)]
mod config {
    use std::path::PathBuf;

    use crate::{CoreError, PipelineConfig, TableFormat};

    const MINIMAL: &str = r#"{
        "scenarios": ["base", "alt"],
        "paths": {
            "events":           "in/${scenario}/events.xml",
            "network":          "in/network.xml",
            "transit_schedule": "in/${scenario}/schedule.xml",
            "transit_vehicles": "in/${scenario}/vehicles.xml",
            "plans":            "in/plans.xml",
            "output_dir":       "out/${scenario}",
            "all_kpi_report":   "out/all.txt"
        }
    }"#;

    #[test]
    fn defaults_applied() {
        let cfg = PipelineConfig::from_json_str(MINIMAL).unwrap();
        assert_eq!(cfg.params.bus_hint, "bus");
        assert_eq!(cfg.params.zone.rows, 20);
        assert_eq!(cfg.params.output.batch_size, 50_000);
        assert_eq!(cfg.params.output.format, TableFormat::Arrow);
        assert!(cfg.params.output.fused);
        assert_eq!(cfg.params.otp.min_delay, -180.0);
    }

    #[test]
    fn scenario_interpolation() {
        let cfg = PipelineConfig::from_json_str(MINIMAL).unwrap();
        let paths = cfg.paths.resolve("alt");
        assert_eq!(paths.events, PathBuf::from("in/alt/events.xml"));
        assert_eq!(paths.network, PathBuf::from("in/network.xml"));
        assert_eq!(paths.output_dir, PathBuf::from("out/alt"));
        assert_eq!(
            paths.table("bus_trip", TableFormat::Parquet),
            PathBuf::from("out/alt/bus_trip.parquet")
        );
    }

    #[test]
    fn partial_params_override() {
        let text = MINIMAL.replacen(
            "\"paths\"",
            r#""params": { "zone": { "rows": 5 }, "output": { "format": "csv" } }, "paths""#,
            1,
        );
        let cfg = PipelineConfig::from_json_str(&text).unwrap();
        assert_eq!(cfg.params.zone.rows, 5);
        assert_eq!(cfg.params.zone.cols, 20);
        assert_eq!(cfg.params.output.format, TableFormat::Csv);
    }

    #[test]
    fn zero_rows_rejected() {
        let text = MINIMAL.replacen(
            "\"paths\"",
            r#""params": { "zone": { "rows": 0 } }, "paths""#,
            1,
        );
        let err = PipelineConfig::from_json_str(&text).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)), "got {err:?}");
    }

    #[test]
    fn inverted_otp_band_rejected() {
        let text = MINIMAL.replacen(
            "\"paths\"",
            r#""params": { "otp": { "min_delay": 60, "max_delay": -60 } }, "paths""#,
            1,
        );
        assert!(PipelineConfig::from_json_str(&text).is_err());
    }

    #[test]
    fn empty_scenario_list_rejected() {
        let text = MINIMAL.replacen(r#"["base", "alt"]"#, "[]", 1);
        assert!(matches!(
            PipelineConfig::from_json_str(&text),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn unknown_field_rejected() {
        let text = MINIMAL.replacen("\"paths\"", r#""bogus": 1, "paths""#, 1);
        assert!(matches!(PipelineConfig::from_json_str(&text), Err(CoreError::Json(_))));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, MINIMAL).unwrap();
        let cfg = PipelineConfig::from_path(&path).unwrap();
        assert_eq!(cfg.scenarios, ["base", "alt"]);
    }

    #[test]
    fn table_format_parse() {
        assert_eq!("Parquet".parse::<TableFormat>().unwrap(), TableFormat::Parquet);
        assert_eq!("ipc".parse::<TableFormat>().unwrap(), TableFormat::Arrow);
        assert!("xlsx".parse::<TableFormat>().is_err());
    }
}
