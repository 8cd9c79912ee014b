//! Typed pipeline configuration.
//!
//! # File format
//!
//! The configuration is a single JSON document.  Every path is a template in
//! which `${scenario}` is replaced by the scenario name; nothing else is
//! interpolated.
//!
//! ```json
//! {
//!   "scenarios": ["baseline", "new_routes"],
//!   "paths": {
//!     "events":           "scenarios/${scenario}/output_events.xml.gz",
//!     "network":          "scenarios/${scenario}/network.xml",
//!     "transit_schedule": "scenarios/${scenario}/transitSchedule.xml",
//!     "transit_vehicles": "scenarios/${scenario}/transitVehicles.xml",
//!     "plans":            "scenarios/${scenario}/plans.xml",
//!     "output_dir":       "data/${scenario}",
//!     "all_kpi_report":   "data/all_kpi_result.txt"
//!   },
//!   "params": { "zone": { "rows": 20, "cols": 20 } }
//! }
//! ```
//!
//! Every field of `params` has a default; see [`Params`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{CoreError, CoreResult};

/// Placeholder substituted by [`PathTemplates::resolve`].
pub const SCENARIO_VAR: &str = "${scenario}";

// ── TableFormat ───────────────────────────────────────────────────────────────

/// On-disk format of the extracted event tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Arrow IPC stream (one message per batch).
    #[default]
    Arrow,
    /// Parquet, one row group per batch.
    Parquet,
    /// Plain CSV with a header row.
    Csv,
}

impl TableFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Arrow   => "arrow",
            TableFormat::Parquet => "parquet",
            TableFormat::Csv     => "csv",
        }
    }
}

impl std::str::FromStr for TableFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrow" | "ipc" => Ok(TableFormat::Arrow),
            "parquet"       => Ok(TableFormat::Parquet),
            "csv"           => Ok(TableFormat::Csv),
            other => Err(CoreError::Config(format!(
                "unknown table format {other:?}: expected \"arrow\", \"parquet\" or \"csv\""
            ))),
        }
    }
}

// ── PipelineConfig ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Scenario names, processed in order.
    pub scenarios: Vec<String>,
    pub paths:     PathTemplates,
    #[serde(default)]
    pub params:    Params,
}

impl PipelineConfig {
    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(text: &str) -> CoreResult<Self> {
        let config: PipelineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> CoreResult<()> {
        if self.scenarios.is_empty() {
            return Err(CoreError::Config("`scenarios` must list at least one scenario".into()));
        }
        if let Some(dup) = first_duplicate(&self.scenarios) {
            return Err(CoreError::Config(format!("scenario {dup:?} is listed twice")));
        }
        self.params.validate()
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    names
        .iter()
        .enumerate()
        .find(|(i, n)| names[..*i].contains(n))
        .map(|(_, n)| n.as_str())
}

// ── Paths ─────────────────────────────────────────────────────────────────────

/// Path templates; each may contain [`SCENARIO_VAR`].
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathTemplates {
    pub events:           String,
    pub network:          String,
    pub transit_schedule: String,
    pub transit_vehicles: String,
    pub plans:            String,
    /// Directory receiving the extracted tables and the per-scenario report.
    pub output_dir:       String,
    /// Cumulative report across all scenarios of one run.
    pub all_kpi_report:   String,
}

impl PathTemplates {
    /// Substitute `scenario` into every template.
    pub fn resolve(&self, scenario: &str) -> ScenarioPaths {
        let r = |t: &str| PathBuf::from(interpolate(t, scenario));
        ScenarioPaths {
            scenario:         scenario.to_owned(),
            events:           r(&self.events),
            network:          r(&self.network),
            transit_schedule: r(&self.transit_schedule),
            transit_vehicles: r(&self.transit_vehicles),
            plans:            r(&self.plans),
            output_dir:       r(&self.output_dir),
            all_kpi_report:   r(&self.all_kpi_report),
        }
    }
}

/// Replace every occurrence of `${scenario}` in `template`.
pub fn interpolate(template: &str, scenario: &str) -> String {
    template.replace(SCENARIO_VAR, scenario)
}

/// Concrete paths for one scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioPaths {
    pub scenario:         String,
    pub events:           PathBuf,
    pub network:          PathBuf,
    pub transit_schedule: PathBuf,
    pub transit_vehicles: PathBuf,
    pub plans:            PathBuf,
    pub output_dir:       PathBuf,
    pub all_kpi_report:   PathBuf,
}

impl ScenarioPaths {
    /// Location of the extracted table `name` in the given format.
    pub fn table(&self, name: &str, format: TableFormat) -> PathBuf {
        self.output_dir.join(format!("{name}.{}", format.extension()))
    }

    pub fn kpi_report(&self) -> PathBuf {
        self.output_dir.join("kpi_result.txt")
    }

    pub fn od_matrix(&self) -> PathBuf {
        self.output_dir.join("od_matrix.csv")
    }
}

// ── Params ────────────────────────────────────────────────────────────────────

/// Numeric and textual parameters.  Every section falls back to its default.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Substring (case-insensitive) identifying bus vehicle types and bus
    /// transport modes.
    pub bus_hint: String,
    /// Driver-id prefix skipped by the boarding extractor.
    pub boarding_driver_prefix: String,
    /// Driver-id prefix skipped by the travel-time and person-trip extractors.
    pub trip_driver_prefix: String,
    pub zone:         ZoneParams,
    pub coverage:     CoverageParams,
    pub otp:          OtpParams,
    pub productivity: ProductivityParams,
    pub travel_time:  TravelTimeParams,
    pub od:           OdParams,
    pub output:       OutputParams,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            bus_hint:               "bus".into(),
            boarding_driver_prefix: "pt".into(),
            trip_driver_prefix:     "pt_".into(),
            zone:                   ZoneParams::default(),
            coverage:               CoverageParams::default(),
            otp:                    OtpParams::default(),
            productivity:           ProductivityParams::default(),
            travel_time:            TravelTimeParams::default(),
            od:                     OdParams::default(),
            output:                 OutputParams::default(),
        }
    }
}

impl Params {
    pub fn validate(&self) -> CoreResult<()> {
        if self.bus_hint.trim().is_empty() {
            return Err(CoreError::Config("`bus_hint` must not be empty".into()));
        }
        if self.zone.rows == 0 || self.zone.cols == 0 {
            return Err(CoreError::Config(format!(
                "zone grid must have at least one row and column (got {}x{})",
                self.zone.rows, self.zone.cols
            )));
        }
        if !(self.coverage.radius_m >= 0.0) {
            return Err(CoreError::Config(format!(
                "coverage radius must be non-negative (got {})",
                self.coverage.radius_m
            )));
        }
        if !(self.otp.min_delay <= self.otp.max_delay) {
            return Err(CoreError::Config(format!(
                "otp band is empty: min_delay {} > max_delay {}",
                self.otp.min_delay, self.otp.max_delay
            )));
        }
        if self.output.batch_size == 0 {
            return Err(CoreError::Config("`output.batch_size` must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoneParams {
    pub rows: usize,
    pub cols: usize,
}

impl Default for ZoneParams {
    fn default() -> Self {
        Self { rows: 20, cols: 20 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverageParams {
    /// Activity type whose location is tested against the stop radius.
    pub activity: String,
    pub radius_m: f64,
}

impl Default for CoverageParams {
    fn default() -> Self {
        Self { activity: "home".into(), radius_m: 400.0 }
    }
}

/// Arrival-delay tolerance band in seconds (inclusive on both ends).
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OtpParams {
    pub min_delay: f64,
    pub max_delay: f64,
}

impl Default for OtpParams {
    fn default() -> Self {
        Self { min_delay: -180.0, max_delay: 180.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductivityParams {
    pub baseline: f64,
}

impl Default for ProductivityParams {
    fn default() -> Self {
        Self { baseline: 1.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TravelTimeParams {
    /// Average bus trip time (seconds) of the reference network.
    pub before_bus_avg_time: f64,
}

impl Default for TravelTimeParams {
    fn default() -> Self {
        Self { before_bus_avg_time: 54.121 * 60.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OdParams {
    /// How many OD pairs the OD matrix export keeps.
    pub top_n: usize,
}

impl Default for OdParams {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputParams {
    pub format:     TableFormat,
    /// Rows buffered per sink before a batch is written.
    pub batch_size: usize,
    /// Run all extractors over one shared traversal of the event log.
    pub fused:      bool,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self { format: TableFormat::Arrow, batch_size: 50_000, fused: true }
    }
}
