//! `transit-kpi` — per-scenario event extraction and KPI report.
//!
//! For every scenario of the configuration:
//!
//! 1. load network, bus schedule, vehicle types and plans;
//! 2. build the zone grid over network and plan extent;
//! 3. stream the event log once (or once per table with
//!    `--separate-passes`) into the five extracted tables;
//! 4. compute the KPIs from those tables, write `kpi_result.txt` and
//!    `od_matrix.csv` into the scenario's output directory, and append the
//!    report to the cumulative report of the run.
//!
//! Run with:
//!   cargo run -p tp-cli --release -- --config config.json
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tp_core::{BusHint, Params, PipelineConfig, ScenarioPaths, TableFormat};
use tp_events::extract_scenario;
use tp_kpi::{compute_kpis, reset_report};
use tp_network::{EntityMaps, GridZones};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "transit-kpi", version, about = "Transit KPIs from MATSim event logs.")]
struct Cli {
    /// JSON pipeline configuration.
    #[arg(short, long)]
    config: PathBuf,

    /// Run only this scenario (repeatable); overrides the configured list.
    #[arg(short, long = "scenario")]
    scenarios: Vec<String>,

    /// Read the event log once per extracted table instead of once overall.
    #[arg(long)]
    separate_passes: bool,

    /// Table format override: arrow, parquet or csv.
    #[arg(long)]
    format: Option<TableFormat>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

fn run_scenario(paths: &ScenarioPaths, params: &Params) -> Result<()> {
    let t0 = Instant::now();
    info!(scenario = %paths.scenario, "running scenario");

    std::fs::create_dir_all(&paths.output_dir)
        .with_context(|| format!("creating {}", paths.output_dir.display()))?;

    let maps = EntityMaps::load(paths, BusHint::new(&params.bus_hint))
        .with_context(|| format!("loading static inputs of scenario {:?}", paths.scenario))?;
    let zones = GridZones::new(maps.zone_bbox(), params.zone.rows, params.zone.cols)?;

    extract_scenario(&maps, &zones, params, paths)
        .with_context(|| format!("extracting tables from {}", paths.events.display()))?;

    let kpis = compute_kpis(&maps, params, paths).context("computing KPIs")?;
    kpis.report
        .write_to(&paths.kpi_report())
        .with_context(|| format!("writing {}", paths.kpi_report().display()))?;
    kpis.report
        .append_to(&paths.all_kpi_report)
        .with_context(|| format!("appending to {}", paths.all_kpi_report.display()))?;
    kpis.od
        .write_csv(&paths.od_matrix(), params.od.top_n)
        .with_context(|| format!("writing {}", paths.od_matrix().display()))?;

    info!(
        scenario = %paths.scenario,
        elapsed_s = t0.elapsed().as_secs_f64(),
        report = %paths.kpi_report().display(),
        "scenario done"
    );
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = PipelineConfig::from_path(&cli.config)
        .with_context(|| format!("reading configuration {}", cli.config.display()))?;
    if !cli.scenarios.is_empty() {
        config.scenarios = cli.scenarios;
    }
    if cli.separate_passes {
        config.params.output.fused = false;
    }
    if let Some(format) = cli.format {
        config.params.output.format = format;
    }
    config.validate()?;

    let mut reset = Vec::new();
    for scenario in &config.scenarios {
        let paths = config.paths.resolve(scenario);
        if !reset.contains(&paths.all_kpi_report) {
            if let Some(dir) = paths.all_kpi_report.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
            reset_report(&paths.all_kpi_report)?;
            reset.push(paths.all_kpi_report.clone());
        }
        run_scenario(&paths, &config.params)?;
    }
    info!(scenarios = config.scenarios.len(), "all scenarios done");
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse())
}
