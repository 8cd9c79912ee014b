//! The plain-text KPI report.
//!
//! One report per scenario is written (overwriting) into the scenario's
//! output directory; the same text is appended to a cumulative file shared
//! by all scenarios of a run.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::KpiResult;
use crate::coverage::Coverage;
use crate::route_info::NetworkStats;
use crate::service::ServiceMetrics;
use crate::travel_time::ModeAverage;

/// Every figure of one scenario's report.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KpiReport {
    pub scenario:         String,
    pub network:          NetworkStats,
    pub bus_travel:       ModeAverage,
    pub car_travel:       ModeAverage,
    pub bus_time_ratio:   f64,
    pub bus_car_ratio:    f64,
    pub ridership:        u64,
    pub coverage:         Coverage,
    pub coverage_radius:  f64,
    pub on_time:          u64,
    pub arrivals:         u64,
    pub otp_percent:      f64,
    pub service:          ServiceMetrics,
    pub productivity:     f64,
    pub efficiency:       f64,
    pub effective_ratio:  f64,
    pub transfers:        u64,
    pub pt_trips:         u64,
    pub transfer_rate:    f64,
}

impl KpiReport {
    /// Ridership as a share of the population, in percent.
    pub fn ridership_percent(&self) -> f64 {
        crate::percent(self.ridership, self.coverage.population as u64)
    }

    /// Replace the file at `path` with this report.
    pub fn write_to(&self, path: &Path) -> KpiResult<()> {
        let mut f = File::create(path)?;
        write!(f, "{self}")?;
        Ok(())
    }

    /// Append this report to `path`, creating it if needed.
    pub fn append_to(&self, path: &Path) -> KpiResult<()> {
        let mut f = OpenOptions::new().create(true).append(true).open(path)?;
        write!(f, "{self}")?;
        Ok(())
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- SIMULATION KPI REPORT (scenario: {}) ---", self.scenario)?;

        writeln!(f, "1. BUS NETWORK:")?;
        writeln!(f, "   - Mean stops per route: {:.2} stops", self.network.mean_stops_per_route)?;
        writeln!(f, "   - Mean route length: {:.2} km", self.network.mean_route_km)?;
        writeln!(f)?;

        writeln!(f, "2. TRAVEL TIME:")?;
        writeln!(f, "   - Bus before/after ratio: {:.4}", self.bus_time_ratio)?;
        writeln!(f, "   - Bus/car ratio: {:.4}", self.bus_car_ratio)?;
        writeln!(
            f,
            "   - Bus (mean): {:.2} s (over {} trips)",
            self.bus_travel.mean(),
            self.bus_travel.trips()
        )?;
        writeln!(
            f,
            "   - Car (mean): {:.2} s (over {} trips)",
            self.car_travel.mean(),
            self.car_travel.trips()
        )?;
        writeln!(f)?;

        writeln!(f, "3. COVERAGE & DEMAND:")?;
        writeln!(
            f,
            "   - Ridership: {} persons ({:.2}% of population)",
            self.ridership,
            self.ridership_percent()
        )?;
        writeln!(f, "   - Service coverage: {:.2}%", self.coverage.percent())?;
        writeln!(
            f,
            "   - Within {}m of a stop: {} / {} persons",
            self.coverage_radius, self.coverage.covered, self.coverage.population
        )?;
        writeln!(f)?;

        writeln!(f, "4. ON-TIME PERFORMANCE:")?;
        writeln!(f, "   - OTP: {:.2}%", self.otp_percent)?;
        writeln!(f, "   - On-time arrivals: {} / {}", self.on_time, self.arrivals)?;
        writeln!(f)?;

        writeln!(f, "5. BUS PRODUCTIVITY:")?;
        writeln!(
            f,
            "   - Service hours: {:.2} h (revenue {:.2} h)",
            self.service.service_hours, self.service.revenue_hours
        )?;
        writeln!(
            f,
            "   - Distance: {:.2} km (effective {:.2} km)",
            self.service.total_km, self.service.effective_km
        )?;
        writeln!(f, "   - Productivity index: {:.6}", self.productivity)?;
        writeln!(f, "   - Efficiency index:   {:.6}", self.efficiency)?;
        writeln!(f, "   - Effective distance ratio: {:.4}", self.effective_ratio)?;
        writeln!(f)?;

        writeln!(f, "6. TRANSFERS:")?;
        writeln!(
            f,
            "   - Bus-to-bus transfers per pt trip: {:.4} ({} transfers / {} trips)",
            self.transfer_rate, self.transfers, self.pt_trips
        )?;
        writeln!(f)
    }
}

/// Empty the cumulative report at the start of a run.
pub fn reset_report(path: &Path) -> KpiResult<()> {
    File::create(path)?;
    Ok(())
}
