//! All KPIs of one scenario, computed from its extracted tables.

use tp_core::{BusHint, Params, ScenarioPaths, TableFormat};
use tp_events::{BoardingRow, BusDelayRow, BusLinkTripRow, PersonTripRow, TravelTimeRow};
use tp_network::EntityMaps;
use tp_output::{TableRow, read_rows};
use tracing::{debug, info};

use crate::coverage::service_coverage;
use crate::od::OdMatrix;
use crate::otp::OnTime;
use crate::report::KpiReport;
use crate::ridership::Ridership;
use crate::route_info::bus_network_stats;
use crate::service::{
    ServiceMetrics, effective_distance_ratio, efficiency_index, productivity_index,
};
use crate::transfer::TransferRate;
use crate::travel_time::{TravelTimeStats, bus_travel_time_ratio, travel_time_ratio};
use crate::KpiResult;

/// Report figures plus the OD matrix of one scenario.
#[derive(Clone, Debug)]
pub struct ScenarioKpis {
    pub report: KpiReport,
    pub od:     OdMatrix,
}

/// Stream every row of table `R` through `f`.  Returns the row count.
fn scan<R: TableRow>(
    paths: &ScenarioPaths,
    format: TableFormat,
    mut f: impl FnMut(&R) -> KpiResult<()>,
) -> KpiResult<u64> {
    let path = paths.table(R::SCHEMA.name, format);
    let mut rows = 0u64;
    for row in read_rows::<R>(&path, format)? {
        f(&row?)?;
        rows += 1;
    }
    debug!(table = R::SCHEMA.name, rows, path = %path.display(), "scanned table");
    Ok(rows)
}

/// Read the five tables written by the extraction stage and compute every
/// KPI of the report.
pub fn compute_kpis(
    maps: &EntityMaps,
    params: &Params,
    paths: &ScenarioPaths,
) -> KpiResult<ScenarioKpis> {
    let format = params.output.format;
    let hint = BusHint::new(&params.bus_hint);

    let network = bus_network_stats(&maps.schedule, &maps.network);

    let mut travel = TravelTimeStats::new(hint.clone());
    scan::<TravelTimeRow>(paths, format, |r| travel.add(r))?;
    let bus_time_ratio =
        bus_travel_time_ratio(params.travel_time.before_bus_avg_time, travel.bus.mean());
    let bus_car_ratio = travel_time_ratio(travel.bus.mean(), travel.car.mean());

    let coverage = service_coverage(
        &maps.population,
        &maps.stop_index(),
        &params.coverage.activity,
        params.coverage.radius_m,
    );

    let mut riders = Ridership::default();
    scan::<BoardingRow>(paths, format, |r| {
        riders.add(r);
        Ok(())
    })?;
    let ridership = riders.count();

    let mut otp = OnTime::new(params.otp.min_delay, params.otp.max_delay);
    scan::<BusDelayRow>(paths, format, |r| otp.add(r))?;

    let mut service = ServiceMetrics::default();
    scan::<BusLinkTripRow>(paths, format, |r| service.add(r))?;

    let mut transfers = TransferRate::new(hint);
    let mut od = OdMatrix::default();
    scan::<PersonTripRow>(paths, format, |r| {
        transfers.add(r);
        od.add(r);
        Ok(())
    })?;

    let report = KpiReport {
        scenario: paths.scenario.clone(),
        network,
        bus_travel: travel.bus,
        car_travel: travel.car,
        bus_time_ratio,
        bus_car_ratio,
        ridership,
        coverage,
        coverage_radius: params.coverage.radius_m,
        on_time: otp.on_time,
        arrivals: otp.total,
        otp_percent: otp.percent(),
        service,
        productivity: productivity_index(
            service.service_hours,
            ridership,
            params.productivity.baseline,
        ),
        efficiency: efficiency_index(service.total_km, ridership),
        effective_ratio: effective_distance_ratio(service.effective_km, service.total_km),
        transfers: transfers.transfers,
        pt_trips: transfers.pt_trips,
        transfer_rate: transfers.rate(),
    };
    info!(
        scenario = %report.scenario,
        ridership,
        otp_percent = report.otp_percent,
        od_pairs = od.len(),
        "KPIs computed"
    );
    Ok(ScenarioKpis { report, od })
}
