//! Informe de flota por periodo
//!
//! Incluye las rutas finalizadas cuyo cierre cae dentro del rango (ambos
//! extremos incluidos) y los abastecimientos con fecha dentro del rango.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::models::report::{FleetReport, ReportQuery, ReportRefuelRow, ReportRouteRow, ReportSummary};
use crate::models::refuel::RefuelFilters;
use crate::models::route::{RouteFilters, RouteStatus};
use crate::repositories::Repositories;
use crate::services::dashboard_service::consumption;
use crate::services::pdf_renderer;
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub const REPORT_TITLE: &str = "Informe de Flota";

/// Primer y último día del mes de `date`
pub fn month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(date);
    (start, end)
}

pub struct ReportService {
    repositories: Repositories,
}

impl ReportService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    pub async fn build_report(&self, query: &ReportQuery) -> AppResult<FleetReport> {
        let (default_start, default_end) = month_range(Utc::now().date_naive());
        let start = query.start.unwrap_or(default_start);
        let end = query.end.unwrap_or(default_end);
        if start > end {
            return Err(validation_error(
                "start",
                "range",
                "La fecha inicial debe ser anterior o igual a la final",
            ));
        }

        let route_filters = RouteFilters {
            status: Some(RouteStatus::Finished),
            vehicle_id: query.vehicle_id,
        };
        let refuel_filters = RefuelFilters {
            vehicle_id: query.vehicle_id,
            ..RefuelFilters::default()
        };
        let (vehicles, drivers, routes, refuels) = futures::try_join!(
            self.repositories.vehicles.list(),
            self.repositories.drivers.list(),
            self.repositories.routes.list(&route_filters),
            self.repositories.refuels.list(&refuel_filters),
        )?;

        let labels: HashMap<Uuid, String> = vehicles.iter().map(|v| (v.id, v.label())).collect();
        let drivers: HashMap<Uuid, String> = drivers.into_iter().map(|d| (d.id, d.name)).collect();

        let vehicle = match query.vehicle_id {
            Some(id) => Some(
                labels
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| not_found_error("Vehicle", id))?,
            ),
            None => None,
        };

        let in_range = |date: NaiveDate| date >= start && date <= end;

        let mut route_rows: Vec<ReportRouteRow> = routes
            .iter()
            .filter_map(|route| {
                let date = route.ended_at?.date_naive();
                if !in_range(date) {
                    return None;
                }
                Some(ReportRouteRow {
                    date,
                    vehicle: labels.get(&route.vehicle_id).cloned().unwrap_or_default(),
                    driver: drivers.get(&route.driver_id).cloned().unwrap_or_default(),
                    route_name: route.route_name.clone(),
                    distance: route.distance.unwrap_or_default(),
                })
            })
            .collect();
        route_rows.sort_by(|a, b| a.date.cmp(&b.date));

        let mut refuel_rows: Vec<ReportRefuelRow> = refuels
            .iter()
            .filter(|refuel| in_range(refuel.date))
            .map(|refuel| ReportRefuelRow {
                date: refuel.date,
                vehicle: labels.get(&refuel.vehicle_id).cloned().unwrap_or_default(),
                station: refuel.station.clone(),
                store: refuel.store.clone(),
                liters: refuel.liters,
                total_price: refuel.total_price,
            })
            .collect();
        refuel_rows.sort_by(|a, b| a.date.cmp(&b.date));

        let total_distance: Decimal = route_rows.iter().map(|r| r.distance).sum();
        let total_liters: Decimal = refuel_rows.iter().map(|r| r.liters).sum();
        let summary = ReportSummary {
            total_routes: route_rows.len(),
            total_distance,
            total_liters,
            total_cost: refuel_rows.iter().map(|r| r.total_price).sum(),
            average_consumption: consumption(total_distance, total_liters),
        };

        info!(
            "📄 Informe {}..{}: {} rutas, {} abastecimientos",
            start,
            end,
            route_rows.len(),
            refuel_rows.len()
        );

        Ok(FleetReport {
            title: REPORT_TITLE.to_string(),
            start,
            end,
            vehicle,
            summary,
            routes: route_rows,
            refuels: refuel_rows,
        })
    }

    /// Informe renderizado a PDF junto con su nombre de fichero
    pub async fn export_pdf(&self, query: &ReportQuery) -> AppResult<(String, Vec<u8>)> {
        let report = self.build_report(query).await?;
        let bytes = pdf_renderer::render_pdf(&report)?;
        Ok((report.file_name(), bytes))
    }
}
