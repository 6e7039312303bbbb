//! Agregación del dashboard
//!
//! Las funciones de cálculo son puras y trabajan sobre slices; el servicio
//! solo carga las colecciones (en paralelo) y las combina.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::models::analytics::{
    DashboardQuery, DashboardSummary, FleetTotals, MetricComparison, MonthComparison,
    MonthlyBucket, TopVehicle,
};
use crate::models::refuel::{Refuel, RefuelFilters};
use crate::models::route::{Route, RouteFilters, RouteStatus};
use crate::models::vehicle::Vehicle;
use crate::repositories::Repositories;
use crate::utils::errors::{validation_error, AppResult};

/// Número de vehículos en el ranking
pub const TOP_VEHICLES: usize = 3;

/// km/L; `None` cuando no hay litros
pub fn consumption(km: Decimal, liters: Decimal) -> Option<f64> {
    if liters.is_zero() {
        return None;
    }
    km.checked_div(liters)?.to_f64()
}

/// Variación porcentual; `None` si el valor anterior es cero o falta
pub fn variation(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(current), Some(previous)) if previous != 0.0 => {
            Some((current - previous) / previous * 100.0)
        }
        _ => None,
    }
}

fn compare(current: Option<f64>, previous: Option<f64>) -> MetricComparison {
    MetricComparison {
        current,
        previous,
        variation_pct: variation(current, previous),
    }
}

/// Mes anterior; enero retrocede a diciembre del año anterior
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year.saturating_sub(1), 12)
    } else {
        (year, month - 1)
    }
}

fn finished(routes: &[Route]) -> impl Iterator<Item = &Route> {
    routes.iter().filter(|r| r.status == RouteStatus::Finished)
}

pub fn compute_totals(vehicles: &[Vehicle], routes: &[Route], refuels: &[Refuel]) -> FleetTotals {
    let total_km: Decimal = finished(routes).filter_map(|r| r.distance).sum();
    let total_liters: Decimal = refuels.iter().map(|r| r.liters).sum();
    let total_cost: Decimal = refuels.iter().map(|r| r.total_price).sum();

    FleetTotals {
        total_vehicles: vehicles.len(),
        total_routes: routes.len(),
        total_refuels: refuels.len(),
        total_km,
        total_liters,
        total_cost,
        average_consumption: consumption(total_km, total_liters),
    }
}

/// Acumulado de un mes: rutas por fecha de cierre, abastecimientos por fecha
pub fn month_bucket(routes: &[Route], refuels: &[Refuel], year: i32, month: u32) -> MonthlyBucket {
    let mut bucket = MonthlyBucket::empty(month);

    bucket.km = finished(routes)
        .filter(|r| {
            r.ended_at
                .map_or(false, |at| at.year() == year && at.month() == month)
        })
        .filter_map(|r| r.distance)
        .sum();

    for refuel in refuels
        .iter()
        .filter(|r| r.date.year() == year && r.date.month() == month)
    {
        bucket.liters += refuel.liters;
        bucket.cost += refuel.total_price;
    }

    bucket.consumption = consumption(bucket.km, bucket.liters);
    bucket
}

/// Doce acumulados (enero a diciembre) del año indicado
pub fn monthly_buckets(routes: &[Route], refuels: &[Refuel], year: i32) -> Vec<MonthlyBucket> {
    (1..=12)
        .map(|month| month_bucket(routes, refuels, year, month))
        .collect()
}

pub fn compare_months(routes: &[Route], refuels: &[Refuel], year: i32, month: u32) -> MonthComparison {
    let (previous_year, previous_month) = previous_month(year, month);
    let current = month_bucket(routes, refuels, year, month);
    let previous = month_bucket(routes, refuels, previous_year, previous_month);

    MonthComparison {
        year,
        month,
        previous_year,
        previous_month,
        km: compare(current.km.to_f64(), previous.km.to_f64()),
        cost: compare(current.cost.to_f64(), previous.cost.to_f64()),
        liters: compare(current.liters.to_f64(), previous.liters.to_f64()),
        consumption: compare(current.consumption, previous.consumption),
    }
}

/// Vehículos con más km recorridos, con su porcentaje respecto al primero
pub fn top_vehicles(vehicles: &[Vehicle], routes: &[Route], limit: usize) -> Vec<TopVehicle> {
    let mut distances: HashMap<Uuid, Decimal> = HashMap::new();
    for route in finished(routes) {
        if let Some(distance) = route.distance {
            *distances.entry(route.vehicle_id).or_default() += distance;
        }
    }

    let mut ranking: Vec<(&Vehicle, Decimal)> = vehicles
        .iter()
        .filter_map(|v| distances.get(&v.id).map(|d| (v, *d)))
        .filter(|(_, d)| *d > Decimal::ZERO)
        .collect();
    ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.plate.cmp(&b.0.plate)));
    ranking.truncate(limit);

    let leader = ranking.first().map(|(_, d)| *d).unwrap_or_default();

    ranking
        .into_iter()
        .map(|(vehicle, distance)| TopVehicle {
            vehicle_id: vehicle.id,
            label: vehicle.label(),
            distance,
            share_pct: distance
                .checked_div(leader)
                .and_then(|ratio| ratio.to_f64())
                .map_or(0.0, |ratio| ratio * 100.0),
        })
        .collect()
}

pub struct DashboardService {
    repositories: Repositories,
}

impl DashboardService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    pub async fn summary(&self, query: &DashboardQuery) -> AppResult<DashboardSummary> {
        let today = Utc::now().date_naive();
        let year = query.year.unwrap_or(today.year());
        let month = query.month.unwrap_or(today.month());
        if !(1..=12).contains(&month) {
            return Err(validation_error("month", "range", "El mes debe estar entre 1 y 12"));
        }
        // el mes anterior también tiene que caer dentro del calendario de chrono
        if !(NaiveDate::MIN.year() + 1..=NaiveDate::MAX.year()).contains(&year) {
            return Err(validation_error("year", "range", "Año fuera de rango"));
        }

        let route_filters = RouteFilters::default();
        let refuel_filters = RefuelFilters::default();
        let (vehicles, routes, refuels) = futures::try_join!(
            self.repositories.vehicles.list(),
            self.repositories.routes.list(&route_filters),
            self.repositories.refuels.list(&refuel_filters),
        )?;

        debug!(
            "📊 Dashboard {}/{}: {} vehículos, {} rutas, {} abastecimientos",
            month,
            year,
            vehicles.len(),
            routes.len(),
            refuels.len()
        );

        Ok(DashboardSummary {
            year,
            totals: compute_totals(&vehicles, &routes, &refuels),
            monthly: monthly_buckets(&routes, &refuels, year),
            comparison: compare_months(&routes, &refuels, year, month),
            top_vehicles: top_vehicles(&vehicles, &routes, TOP_VEHICLES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumption_without_liters_is_none() {
        assert_eq!(consumption(Decimal::from(100), Decimal::ZERO), None);
        assert_eq!(consumption(Decimal::from(100), Decimal::from(10)), Some(10.0));
    }

    #[test]
    fn test_variation() {
        assert_eq!(variation(Some(150.0), Some(100.0)), Some(50.0));
        assert_eq!(variation(Some(50.0), Some(100.0)), Some(-50.0));
        assert_eq!(variation(Some(50.0), Some(0.0)), None);
        assert_eq!(variation(Some(50.0), None), None);
    }

    #[test]
    fn test_previous_month_wraps_year() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(previous_month(2025, 7), (2025, 6));
        assert_eq!(previous_month(i32::MIN, 1), (i32::MIN, 12));
    }
}
