//! Ciclo de vida de las rutas
//!
//! Iniciar una ruta toma el odómetro actual del vehículo como km inicial.
//! Finalizarla calcula la distancia y mueve el odómetro del vehículo al km
//! final en la misma operación atómica del repositorio.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::route_dto::RouteResponse;
use crate::models::route::{Route, RouteFilters};
use crate::models::vehicle::Vehicle;
use crate::repositories::Repositories;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};

pub struct RouteLifecycleService {
    repositories: Repositories,
}

impl RouteLifecycleService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// Inicia una ruta para el vehículo y motorista indicados
    pub async fn start_route(
        &self,
        vehicle_id: Uuid,
        driver_id: Uuid,
        route_name: &str,
    ) -> AppResult<Route> {
        if route_name.trim().is_empty() {
            return Err(validation_error(
                "route_name",
                "required",
                "El nombre de la ruta es obligatorio",
            ));
        }

        let vehicle = self
            .repositories
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;

        self.repositories
            .drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver", driver_id))?;

        if let Some(active) = self
            .repositories
            .routes
            .find_active_for_vehicle(vehicle_id)
            .await?
        {
            warn!("⚠️ Vehículo {} ya tiene la ruta {} en curso", vehicle.plate, active.id);
            return Err(AppError::Conflict(format!(
                "Vehicle '{}' already has a route in progress",
                vehicle.plate
            )));
        }

        // el repositorio relee el odómetro dentro de la misma unidad atómica
        let route = Route::start(vehicle_id, driver_id, route_name.to_string(), vehicle.odometer_km);
        let route = self.repositories.routes.start(&route).await?;

        info!(
            "🚚 Ruta '{}' iniciada con {} (km inicial {})",
            route.route_name, vehicle.plate, route.km_start
        );
        Ok(route)
    }

    /// Finaliza una ruta en curso y actualiza el odómetro del vehículo
    pub async fn finish_route(&self, route_id: Uuid, km_end: Decimal) -> AppResult<(Route, Vehicle)> {
        let (route, vehicle) = self
            .repositories
            .routes
            .finish(route_id, km_end, Utc::now())
            .await?;

        info!(
            "🏁 Ruta {} finalizada: {} km recorridos, odómetro de {} en {}",
            route.id,
            route.distance.unwrap_or_default(),
            vehicle.plate,
            vehicle.odometer_km
        );
        Ok((route, vehicle))
    }

    /// Lista rutas con las etiquetas de vehículo y motorista resueltas
    pub async fn list_routes(&self, filters: &RouteFilters) -> AppResult<Vec<RouteResponse>> {
        let (routes, vehicles, drivers) = futures::try_join!(
            self.repositories.routes.list(filters),
            self.repositories.vehicles.list(),
            self.repositories.drivers.list(),
        )?;

        let vehicle_labels: HashMap<Uuid, String> =
            vehicles.iter().map(|v| (v.id, v.label())).collect();
        let driver_names: HashMap<Uuid, String> =
            drivers.into_iter().map(|d| (d.id, d.name)).collect();

        Ok(routes
            .into_iter()
            .map(|route| RouteResponse {
                vehicle: vehicle_labels.get(&route.vehicle_id).cloned(),
                driver: driver_names.get(&route.driver_id).cloned(),
                route,
            })
            .collect())
    }

    pub async fn get_route(&self, id: Uuid) -> AppResult<Route> {
        self.repositories
            .routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Route", id))
    }

    /// Elimina la ruta sin tocar el odómetro del vehículo
    pub async fn delete_route(&self, id: Uuid) -> AppResult<()> {
        if !self.repositories.routes.delete(id).await? {
            return Err(not_found_error("Route", id));
        }
        info!("🗑️ Ruta {} eliminada", id);
        Ok(())
    }
}
