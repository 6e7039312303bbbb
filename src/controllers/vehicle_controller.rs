use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{VehicleRequest, VehicleResponse};
use crate::models::route::{RouteFilters, RouteStatus};
use crate::models::vehicle::{normalize_plate, Vehicle};
use crate::repositories::Repositories;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repositories: Repositories,
}

impl VehicleController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    async fn on_route(&self, vehicle_id: Uuid) -> Result<bool, AppError> {
        Ok(self
            .repositories
            .routes
            .find_active_for_vehicle(vehicle_id)
            .await?
            .is_some())
    }

    pub async fn create(
        &self,
        request: VehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = Vehicle::new(
            request.model.trim().to_string(),
            request.plate,
            request.odometer_km.unwrap_or_default(),
        );
        let vehicle = self.repositories.vehicles.insert(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::new(vehicle, false),
            "Vehículo creado exitosamente",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repositories
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let on_route = self.on_route(id).await?;
        Ok(VehicleResponse::new(vehicle, on_route))
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let active = RouteFilters {
            status: Some(RouteStatus::InProgress),
            vehicle_id: None,
        };
        let (vehicles, routes) = futures::try_join!(
            self.repositories.vehicles.list(),
            self.repositories.routes.list(&active),
        )?;

        let busy: HashSet<Uuid> = routes.iter().map(|r| r.vehicle_id).collect();
        Ok(vehicles
            .into_iter()
            .map(|v| {
                let on_route = busy.contains(&v.id);
                VehicleResponse::new(v, on_route)
            })
            .collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: VehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let mut vehicle = self
            .repositories
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        vehicle.model = request.model.trim().to_string();
        vehicle.plate = normalize_plate(&request.plate);
        vehicle.record_odometer(request.odometer_km.unwrap_or(vehicle.odometer_km), Utc::now());

        let vehicle = self.repositories.vehicles.update(&vehicle).await?;
        let on_route = self.on_route(id).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::new(vehicle, on_route),
            "Vehículo actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repositories.vehicles.delete(id).await? {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }
}
