use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::maintenance_dto::MaintenanceRequest;
use crate::models::maintenance::{Maintenance, MaintenanceFilters};
use crate::repositories::Repositories;
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct MaintenanceController {
    repositories: Repositories,
}

impl MaintenanceController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// Construye el registro a partir del request; km y costo por defecto 0
    async fn build(&self, id: Uuid, request: MaintenanceRequest) -> Result<Maintenance, AppError> {
        request.validate()?;

        let (Some(vehicle_id), Some(date)) = (request.vehicle_id, request.date) else {
            return Err(validation_error(
                "vehicle_id",
                "required",
                "Vehículo y fecha son obligatorios",
            ));
        };

        self.repositories
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;

        Ok(Maintenance {
            id,
            vehicle_id,
            maintenance_type: request.maintenance_type.trim().to_string(),
            odometer_km: request.odometer_km.unwrap_or_default(),
            cost: request.cost.unwrap_or_default(),
            notes: request
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            status: request.status.unwrap_or_default(),
            date,
            created_at: Utc::now(),
        })
    }

    pub async fn create(
        &self,
        request: MaintenanceRequest,
    ) -> Result<ApiResponse<Maintenance>, AppError> {
        let maintenance = self.build(Uuid::new_v4(), request).await?;
        let maintenance = self.repositories.maintenances.insert(&maintenance).await?;

        Ok(ApiResponse::success_with_message(
            maintenance,
            "Manutención registrada exitosamente",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Maintenance, AppError> {
        self.repositories
            .maintenances
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance", id))
    }

    pub async fn list(&self, filters: &MaintenanceFilters) -> Result<Vec<Maintenance>, AppError> {
        self.repositories.maintenances.list(filters).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: MaintenanceRequest,
    ) -> Result<ApiResponse<Maintenance>, AppError> {
        let current = self.get_by_id(id).await?;
        let mut maintenance = self.build(id, request).await?;
        maintenance.created_at = current.created_at;

        let maintenance = self.repositories.maintenances.update(&maintenance).await?;

        Ok(ApiResponse::success_with_message(
            maintenance,
            "Manutención actualizada exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repositories.maintenances.delete(id).await? {
            return Err(not_found_error("Maintenance", id));
        }
        Ok(())
    }
}
