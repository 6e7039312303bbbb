//! Registro de abastecimientos
//!
//! Los litros se derivan del valor total y del precio por litro; el
//! odómetro del abastecimiento pasa a ser el odómetro del vehículo.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::refuel_dto::{CreateRefuelRequest, RefuelListResponse, RefuelSummary};
use crate::models::refuel::{Refuel, RefuelFilters};
use crate::models::vehicle::Vehicle;
use crate::repositories::Repositories;
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub struct RefuelService {
    repositories: Repositories,
}

impl RefuelService {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    pub async fn create_refuel(&self, request: CreateRefuelRequest) -> AppResult<(Refuel, Vehicle)> {
        request.validate()?;

        let (Some(vehicle_id), Some(odometer_km), Some(price_per_liter), Some(total_price)) = (
            request.vehicle_id,
            request.odometer_km,
            request.price_per_liter,
            request.total_price,
        ) else {
            return Err(validation_error(
                "refuel",
                "required",
                "Vehículo, odómetro, precio y valor total son obligatorios",
            ));
        };

        let date = request.date.unwrap_or_else(|| Utc::now().date_naive());
        let refuel = Refuel::new(
            vehicle_id,
            odometer_km,
            price_per_liter,
            total_price,
            request.store,
            request.station,
            date,
        )
        .ok_or_else(|| {
            validation_error("price_per_liter", "positive", "El precio por litro debe ser mayor que cero")
        })?;

        let (refuel, vehicle) = self.repositories.refuels.insert_with_odometer(&refuel).await?;

        info!(
            "⛽ Abastecimiento de {} L registrado para {} (odómetro {})",
            refuel.liters.round_dp(2),
            vehicle.plate,
            vehicle.odometer_km
        );
        Ok((refuel, vehicle))
    }

    pub async fn list_refuels(&self, filters: &RefuelFilters) -> AppResult<RefuelListResponse> {
        let refuels = self.repositories.refuels.list(filters).await?;
        let summary = RefuelSummary::from_refuels(&refuels);
        Ok(RefuelListResponse { refuels, summary })
    }

    pub async fn get_refuel(&self, id: Uuid) -> AppResult<Refuel> {
        self.repositories
            .refuels
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Refuel", id))
    }

    /// Elimina el registro; el odómetro del vehículo no se revierte
    pub async fn delete_refuel(&self, id: Uuid) -> AppResult<()> {
        if !self.repositories.refuels.delete(id).await? {
            return Err(not_found_error("Refuel", id));
        }
        info!("🗑️ Abastecimiento {} eliminado", id);
        Ok(())
    }
}
