use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehicleAvailability};
use crate::utils::validation::{validate_non_negative_decimal, validate_not_empty, validate_plate};

// Request para crear o actualizar un vehículo (sobrescritura completa)
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub model: String,
    #[serde(default)]
    #[validate(custom = "validate_plate")]
    pub plate: String,
    #[validate(required, custom = "validate_non_negative_decimal")]
    pub odometer_km: Option<Decimal>,
}

// Response de vehículo con disponibilidad derivada
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub model: String,
    pub plate: String,
    pub label: String,
    pub odometer_km: Decimal,
    pub availability: VehicleAvailability,
    pub last_update: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VehicleResponse {
    pub fn new(vehicle: Vehicle, on_route: bool) -> Self {
        let availability = if on_route {
            VehicleAvailability::OnRoute
        } else {
            VehicleAvailability::Available
        };
        Self {
            label: vehicle.label(),
            id: vehicle.id,
            model: vehicle.model,
            plate: vehicle.plate,
            odometer_km: vehicle.odometer_km,
            availability,
            last_update: vehicle.last_update,
            created_at: vehicle.created_at,
        }
    }
}
