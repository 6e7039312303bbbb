use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::refuel::Refuel;
use crate::models::vehicle::Vehicle;
use crate::utils::validation::{
    validate_non_negative_decimal, validate_not_empty, validate_positive_decimal,
};

// Request para registrar un abastecimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRefuelRequest {
    #[validate(required)]
    pub vehicle_id: Option<Uuid>,
    #[validate(required, custom = "validate_non_negative_decimal")]
    pub odometer_km: Option<Decimal>,
    #[validate(required, custom = "validate_positive_decimal")]
    pub price_per_liter: Option<Decimal>,
    #[validate(required, custom = "validate_positive_decimal")]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub store: String,
    #[serde(default)]
    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub station: String,
    /// Por defecto, hoy
    pub date: Option<NaiveDate>,
}

// Totales del listado filtrado
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RefuelSummary {
    pub count: usize,
    pub total_liters: Decimal,
    pub total_spent: Decimal,
}

impl RefuelSummary {
    pub fn from_refuels(refuels: &[Refuel]) -> Self {
        Self {
            count: refuels.len(),
            total_liters: refuels.iter().map(|r| r.liters).sum(),
            total_spent: refuels.iter().map(|r| r.total_price).sum(),
        }
    }
}

// Response del listado de abastecimientos
#[derive(Debug, Serialize)]
pub struct RefuelListResponse {
    pub refuels: Vec<Refuel>,
    pub summary: RefuelSummary,
}

// Response de abastecimiento registrado con el vehículo actualizado
#[derive(Debug, Serialize)]
pub struct RefuelCreatedResponse {
    pub refuel: Refuel,
    pub vehicle: Vehicle,
}
