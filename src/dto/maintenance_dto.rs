use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance::MaintenanceStatus;
use crate::utils::validation::{validate_non_negative_decimal, validate_not_empty};

// Request para crear o actualizar una manutención
#[derive(Debug, Deserialize, Validate)]
pub struct MaintenanceRequest {
    #[validate(required)]
    pub vehicle_id: Option<Uuid>,
    #[serde(default)]
    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub maintenance_type: String,
    #[validate(custom = "validate_non_negative_decimal")]
    pub odometer_km: Option<Decimal>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub cost: Option<Decimal>,
    pub notes: Option<String>,
    pub status: Option<MaintenanceStatus>,
    #[validate(required)]
    pub date: Option<NaiveDate>,
}
