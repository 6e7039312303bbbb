use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::route::Route;
use crate::models::vehicle::Vehicle;
use crate::utils::validation::validate_not_empty;

// Request para iniciar una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct StartRouteRequest {
    #[validate(required)]
    pub vehicle_id: Option<Uuid>,
    #[validate(required)]
    pub driver_id: Option<Uuid>,
    #[serde(default)]
    #[validate(custom = "validate_not_empty", length(max = 200))]
    pub route_name: String,
}

// Request para finalizar una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct FinishRouteRequest {
    #[validate(required)]
    pub km_end: Option<Decimal>,
}

// Ruta con las etiquetas de vehículo y motorista resueltas
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    #[serde(flatten)]
    pub route: Route,
    pub vehicle: Option<String>,
    pub driver: Option<String>,
}

// Response de ruta finalizada con el vehículo actualizado
#[derive(Debug, Serialize)]
pub struct RouteFinishedResponse {
    pub route: Route,
    pub vehicle: Vehicle,
}
