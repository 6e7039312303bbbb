//! Modelo de Maintenance
//!
//! Mapea la tabla maintenances.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la manutención - mapea al ENUM maintenance_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    #[default]
    Completed,
}

/// Manutención realizada o pendiente sobre un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Maintenance {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    /// Tipo libre: cambio de aceite, neumáticos, frenos...
    pub maintenance_type: String,
    pub odometer_km: Decimal,
    pub cost: Decimal,
    pub notes: Option<String>,
    pub status: MaintenanceStatus,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Filtros para listado de manutenciones
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceFilters {
    pub vehicle_id: Option<Uuid>,
    pub status: Option<MaintenanceStatus>,
}

impl MaintenanceFilters {
    pub fn matches(&self, maintenance: &Maintenance) -> bool {
        self.vehicle_id.map_or(true, |v| maintenance.vehicle_id == v)
            && self.status.map_or(true, |s| maintenance.status == s)
    }
}
