//! Modelo de Driver
//!
//! Mapea la tabla drivers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Motorista habilitado para conducir vehículos de la flota
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub license_number: String,
    pub phone: String,
    /// Categoría de la licencia (A, B, C, D, E...)
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(name: String, license_number: String, phone: String, category: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            license_number: license_number.trim().to_string(),
            phone: phone.trim().to_string(),
            category: category.trim().to_uppercase(),
            created_at: Utc::now(),
        }
    }
}
