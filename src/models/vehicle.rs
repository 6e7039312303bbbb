//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle de la flota.
//! Mapea exactamente a la tabla vehicles con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub model: String,
    pub plate: String,
    /// Lectura actual del odómetro; base de rutas y abastecimientos
    pub odometer_km: Decimal,
    pub last_update: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Disponibilidad derivada de las rutas en curso (no se persiste)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleAvailability {
    Available,
    OnRoute,
}

impl Vehicle {
    pub fn new(model: String, plate: String, odometer_km: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            model,
            plate: normalize_plate(&plate),
            odometer_km,
            last_update: now,
            created_at: now,
        }
    }

    /// Etiqueta legible "modelo - matrícula" usada en informes y rankings
    pub fn label(&self) -> String {
        format!("{} - {}", self.model, self.plate)
    }

    /// Sobrescribe el odómetro y marca la última actualización
    pub fn record_odometer(&mut self, odometer_km: Decimal, at: DateTime<Utc>) {
        self.odometer_km = odometer_km;
        self.last_update = at;
    }
}

/// Las matrículas se guardan siempre en mayúsculas y sin espacios laterales
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vehicle_normalizes_plate() {
        let vehicle = Vehicle::new("Fiorino".into(), " abc-1234 ".into(), Decimal::from(1200));
        assert_eq!(vehicle.plate, "ABC-1234");
        assert_eq!(vehicle.label(), "Fiorino - ABC-1234");
    }

    #[test]
    fn test_record_odometer() {
        let mut vehicle = Vehicle::new("Strada".into(), "XYZ9A87".into(), Decimal::from(10));
        let at = Utc::now();
        vehicle.record_odometer(Decimal::from(55), at);
        assert_eq!(vehicle.odometer_km, Decimal::from(55));
        assert_eq!(vehicle.last_update, at);
    }
}
