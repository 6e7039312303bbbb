//! Modelo de Refuel (abastecimiento)
//!
//! Mapea la tabla refuels. Los litros no se informan: se derivan del
//! valor total y del precio por litro.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Abastecimiento registrado para un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Refuel {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    /// Odómetro en el momento del abastecimiento
    pub odometer_km: Decimal,
    pub liters: Decimal,
    pub price_per_liter: Decimal,
    pub total_price: Decimal,
    /// Tienda que paga el abastecimiento
    pub store: String,
    pub station: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Refuel {
    /// Crea el registro calculando `liters = total_price / price_per_liter`.
    ///
    /// Devuelve `None` si el precio por litro es cero.
    pub fn new(
        vehicle_id: Uuid,
        odometer_km: Decimal,
        price_per_liter: Decimal,
        total_price: Decimal,
        store: String,
        station: String,
        date: NaiveDate,
    ) -> Option<Self> {
        let liters = total_price.checked_div(price_per_liter)?;
        Some(Self {
            id: Uuid::new_v4(),
            vehicle_id,
            odometer_km,
            liters,
            price_per_liter,
            total_price,
            store: store.trim().to_string(),
            station: station.trim().to_string(),
            date,
            created_at: Utc::now(),
        })
    }
}

/// Filtros para listado de abastecimientos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefuelFilters {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub store: Option<String>,
    pub vehicle_id: Option<Uuid>,
}

impl RefuelFilters {
    pub fn matches(&self, refuel: &Refuel) -> bool {
        self.year.map_or(true, |y| refuel.date.year() == y)
            && self.month.map_or(true, |m| refuel.date.month() == m)
            && self.store.as_deref().map_or(true, |s| refuel.store == s)
            && self.vehicle_id.map_or(true, |v| refuel.vehicle_id == v)
    }
}
