//! Modelos de Analytics
//!
//! Este módulo contiene los modelos del dashboard: totales de la flota,
//! acumulados mensuales, comparación mes a mes y ranking de vehículos.
//!
//! Los ratios que no se pueden calcular (litros o mes anterior en cero) se
//! exponen como `None` ("sin datos") en vez de dividir por cero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Abreviaturas de los 12 meses usadas como etiquetas del gráfico
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Totales generales de la flota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetTotals {
    pub total_vehicles: usize,
    pub total_routes: usize,
    pub total_refuels: usize,
    pub total_km: Decimal,
    pub total_liters: Decimal,
    pub total_cost: Decimal,
    /// km/L; `None` cuando no hay litros registrados
    pub average_consumption: Option<f64>,
}

/// Acumulado de un mes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyBucket {
    /// 1..=12
    pub month: u32,
    pub label: String,
    pub km: Decimal,
    pub liters: Decimal,
    pub cost: Decimal,
    pub consumption: Option<f64>,
}

impl MonthlyBucket {
    pub fn empty(month: u32) -> Self {
        Self {
            month,
            label: MONTH_LABELS[(month - 1) as usize].to_string(),
            km: Decimal::ZERO,
            liters: Decimal::ZERO,
            cost: Decimal::ZERO,
            consumption: None,
        }
    }
}

/// Valor actual contra el del mes anterior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricComparison {
    pub current: Option<f64>,
    pub previous: Option<f64>,
    /// ((actual - anterior) / anterior) * 100; `None` si el anterior es cero o falta
    pub variation_pct: Option<f64>,
}

/// Comparación del mes de referencia con el mes anterior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthComparison {
    pub year: i32,
    pub month: u32,
    pub previous_year: i32,
    pub previous_month: u32,
    pub km: MetricComparison,
    pub cost: MetricComparison,
    pub liters: MetricComparison,
    pub consumption: MetricComparison,
}

/// Entrada del ranking de vehículos que más rodaron
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopVehicle {
    pub vehicle_id: Uuid,
    pub label: String,
    pub distance: Decimal,
    /// Porcentaje respecto al primero del ranking
    pub share_pct: f64,
}

/// Resumen completo del dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub year: i32,
    pub totals: FleetTotals,
    pub monthly: Vec<MonthlyBucket>,
    pub comparison: MonthComparison,
    pub top_vehicles: Vec<TopVehicle>,
}

/// Parámetros del dashboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}
