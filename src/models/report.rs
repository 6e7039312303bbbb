//! Modelos del informe de flota
//!
//! El informe es una estructura plana (cabecera, resumen y dos tablas)
//! que se sirve como JSON o se renderiza a PDF.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parámetros de generación del informe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub vehicle_id: Option<Uuid>,
}

/// Bloque de resumen del informe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub total_routes: usize,
    pub total_distance: Decimal,
    pub total_liters: Decimal,
    pub total_cost: Decimal,
    pub average_consumption: Option<f64>,
}

/// Fila de la tabla de rutas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRouteRow {
    pub date: NaiveDate,
    pub vehicle: String,
    pub driver: String,
    pub route_name: String,
    pub distance: Decimal,
}

/// Fila de la tabla de abastecimientos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRefuelRow {
    pub date: NaiveDate,
    pub vehicle: String,
    pub station: String,
    pub store: String,
    pub liters: Decimal,
    pub total_price: Decimal,
}

/// Informe de flota para un periodo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetReport {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Etiqueta del vehículo filtrado, si lo hay
    pub vehicle: Option<String>,
    pub summary: ReportSummary,
    pub routes: Vec<ReportRouteRow>,
    pub refuels: Vec<ReportRefuelRow>,
}

impl FleetReport {
    /// Nombre del fichero PDF descargable
    pub fn file_name(&self) -> String {
        format!("fleet_report_{}_{}.pdf", self.start, self.end)
    }
}
