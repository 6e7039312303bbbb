//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod analytics;
pub mod driver;
pub mod maintenance;
pub mod refuel;
pub mod report;
pub mod route;
pub mod user;
pub mod vehicle;
