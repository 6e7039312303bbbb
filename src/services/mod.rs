//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.
//! Los servicios encapsulan operaciones que involucran varias colecciones.

pub mod auth_service;
pub mod dashboard_service;
pub mod navigation_service;
pub mod pdf_renderer;
pub mod refuel_service;
pub mod report_service;
pub mod route_lifecycle_service;
