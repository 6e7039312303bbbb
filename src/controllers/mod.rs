//! Controllers de las colecciones CRUD
//!
//! Validan el request, aplican las reglas de cada colección y delegan la
//! persistencia en los repositorios.

pub mod driver_controller;
pub mod maintenance_controller;
pub mod user_controller;
pub mod vehicle_controller;
