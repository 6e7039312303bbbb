//! DTOs de la API
//!
//! Requests validados con `validator` y responses serializables.

pub mod api_response;
pub mod auth_dto;
pub mod driver_dto;
pub mod maintenance_dto;
pub mod refuel_dto;
pub mod route_dto;
pub mod user_dto;
pub mod vehicle_dto;
