//! Repositorios de persistencia
//!
//! Un trait por colección con dos implementaciones: PostgreSQL (`sqlx`) y
//! un almacén en memoria usado en desarrollo y en los tests.

pub mod driver_repository;
pub mod maintenance_repository;
pub mod memory;
pub mod refuel_repository;
pub mod route_repository;
pub mod user_repository;
pub mod vehicle_repository;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::models::maintenance::{Maintenance, MaintenanceFilters};
use crate::models::refuel::{Refuel, RefuelFilters};
use crate::models::route::{Route, RouteFilters};
use crate::models::user::User;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

use driver_repository::PgDriverRepository;
use maintenance_repository::PgMaintenanceRepository;
use memory::MemoryStore;
use refuel_repository::PgRefuelRepository;
use route_repository::PgRouteRepository;
use user_repository::PgUserRepository;
use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    async fn list(&self) -> AppResult<Vec<Vehicle>>;
    /// Sobrescribe el registro completo; `NotFound` si no existe
    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;
    /// `Conflict` si el vehículo está referenciado
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn insert(&self, driver: &Driver) -> AppResult<Driver>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>>;
    async fn list(&self) -> AppResult<Vec<Driver>>;
    async fn update(&self, driver: &Driver) -> AppResult<Driver>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Guarda una ruta nueva tomando `km_start` del odómetro actual del
    /// vehículo en la misma unidad atómica. `Conflict` si el vehículo ya
    /// tiene una ruta en curso
    async fn start(&self, route: &Route) -> AppResult<Route>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>>;
    async fn list(&self, filters: &RouteFilters) -> AppResult<Vec<Route>>;
    async fn find_active_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<Route>>;
    /// Finaliza la ruta y actualiza el odómetro del vehículo en una sola unidad atómica
    async fn finish(
        &self,
        id: Uuid,
        km_end: Decimal,
        ended_at: DateTime<Utc>,
    ) -> AppResult<(Route, Vehicle)>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait RefuelRepository: Send + Sync {
    /// Guarda el abastecimiento y sobrescribe el odómetro del vehículo, atómicamente
    async fn insert_with_odometer(&self, refuel: &Refuel) -> AppResult<(Refuel, Vehicle)>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Refuel>>;
    async fn list(&self, filters: &RefuelFilters) -> AppResult<Vec<Refuel>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn insert(&self, maintenance: &Maintenance) -> AppResult<Maintenance>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Maintenance>>;
    async fn list(&self, filters: &MaintenanceFilters) -> AppResult<Vec<Maintenance>>;
    async fn update(&self, maintenance: &Maintenance) -> AppResult<Maintenance>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &User) -> AppResult<User>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn list(&self) -> AppResult<Vec<User>>;
    async fn update(&self, user: &User) -> AppResult<User>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    async fn count(&self) -> AppResult<i64>;
}

/// Conjunto de repositorios compartido por controllers y servicios
#[derive(Clone)]
pub struct Repositories {
    pub vehicles: Arc<dyn VehicleRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub routes: Arc<dyn RouteRepository>,
    pub refuels: Arc<dyn RefuelRepository>,
    pub maintenances: Arc<dyn MaintenanceRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            drivers: Arc::new(PgDriverRepository::new(pool.clone())),
            routes: Arc::new(PgRouteRepository::new(pool.clone())),
            refuels: Arc::new(PgRefuelRepository::new(pool.clone())),
            maintenances: Arc::new(PgMaintenanceRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            vehicles: store.clone(),
            drivers: store.clone(),
            routes: store.clone(),
            refuels: store.clone(),
            maintenances: store.clone(),
            users: store,
        }
    }
}
