//! Almacén en memoria
//!
//! Todas las colecciones viven detrás de un único `RwLock`, así que las
//! operaciones que tocan dos colecciones (finalizar ruta, registrar
//! abastecimiento) se ejecutan en una sola sección crítica.
//! Replica las restricciones del schema: unicidad de placa, usuario y email,
//! claves foráneas con RESTRICT y una sola ruta en curso por vehículo.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::models::maintenance::{Maintenance, MaintenanceFilters};
use crate::models::refuel::{Refuel, RefuelFilters};
use crate::models::route::{Route, RouteFilters};
use crate::models::user::User;
use crate::models::vehicle::Vehicle;
use crate::repositories::{
    DriverRepository, MaintenanceRepository, RefuelRepository, RouteRepository, UserRepository,
    VehicleRepository,
};
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

#[derive(Default)]
struct Collections {
    vehicles: HashMap<Uuid, Vehicle>,
    drivers: HashMap<Uuid, Driver>,
    routes: HashMap<Uuid, Route>,
    refuels: HashMap<Uuid, Refuel>,
    maintenances: HashMap<Uuid, Maintenance>,
    users: HashMap<Uuid, User>,
}

impl Collections {
    fn ensure_unique_plate(&self, vehicle: &Vehicle) -> AppResult<()> {
        let taken = self
            .vehicles
            .values()
            .any(|v| v.id != vehicle.id && v.plate == vehicle.plate);
        if taken {
            return Err(conflict_error("Vehicle", "plate", &vehicle.plate));
        }
        Ok(())
    }

    fn ensure_unique_user(&self, user: &User) -> AppResult<()> {
        for other in self.users.values().filter(|u| u.id != user.id) {
            if other.username == user.username {
                return Err(conflict_error("User", "username", &user.username));
            }
            if other.email == user.email {
                return Err(conflict_error("User", "email", &user.email));
            }
        }
        Ok(())
    }

    fn ensure_vehicle(&self, id: Uuid) -> AppResult<()> {
        if !self.vehicles.contains_key(&id) {
            return Err(AppError::Conflict(format!(
                "Vehicle '{}' referenced but does not exist",
                id
            )));
        }
        Ok(())
    }

    fn vehicle_is_referenced(&self, id: Uuid) -> bool {
        self.routes.values().any(|r| r.vehicle_id == id)
            || self.refuels.values().any(|r| r.vehicle_id == id)
            || self.maintenances.values().any(|m| m.vehicle_id == id)
    }
}

/// Implementación en memoria de todos los repositorios
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut data = self.inner.write().await;
        data.ensure_unique_plate(vehicle)?;
        data.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.inner.read().await.vehicles.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self.inner.read().await.vehicles.values().cloned().collect();
        vehicles.sort_by(|a, b| a.model.cmp(&b.model).then_with(|| a.plate.cmp(&b.plate)));
        Ok(vehicles)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut data = self.inner.write().await;
        if !data.vehicles.contains_key(&vehicle.id) {
            return Err(not_found_error("Vehicle", vehicle.id));
        }
        data.ensure_unique_plate(vehicle)?;
        data.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut data = self.inner.write().await;
        if data.vehicle_is_referenced(id) {
            return Err(AppError::Conflict(format!(
                "Vehicle '{}' is referenced by routes, refuels or maintenances",
                id
            )));
        }
        Ok(data.vehicles.remove(&id).is_some())
    }
}

#[async_trait]
impl DriverRepository for MemoryStore {
    async fn insert(&self, driver: &Driver) -> AppResult<Driver> {
        self.inner.write().await.drivers.insert(driver.id, driver.clone());
        Ok(driver.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        Ok(self.inner.read().await.drivers.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        let mut drivers: Vec<Driver> = self.inner.read().await.drivers.values().cloned().collect();
        drivers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(drivers)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Driver> {
        let mut data = self.inner.write().await;
        match data.drivers.get_mut(&driver.id) {
            Some(current) => {
                *current = driver.clone();
                Ok(driver.clone())
            }
            None => Err(not_found_error("Driver", driver.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut data = self.inner.write().await;
        if data.routes.values().any(|r| r.driver_id == id) {
            return Err(AppError::Conflict(format!("Driver '{}' is referenced by routes", id)));
        }
        Ok(data.drivers.remove(&id).is_some())
    }
}

#[async_trait]
impl RouteRepository for MemoryStore {
    async fn start(&self, route: &Route) -> AppResult<Route> {
        let mut data = self.inner.write().await;
        let km_start = data
            .vehicles
            .get(&route.vehicle_id)
            .map(|v| v.odometer_km)
            .ok_or_else(|| not_found_error("Vehicle", route.vehicle_id))?;
        if !data.drivers.contains_key(&route.driver_id) {
            return Err(AppError::Conflict(format!(
                "Driver '{}' referenced but does not exist",
                route.driver_id
            )));
        }
        let busy = data
            .routes
            .values()
            .any(|r| r.vehicle_id == route.vehicle_id && r.is_in_progress());
        if route.is_in_progress() && busy {
            return Err(AppError::Conflict(format!(
                "Vehicle '{}' already has a route in progress",
                route.vehicle_id
            )));
        }
        let route = Route {
            km_start,
            ..route.clone()
        };
        data.routes.insert(route.id, route.clone());
        Ok(route)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        Ok(self.inner.read().await.routes.get(&id).cloned())
    }

    async fn list(&self, filters: &RouteFilters) -> AppResult<Vec<Route>> {
        let mut routes: Vec<Route> = self
            .inner
            .read()
            .await
            .routes
            .values()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect();
        routes.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(routes)
    }

    async fn find_active_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<Route>> {
        Ok(self
            .inner
            .read()
            .await
            .routes
            .values()
            .find(|r| r.vehicle_id == vehicle_id && r.is_in_progress())
            .cloned())
    }

    async fn finish(
        &self,
        id: Uuid,
        km_end: Decimal,
        ended_at: DateTime<Utc>,
    ) -> AppResult<(Route, Vehicle)> {
        let mut data = self.inner.write().await;

        let mut route = data
            .routes
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Route", id))?;
        route.check_finish(km_end)?;

        let mut vehicle = data
            .vehicles
            .get(&route.vehicle_id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", route.vehicle_id))?;

        route.finish(km_end, ended_at)?;
        vehicle.record_odometer(km_end, ended_at);

        data.routes.insert(route.id, route.clone());
        data.vehicles.insert(vehicle.id, vehicle.clone());
        Ok((route, vehicle))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.routes.remove(&id).is_some())
    }
}

#[async_trait]
impl RefuelRepository for MemoryStore {
    async fn insert_with_odometer(&self, refuel: &Refuel) -> AppResult<(Refuel, Vehicle)> {
        let mut data = self.inner.write().await;
        let vehicle = data
            .vehicles
            .get_mut(&refuel.vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", refuel.vehicle_id))?;
        vehicle.record_odometer(refuel.odometer_km, Utc::now());
        let vehicle = vehicle.clone();

        data.refuels.insert(refuel.id, refuel.clone());
        Ok((refuel.clone(), vehicle))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Refuel>> {
        Ok(self.inner.read().await.refuels.get(&id).cloned())
    }

    async fn list(&self, filters: &RefuelFilters) -> AppResult<Vec<Refuel>> {
        let mut refuels: Vec<Refuel> = self
            .inner
            .read()
            .await
            .refuels
            .values()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect();
        refuels.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
        Ok(refuels)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.refuels.remove(&id).is_some())
    }
}

#[async_trait]
impl MaintenanceRepository for MemoryStore {
    async fn insert(&self, maintenance: &Maintenance) -> AppResult<Maintenance> {
        let mut data = self.inner.write().await;
        data.ensure_vehicle(maintenance.vehicle_id)?;
        data.maintenances.insert(maintenance.id, maintenance.clone());
        Ok(maintenance.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Maintenance>> {
        Ok(self.inner.read().await.maintenances.get(&id).cloned())
    }

    async fn list(&self, filters: &MaintenanceFilters) -> AppResult<Vec<Maintenance>> {
        let mut maintenances: Vec<Maintenance> = self
            .inner
            .read()
            .await
            .maintenances
            .values()
            .filter(|m| filters.matches(m))
            .cloned()
            .collect();
        maintenances.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
        Ok(maintenances)
    }

    async fn update(&self, maintenance: &Maintenance) -> AppResult<Maintenance> {
        let mut data = self.inner.write().await;
        if !data.maintenances.contains_key(&maintenance.id) {
            return Err(not_found_error("Maintenance", maintenance.id));
        }
        data.ensure_vehicle(maintenance.vehicle_id)?;
        data.maintenances.insert(maintenance.id, maintenance.clone());
        Ok(maintenance.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.maintenances.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut data = self.inner.write().await;
        data.ensure_unique_user(user)?;
        data.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.inner.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut data = self.inner.write().await;
        if !data.users.contains_key(&user.id) {
            return Err(not_found_error("User", user.id));
        }
        data.ensure_unique_user(user)?;
        data.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.users.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.users.len() as i64)
    }
}
