#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fleet_backoffice::config::environment::{BootstrapAdmin, EnvironmentConfig};
use fleet_backoffice::models::driver::Driver;
use fleet_backoffice::models::vehicle::Vehicle;
use fleet_backoffice::repositories::Repositories;
use fleet_backoffice::state::AppState;

pub const ADMIN_PASSWORD: &str = "secret123";

/// Configuración de tests: almacenamiento en memoria y bcrypt barato
pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        jwt_secret: "test-secret".to_string(),
        bcrypt_cost: 4,
        bootstrap_admin: Some(BootstrapAdmin {
            username: "admin".to_string(),
            email: "admin@frota.local".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }),
        ..EnvironmentConfig::default()
    }
}

pub async fn test_state() -> AppState {
    let config = test_config();
    let admin = config.bootstrap_admin.clone();
    let state = AppState::new(Repositories::in_memory(), config);
    if let Some(admin) = admin {
        state.auth.bootstrap_admin(&admin).await.unwrap();
    }
    state
}

pub fn km(value: i64) -> Decimal {
    Decimal::from(value)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn seed_vehicle(repositories: &Repositories, plate: &str, odometer: i64) -> Vehicle {
    let vehicle = Vehicle::new("Fiorino".to_string(), plate.to_string(), km(odometer));
    repositories.vehicles.insert(&vehicle).await.unwrap()
}

pub async fn seed_driver(repositories: &Repositories, name: &str) -> Driver {
    let driver = Driver::new(
        name.to_string(),
        "12345678900".to_string(),
        "+55 11 99999-0000".to_string(),
        "B".to_string(),
    );
    repositories.drivers.insert(&driver).await.unwrap()
}
