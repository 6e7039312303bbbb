//! Back-office de flota: vehículos, motoristas, rutas, abastecimientos,
//! mantenimientos, usuarios, panel de indicadores e informes.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::{auth::auth_middleware, cors::cors_middleware};
use crate::routes::{
    auth_routes::create_auth_router, dashboard_routes::create_dashboard_router,
    driver_routes::create_driver_router, maintenance_routes::create_maintenance_router,
    refuel_routes::create_refuel_router, report_routes::create_report_router,
    route_routes::create_route_router, user_routes::create_user_router,
    vehicle_routes::create_vehicle_router,
};
use crate::state::AppState;

/// Construye el router completo de la API
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let protected = Router::new()
        .nest("/vehicles", create_vehicle_router())
        .nest("/drivers", create_driver_router())
        .nest("/routes", create_route_router())
        .nest("/refuels", create_refuel_router())
        .nest("/maintenances", create_maintenance_router())
        .nest("/users", create_user_router())
        .nest("/dashboard", create_dashboard_router())
        .nest("/reports", create_report_router())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/auth", create_auth_router(state.clone()))
        .merge(protected);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(cors_middleware(&config))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet_backoffice",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
