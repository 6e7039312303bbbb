use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::models::analytics::{DashboardQuery, DashboardSummary};
use crate::services::dashboard_service::DashboardService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Panel de indicadores: cualquier usuario autenticado puede verlo
pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let service = DashboardService::new(state.repositories.clone());
    Ok(Json(service.summary(&query).await?))
}
