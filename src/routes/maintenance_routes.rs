use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::api_response::ApiResponse;
use crate::dto::maintenance_dto::MaintenanceRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::maintenance::{Maintenance, MaintenanceFilters};
use crate::models::user::Permission;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_maintenances).post(create_maintenance))
        .route(
            "/:id",
            get(get_maintenance)
                .put(update_maintenance)
                .delete(delete_maintenance),
        )
}

async fn create_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<MaintenanceRequest>,
) -> Result<Json<ApiResponse<Maintenance>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = MaintenanceController::new(state.repositories.clone());
    Ok(Json(controller.create(request).await?))
}

async fn get_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Maintenance>, AppError> {
    user.require(Permission::ViewVehicles)?;
    let controller = MaintenanceController::new(state.repositories.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_maintenances(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<MaintenanceFilters>,
) -> Result<Json<Vec<Maintenance>>, AppError> {
    user.require(Permission::ViewVehicles)?;
    let controller = MaintenanceController::new(state.repositories.clone());
    Ok(Json(controller.list(&filters).await?))
}

async fn update_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<MaintenanceRequest>,
) -> Result<Json<ApiResponse<Maintenance>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = MaintenanceController::new(state.repositories.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = MaintenanceController::new(state.repositories.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Manutención eliminada exitosamente")))
}
