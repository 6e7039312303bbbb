use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{VehicleRequest, VehicleResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::Permission;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = VehicleController::new(state.repositories.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    user.require(Permission::ViewVehicles)?;
    let controller = VehicleController::new(state.repositories.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    user.require(Permission::ViewVehicles)?;
    let controller = VehicleController::new(state.repositories.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = VehicleController::new(state.repositories.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = VehicleController::new(state.repositories.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Vehículo eliminado exitosamente")))
}
