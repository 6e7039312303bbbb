use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::api_response::ApiResponse;
use crate::dto::driver_dto::DriverRequest;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::driver::Driver;
use crate::models::user::Permission;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route(
            "/:id",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
}

async fn create_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<DriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = DriverController::new(state.repositories.clone());
    Ok(Json(controller.create(request).await?))
}

async fn get_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    user.require(Permission::ViewVehicles)?;
    let controller = DriverController::new(state.repositories.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_drivers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Driver>>, AppError> {
    user.require(Permission::ViewVehicles)?;
    let controller = DriverController::new(state.repositories.clone());
    Ok(Json(controller.list().await?))
}

async fn update_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<DriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = DriverController::new(state.repositories.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    user.require(Permission::ManageVehicles)?;
    let controller = DriverController::new(state.repositories.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Motorista eliminado exitosamente")))
}
