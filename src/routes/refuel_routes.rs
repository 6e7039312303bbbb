use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::dto::api_response::ApiResponse;
use crate::dto::refuel_dto::{CreateRefuelRequest, RefuelCreatedResponse, RefuelListResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::refuel::{Refuel, RefuelFilters};
use crate::models::user::Permission;
use crate::services::refuel_service::RefuelService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_refuel_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_refuels).post(create_refuel))
        .route("/:id", get(get_refuel).delete(delete_refuel))
}

async fn create_refuel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRefuelRequest>,
) -> Result<Json<ApiResponse<RefuelCreatedResponse>>, AppError> {
    user.require(Permission::AddRefuels)?;
    let service = RefuelService::new(state.repositories.clone());
    let (refuel, vehicle) = service.create_refuel(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        RefuelCreatedResponse { refuel, vehicle },
        "Abastecimiento registrado exitosamente",
    )))
}

async fn list_refuels(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<RefuelFilters>,
) -> Result<Json<RefuelListResponse>, AppError> {
    user.require(Permission::ViewRefuels)?;
    let service = RefuelService::new(state.repositories.clone());
    Ok(Json(service.list_refuels(&filters).await?))
}

async fn get_refuel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Refuel>, AppError> {
    user.require(Permission::ViewRefuels)?;
    let service = RefuelService::new(state.repositories.clone());
    Ok(Json(service.get_refuel(id).await?))
}

async fn delete_refuel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    user.require(Permission::AddRefuels)?;
    let service = RefuelService::new(state.repositories.clone());
    service.delete_refuel(id).await?;
    Ok(Json(ApiResponse::message("Abastecimiento eliminado exitosamente")))
}
