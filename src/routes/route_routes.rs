use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::route_dto::{
    FinishRouteRequest, RouteFinishedResponse, RouteResponse, StartRouteRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::route::{Route, RouteFilters};
use crate::models::user::Permission;
use crate::services::route_lifecycle_service::RouteLifecycleService;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(start_route))
        .route("/:id", get(get_route).delete(delete_route))
        .route("/:id/finish", post(finish_route))
}

async fn start_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<StartRouteRequest>,
) -> Result<Json<ApiResponse<Route>>, AppError> {
    user.require(Permission::EditRoutes)?;
    request.validate()?;
    let (Some(vehicle_id), Some(driver_id)) = (request.vehicle_id, request.driver_id) else {
        return Err(validation_error(
            "route",
            "required",
            "Vehículo y motorista son obligatorios",
        ));
    };

    let service = RouteLifecycleService::new(state.repositories.clone());
    let route = service
        .start_route(vehicle_id, driver_id, &request.route_name)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        route,
        "Ruta iniciada exitosamente",
    )))
}

async fn finish_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<FinishRouteRequest>,
) -> Result<Json<ApiResponse<RouteFinishedResponse>>, AppError> {
    user.require(Permission::EditRoutes)?;
    request.validate()?;
    let Some(km_end) = request.km_end else {
        return Err(validation_error(
            "km_end",
            "required",
            "El odómetro final es obligatorio",
        ));
    };

    let service = RouteLifecycleService::new(state.repositories.clone());
    let (route, vehicle) = service.finish_route(id, km_end).await?;
    Ok(Json(ApiResponse::success_with_message(
        RouteFinishedResponse { route, vehicle },
        "Ruta finalizada exitosamente",
    )))
}

async fn list_routes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<RouteFilters>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    user.require(Permission::ViewRoutes)?;
    let service = RouteLifecycleService::new(state.repositories.clone());
    Ok(Json(service.list_routes(&filters).await?))
}

async fn get_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Route>, AppError> {
    user.require(Permission::ViewRoutes)?;
    let service = RouteLifecycleService::new(state.repositories.clone());
    Ok(Json(service.get_route(id).await?))
}

async fn delete_route(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    user.require(Permission::EditRoutes)?;
    let service = RouteLifecycleService::new(state.repositories.clone());
    service.delete_route(id).await?;
    Ok(Json(ApiResponse::message("Ruta eliminada exitosamente")))
}
