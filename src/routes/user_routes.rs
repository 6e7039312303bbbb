use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::dto::api_response::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{Permission, User};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

fn controller(state: &AppState) -> UserController {
    UserController::new(state.repositories.clone(), state.auth.clone())
}

async fn create_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    user.require(Permission::ManageUsers)?;
    Ok(Json(controller(&state).create(request).await?))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    user.require(Permission::ManageUsers)?;
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<User>>, AppError> {
    user.require(Permission::ManageUsers)?;
    Ok(Json(controller(&state).list().await?))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    user.require(Permission::ManageUsers)?;
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    user.require(Permission::ManageUsers)?;
    controller(&state).delete(id, user.user()).await?;
    Ok(Json(ApiResponse::message("Usuario eliminado exitosamente")))
}
