use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Json, Router,
};
use tracing::info;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, NavigationItem};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::middleware::rate_limit::login_rate_limit_middleware;
use crate::models::user::User;
use crate::services::navigation_service::navigation_for;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Configura las rutas de autenticación
///
/// `/login` va limitado por IP; `/me` y `/navigation` exigen token.
pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            post(login).route_layer(from_fn_with_state(
                state.clone(),
                login_rate_limit_middleware,
            )),
        )
        .route(
            "/me",
            get(me).route_layer(from_fn_with_state(state.clone(), auth_middleware)),
        )
        .route(
            "/navigation",
            get(navigation).route_layer(from_fn_with_state(state, auth_middleware)),
        )
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    request.validate()?;
    let response = state.auth.login(&request.login, &request.password).await?;
    info!("🔓 Sesión iniciada: {}", response.user.username);
    Ok(Json(response))
}

async fn me(Extension(user): Extension<AuthenticatedUser>) -> Json<User> {
    Json(user.0)
}

async fn navigation(Extension(user): Extension<AuthenticatedUser>) -> Json<Vec<NavigationItem>> {
    Json(navigation_for(user.user()))
}
