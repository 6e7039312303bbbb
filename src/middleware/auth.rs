//! Middleware de autenticación JWT
//!
//! Este módulo maneja la extracción del token Bearer, la carga del usuario
//! autenticado y la comprobación de permisos por endpoint.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{
    models::user::{Permission, User},
    state::AppState,
    utils::{errors::AppError, jwt::extract_token_from_header},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    /// `Forbidden` si el usuario no tiene el permiso (el rol admin siempre pasa)
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.0.can(permission) {
            return Ok(());
        }
        warn!(
            "⛔ {} sin permiso {}",
            self.0.username,
            permission.as_str()
        );
        Err(AppError::Forbidden(format!(
            "Permiso requerido: {}",
            permission.as_str()
        )))
    }

    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;
    let token = extract_token_from_header(auth_header)?;

    let user = state.auth.authenticate_token(token).await?;

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}
