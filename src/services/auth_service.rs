//! Servicio de autenticación
//!
//! El login acepta usuario o email: un usuario se resuelve primero al email
//! de su cuenta y la verificación se hace siempre contra el email.

use std::sync::Arc;

use bcrypt::{hash, verify};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::environment::BootstrapAdmin;
use crate::dto::auth_dto::LoginResponse;
use crate::models::user::{Permissions, User, UserRole};
use crate::repositories::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, verify_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Usuario o contraseña inválidos";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            users,
            jwt,
            bcrypt_cost,
        }
    }

    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))
    }

    /// Resuelve el identificador de login al email de la cuenta
    pub async fn resolve_email(&self, login: &str) -> AppResult<Option<String>> {
        let login = login.trim();
        if login.contains('@') {
            return Ok(Some(login.to_lowercase()));
        }
        Ok(self
            .users
            .find_by_username(login)
            .await?
            .map(|user| user.email))
    }

    pub async fn login(&self, login: &str, password: &str) -> AppResult<LoginResponse> {
        let user = match self.resolve_email(login).await? {
            Some(email) => self.users.find_by_email(&email).await?,
            None => None,
        };

        let Some(user) = user else {
            warn!("🔒 Login rechazado para '{}': cuenta inexistente", login.trim());
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;
        if !valid {
            warn!("🔒 Login rechazado para '{}': contraseña incorrecta", user.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token(&user, &self.jwt)?;
        info!("🔑 Login de {} ({})", user.username, user.role.as_str());
        Ok(LoginResponse::bearer(token, self.jwt.expiration, user))
    }

    /// Valida el token y carga el usuario actual
    pub async fn authenticate_token(&self, token: &str) -> AppResult<User> {
        let claims = verify_token(token, &self.jwt)
            .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;
        let user_id: Uuid = claims.user_id()?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))
    }

    /// Crea la cuenta admin inicial si todavía no hay usuarios
    pub async fn bootstrap_admin(&self, admin: &BootstrapAdmin) -> AppResult<Option<User>> {
        if self.users.count().await? > 0 {
            return Ok(None);
        }

        let user = User::new(
            admin.username.clone(),
            admin.email.clone(),
            self.hash_password(&admin.password)?,
            UserRole::Admin,
            Permissions::all(),
        );
        let user = self.users.insert(&user).await?;
        info!("👤 Usuario admin inicial '{}' creado", user.username);
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryStore::new()),
            JwtConfig {
                secret: "test".to_string(),
                expiration: 3600,
            },
            4,
        )
    }

    fn admin() -> BootstrapAdmin {
        BootstrapAdmin {
            username: "admin".to_string(),
            email: "Admin@Frota.Local".to_string(),
            password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_with_username_or_email() {
        let auth = service();
        auth.bootstrap_admin(&admin()).await.unwrap();

        let by_username = auth.login("admin", "secret123").await.unwrap();
        assert_eq!(by_username.user.email, "admin@frota.local");

        let by_email = auth.login("ADMIN@frota.local", "secret123").await.unwrap();
        assert_eq!(by_email.user.id, by_username.user.id);

        let user = auth.authenticate_token(&by_email.token).await.unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_share_message() {
        let auth = service();
        auth.bootstrap_admin(&admin()).await.unwrap();

        let wrong_password = auth.login("admin", "nope").await.unwrap_err();
        let unknown = auth.login("ghost", "secret123").await.unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown.to_string());
        assert!(matches!(unknown, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_only_runs_on_empty_store() {
        let auth = service();
        assert!(auth.bootstrap_admin(&admin()).await.unwrap().is_some());
        assert!(auth.bootstrap_admin(&admin()).await.unwrap().is_none());
    }
}
