//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::repositories::Repositories;
use crate::services::auth_service::AuthService;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub repositories: Repositories,
    pub config: Arc<EnvironmentConfig>,
    pub auth: AuthService,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(repositories: Repositories, config: EnvironmentConfig) -> Self {
        let auth = AuthService::new(
            repositories.users.clone(),
            JwtConfig::from(&config),
            config.bcrypt_cost,
        );
        let rate_limit = RateLimitState::from_config(&config);

        Self {
            repositories,
            config: Arc::new(config),
            auth,
            rate_limit,
        }
    }
}
