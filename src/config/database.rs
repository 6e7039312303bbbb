//! Pool de PostgreSQL
//!
//! El tamaño del pool sale de `DB_MAX_CONNECTIONS` / `DB_MIN_CONNECTIONS`.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// `None` si no hay `DATABASE_URL` (backend en memoria)
    pub fn from_environment(config: &EnvironmentConfig) -> Option<Self> {
        let url = config.database_url.clone()?;
        Some(Self {
            url,
            // el mínimo nunca supera al máximo
            max_connections: config.db_max_connections.max(1),
            min_connections: config.db_min_connections.min(config.db_max_connections.max(1)),
            acquire_timeout: Duration::from_secs(config.request_timeout_secs.max(1)),
            idle_timeout: Duration::from_secs(300),
        })
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .connect(&self.url)
            .await
    }
}
