//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto de desarrollo salvo
//! `DATABASE_URL`, obligatoria con `STORAGE_BACKEND=postgres`.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Errores de configuración
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Backend de persistencia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Cuenta admin creada al arrancar si no hay usuarios
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub bcrypt_cost: u32,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: None,
            storage_backend: StorageBackend::Memory,
            jwt_secret: "dev-secret-change-me".to_string(),
            jwt_expiration: 8 * 3600,
            cors_origins: vec!["*".to_string()],
            rate_limit_requests: 10,
            rate_limit_window: 60,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            db_max_connections: 10,
            db_min_connections: 1,
            bootstrap_admin: None,
        }
    }
}

impl EnvironmentConfig {
    /// Carga la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Carga la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "STORAGE_BACKEND",
                value,
            })?,
            None => StorageBackend::Postgres,
        };

        let database_url = var("DATABASE_URL");
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let bootstrap_admin = match (
            var("BOOTSTRAP_ADMIN_USERNAME"),
            var("BOOTSTRAP_ADMIN_EMAIL"),
            var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(email), Some(password)) => Some(BootstrapAdmin {
                username,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or("PORT", var("PORT"), defaults.port)?,
            host: var("HOST").unwrap_or(defaults.host),
            database_url,
            storage_backend,
            jwt_secret: var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration: parse_jwt_expiration(var("JWT_EXPIRATION"), defaults.jwt_expiration)?,
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            rate_limit_requests: parse_or(
                "RATE_LIMIT_REQUESTS",
                var("RATE_LIMIT_REQUESTS"),
                defaults.rate_limit_requests,
            )?,
            rate_limit_window: parse_or(
                "RATE_LIMIT_WINDOW",
                var("RATE_LIMIT_WINDOW"),
                defaults.rate_limit_window,
            )?,
            request_timeout_secs: parse_or(
                "REQUEST_TIMEOUT_SECS",
                var("REQUEST_TIMEOUT_SECS"),
                defaults.request_timeout_secs,
            )?,
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
            bcrypt_cost: parse_or("BCRYPT_COST", var("BCRYPT_COST"), defaults.bcrypt_cost)?,
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                var("DB_MAX_CONNECTIONS"),
                defaults.db_max_connections,
            )?,
            db_min_connections: parse_or(
                "DB_MIN_CONNECTIONS",
                var("DB_MIN_CONNECTIONS"),
                defaults.db_min_connections,
            )?,
            bootstrap_admin,
        })
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS abierto cuando no hay orígenes explícitos
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Tope de vida de un token: un año
pub const MAX_JWT_EXPIRATION_SECS: u64 = 365 * 24 * 3600;

fn parse_jwt_expiration(raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let seconds = parse_or("JWT_EXPIRATION", raw, default)?;
    if seconds == 0 || seconds > MAX_JWT_EXPIRATION_SECS {
        return Err(ConfigError::Invalid {
            key: "JWT_EXPIRATION",
            value: seconds.to_string(),
        });
    }
    Ok(seconds)
}
