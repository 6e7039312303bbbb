//! Middleware de Rate Limiting
//!
//! Este módulo limita los intentos de login por IP de cliente dentro de una
//! ventana fija de tiempo.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::EnvironmentConfig;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado global del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window_duration: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window),
        )
    }

    /// Verificar si una IP ha excedido el límite
    pub async fn check_rate_limit(&self, ip: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// IP del cliente según los headers del proxy
fn client_ip(request: &Request) -> String {
    let headers = request.headers();
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|h| h.to_str().ok()))
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware de rate limiting para el login
pub async fn login_rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request);
    state.rate_limit.check_rate_limit(&ip).await?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_is_per_ip() {
        let limiter = RateLimitState::new(2, Duration::from_secs(60));
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(matches!(
            limiter.check_rate_limit("10.0.0.1").await,
            Err(AppError::RateLimitExceeded)
        ));
        assert!(limiter.check_rate_limit("10.0.0.2").await.is_ok());
    }

    #[tokio::test]
    async fn test_window_expires() {
        let limiter = RateLimitState::new(1, Duration::from_millis(20));
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_err());
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(limiter.check_rate_limit("10.0.0.1").await.is_ok());
    }
}
