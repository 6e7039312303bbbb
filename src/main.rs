use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn, Level};

use fleet_backoffice::build_router;
use fleet_backoffice::config::database::DatabaseConfig;
use fleet_backoffice::config::environment::{EnvironmentConfig, StorageBackend};
use fleet_backoffice::database::connect_and_migrate;
use fleet_backoffice::repositories::Repositories;
use fleet_backoffice::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚛 Fleet Back-Office API");
    info!("========================");
    info!("🌍 Entorno: {}", config.environment);

    let repositories = match config.storage_backend {
        StorageBackend::Postgres => {
            let database = DatabaseConfig::from_environment(&config)
                .context("DATABASE_URL must be set")?;
            let pool = connect_and_migrate(&database).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {}", e);
                e
            })?;
            Repositories::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("⚠️  Almacenamiento en memoria: los datos se pierden al reiniciar");
            Repositories::in_memory()
        }
    };

    let addr = config.server_url();
    let state = AppState::new(repositories, config);

    if let Some(admin) = state.config.bootstrap_admin.clone() {
        state.auth.bootstrap_admin(&admin).await?;
    }

    let app = build_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("📋 Endpoints disponibles:");
    info!("   GET  /health");
    info!("   POST /api/auth/login - Login por usuario o email");
    info!("   GET  /api/auth/me | /api/auth/navigation");
    info!("   CRUD /api/vehicles | /api/drivers | /api/maintenances | /api/users");
    info!("   GET|POST /api/routes - POST /api/routes/:id/finish");
    info!("   GET|POST /api/refuels");
    info!("   GET  /api/dashboard?year=&month=");
    info!("   GET  /api/reports/fleet | /api/reports/fleet/pdf");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
