use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::middleware::auth::AuthenticatedUser;
use crate::models::report::{FleetReport, ReportQuery};
use crate::models::user::Permission;
use crate::services::report_service::ReportService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/fleet", get(fleet_report))
        .route("/fleet/pdf", get(fleet_report_pdf))
}

async fn fleet_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<FleetReport>, AppError> {
    user.require(Permission::GenerateReports)?;
    let service = ReportService::new(state.repositories.clone());
    Ok(Json(service.build_report(&query).await?))
}

/// Descarga del informe en PDF
async fn fleet_report_pdf(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    user.require(Permission::GenerateReports)?;
    let service = ReportService::new(state.repositories.clone());
    let (file_name, bytes) = service.export_pdf(&query).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    ))
}
