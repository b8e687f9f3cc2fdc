//! Export download handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Local;
use tracing::{error, info};

use super::dto::ExportQuery;
use crate::application::export::{self, ExportFormat, ExportOptions};
use crate::application::identity::AuthContext;
use crate::application::reports::ReportService;
use crate::config::ExportConfig;
use crate::infrastructure::database::repositories::ReportRepository;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse};

#[derive(Clone)]
pub struct ExportHandlerState {
    pub report_service: Arc<ReportService<ReportRepository>>,
    pub export_config: Arc<ExportConfig>,
}

async fn export_reports(
    state: ExportHandlerState,
    context: AuthContext,
    query: ExportQuery,
    format: ExportFormat,
) -> Result<Response, ApiError> {
    let filter = query.to_filter().map_err(domain_error)?;
    let reports = state
        .report_service
        .list(&filter)
        .await
        .map_err(domain_error)?;

    let options = ExportOptions::new(
        &state.export_config,
        &context.profile,
        &filter,
        Local::now().date_naive(),
    )
    .with_period(query.period);

    let rows = reports.len();
    let file = export::generate(format, reports, options)
        .await
        .map_err(|e| {
            error!(format = format.extension(), error = %e, "Export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format.failure_message())),
            )
        })?;

    info!(
        format = format.extension(),
        rows,
        account_id = %context.account_id,
        "Report export generated"
    );

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/export/xlsx",
    tag = "Export",
    security(("bearer_auth" = [])),
    params(ExportQuery),
    responses(
        (status = 200, description = "Spreadsheet download", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Malformed filter"),
        (status = 500, description = "Generation failed")
    )
)]
pub async fn export_xlsx(
    State(state): State<ExportHandlerState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    export_reports(state, context, query, ExportFormat::Xlsx).await
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/export/pdf",
    tag = "Export",
    security(("bearer_auth" = [])),
    params(ExportQuery),
    responses(
        (status = 200, description = "PDF download", content_type = "application/pdf"),
        (status = 400, description = "Malformed filter"),
        (status = 500, description = "Generation failed")
    )
)]
pub async fn export_pdf(
    State(state): State<ExportHandlerState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    export_reports(state, context, query, ExportFormat::Pdf).await
}
