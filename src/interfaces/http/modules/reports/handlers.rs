//! Report API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{ReportDto, ReportListDto, ReportQuery, ReportRequest, StaffRosterDto};
use crate::application::identity::AuthContext;
use crate::application::reports::ReportService;
use crate::domain::report::draft::MAX_STAFF;
use crate::infrastructure::database::repositories::ReportRepository;
use crate::interfaces::http::common::{domain_error, ApiResponse};

#[derive(Clone)]
pub struct ReportHandlerState {
    pub report_service: Arc<ReportService<ReportRepository>>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(ReportQuery),
    responses(
        (status = 200, description = "Filtered reports, newest first", body = ApiResponse<ReportListDto>),
        (status = 400, description = "Malformed date or month filter")
    )
)]
pub async fn list_reports(
    State(state): State<ReportHandlerState>,
    Extension(context): Extension<AuthContext>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<ReportListDto>>, (StatusCode, Json<ApiResponse<ReportListDto>>)> {
    let filter = query.to_filter().map_err(domain_error)?;
    let reports = state
        .report_service
        .list(&filter)
        .await
        .map_err(domain_error)?;

    let is_admin = context.is_admin();
    Ok(Json(ApiResponse::success(ReportListDto {
        total: reports.len(),
        items: reports.into_iter().map(ReportDto::from).collect(),
        can_edit: is_admin,
        can_delete: is_admin,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report details", body = ApiResponse<ReportDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_report(
    State(state): State<ReportHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportDto>>, (StatusCode, Json<ApiResponse<ReportDto>>)> {
    match state.report_service.get(&id).await {
        Ok(report) => Ok(Json(ApiResponse::success(ReportDto::from(report)))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reports",
    tag = "Reports",
    security(("bearer_auth" = [])),
    request_body = ReportRequest,
    responses(
        (status = 201, description = "Report stored", body = ApiResponse<ReportDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_report(
    State(state): State<ReportHandlerState>,
    Extension(context): Extension<AuthContext>,
    Json(request): Json<ReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReportDto>>), (StatusCode, Json<ApiResponse<ReportDto>>)> {
    match state
        .report_service
        .submit(request.into(), &context.account_id)
        .await
    {
        Ok(report) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ReportDto::from(report))),
        )),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Report ID")),
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_report(
    State(state): State<ReportHandlerState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ApiResponse<ReportDto>>, (StatusCode, Json<ApiResponse<ReportDto>>)> {
    match state
        .report_service
        .update(&id, request.into(), &context.account_id)
        .await
    {
        Ok(report) => Ok(Json(ApiResponse::success(ReportDto::from(report)))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_report(
    State(state): State<ReportHandlerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.report_service.delete(&id).await {
        Ok(()) => Ok(Json(ApiResponse::success(()))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/staff",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Staff that can be assigned to a shift", body = ApiResponse<StaffRosterDto>)
    )
)]
pub async fn list_staff(State(state): State<ReportHandlerState>) -> Json<ApiResponse<StaffRosterDto>> {
    Json(ApiResponse::success(StaffRosterDto {
        staff: state.report_service.staff_roster().to_vec(),
        max_per_report: MAX_STAFF,
    }))
}
