use axum::{extract::State, http::StatusCode, Json};

use super::dto::DashboardDto;
use crate::interfaces::http::common::{domain_error, ApiResponse};
use crate::interfaces::http::modules::reports::ReportHandlerState;

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals and the five most recent reports", body = ApiResponse<DashboardDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_dashboard(
    State(state): State<ReportHandlerState>,
) -> Result<Json<ApiResponse<DashboardDto>>, (StatusCode, Json<ApiResponse<DashboardDto>>)> {
    let dashboard = state
        .report_service
        .dashboard()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(DashboardDto::from(dashboard))))
}
