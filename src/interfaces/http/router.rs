//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Duration;
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::events::SharedEventBus;
use crate::application::identity::{SessionService, UserService};
use crate::application::reports::ReportService;
use crate::config::AppConfig;
use crate::infrastructure::crypto::JwtConfig;
use crate::infrastructure::database::repositories::{
    ReportRepository, SessionRepository, UserRepository,
};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{require_admin, session_middleware, SessionState};
use crate::interfaces::http::modules::{
    auth, dashboard, exports, health, metrics, request_id, reports, users,
};

/// Unified state for all `/api/v1` routes. Each handler keeps its own
/// `State<T>` extractor via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub auth: auth::AuthHandlerState,
    pub users: users::UserHandlerState,
    pub reports: reports::ReportHandlerState,
    pub exports: exports::ExportHandlerState,
}

impl FromRef<ApiState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<ApiState> for users::UserHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.users.clone()
    }
}

impl FromRef<ApiState> for reports::ReportHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.reports.clone()
    }
}

impl FromRef<ApiState> for exports::ExportHandlerState {
    fn from_ref(s: &ApiState) -> Self {
        s.exports.clone()
    }
}

impl ApiState {
    /// Wire repositories and services over one database connection.
    pub fn new(db: DatabaseConnection, config: &AppConfig, event_bus: SharedEventBus) -> Self {
        let user_repo = Arc::new(UserRepository::new(db.clone()));
        let session_repo = Arc::new(SessionRepository::new(db.clone()));
        let report_repo = Arc::new(ReportRepository::new(db));

        let sessions = Arc::new(SessionService::new(
            Arc::clone(&user_repo),
            session_repo,
            JwtConfig::from_security(&config.security),
            Duration::days(config.security.session_days),
            event_bus,
        ));
        let user_service = Arc::new(UserService::new(
            user_repo,
            config.auth.allow_public_signup,
        ));
        let report_service = Arc::new(ReportService::new(
            report_repo,
            config.reports.staff_roster.clone(),
        ));

        Self {
            auth: auth::AuthHandlerState {
                sessions: Arc::clone(&sessions),
                user_service: Arc::clone(&user_service),
                session: SessionState::new(sessions, &config.security, &config.auth),
            },
            users: users::UserHandlerState { user_service },
            reports: reports::ReportHandlerState {
                report_service: Arc::clone(&report_service),
            },
            exports: exports::ExportHandlerState {
                report_service,
                export_config: Arc::new(config.export.clone()),
            },
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Access token from /api/v1/auth/login; the session cookie is accepted too",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::signup,
        auth::refresh,
        auth::logout,
        auth::get_current_user,
        // Reports
        reports::list_reports,
        reports::get_report,
        reports::create_report,
        reports::update_report,
        reports::delete_report,
        reports::list_staff,
        // Dashboard
        dashboard::get_dashboard,
        // Export
        exports::export_xlsx,
        exports::export_pdf,
        // Users
        users::list_users,
        users::create_user,
        users::delete_user,
    ),
    components(
        schemas(
            ApiResponse<String>,
            auth::LoginRequest,
            auth::SignupRequest,
            auth::RefreshRequest,
            auth::SessionResponse,
            users::UserDto,
            users::UserListItemDto,
            users::CreateUserRequest,
            reports::ReportDto,
            reports::ReportRequest,
            reports::ReportListDto,
            reports::StaffRosterDto,
            dashboard::DashboardDto,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Login, sign-up, token refresh and logout"),
        (name = "Reports", description = "Broadcast shift reports (Laporan TD Penyiaran)"),
        (name = "Dashboard", description = "Report totals and recent entries"),
        (name = "Export", description = "Spreadsheet and PDF exports of the filtered report list"),
        (name = "Users", description = "User management (admin only)"),
    ),
    info(
        title = "Laporan TD Penyiaran API",
        version = "1.0.0",
        description = "Broadcast quality reporting for technical directors",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    config: &AppConfig,
    event_bus: SharedEventBus,
    metrics_handle: PrometheusHandle,
) -> Router {
    let api_state = ApiState::new(db.clone(), config, event_bus);
    let session_state = api_state.auth.session.clone();

    // Public auth routes
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/refresh", post(auth::refresh));

    // Session-protected routes; admin-only methods carry their own gate
    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::get_current_user))
        .route("/staff", get(reports::list_staff))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route(
            "/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route("/reports/export/xlsx", get(exports::export_xlsx))
        .route("/reports/export/pdf", get(exports::export_pdf))
        .route(
            "/reports/{id}",
            get(reports::get_report).merge(
                put(reports::update_report)
                    .delete(reports::delete_report)
                    .route_layer(middleware::from_fn(require_admin)),
            ),
        )
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .route_layer(middleware::from_fn(require_admin)),
        )
        .route(
            "/users/{id}",
            delete(users::delete_user).route_layer(middleware::from_fn(require_admin)),
        )
        .layer(middleware::from_fn_with_state(
            session_state,
            session_middleware,
        ));

    let api_routes = public_routes.merge(protected_routes).with_state(api_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState::new(db));

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: metrics_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
