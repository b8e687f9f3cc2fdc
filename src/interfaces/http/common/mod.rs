//! Shared HTTP building blocks: the response envelope, domain error
//! mapping and the validating JSON extractor.

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::ValidatedJson;

/// Standard API envelope.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "message"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler error half: status plus an error envelope.
pub type ApiError<T = ()> = (StatusCode, Json<ApiResponse<T>>);

/// Map a domain error to its HTTP status and user-facing message.
pub fn domain_error<T>(e: DomainError) -> ApiError<T> {
    let (status, message) = match e {
        DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        DomainError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        e @ DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        e @ DomainError::Storage(_) => {
            tracing::error!(error = %e, "Storage failure while handling request");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_omits_data_payload() {
        let body = serde_json::to_value(ApiResponse::<()>::error("gagal")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "gagal");
        assert!(body["data"].is_null());

        let body = serde_json::to_value(ApiResponse::success(3)).unwrap();
        assert_eq!(body["data"], 3);
        assert!(body.get("error").is_none());
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (DomainError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::not_found("User", "1"), StatusCode::NOT_FOUND),
            (DomainError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            let (got, _) = domain_error::<()>(error);
            assert_eq!(got, status);
        }
    }

    #[test]
    fn user_facing_messages_are_not_prefixed() {
        let (_, Json(body)) =
            domain_error::<()>(DomainError::Forbidden("Tidak dapat menghapus akun sendiri".into()));
        assert_eq!(body.error.as_deref(), Some("Tidak dapat menghapus akun sendiri"));
    }
}
