// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use sqlx::error::DatabaseError as _;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error (message sanitized, real cause logged)
    InternalServerError(String),

    // 500 Upstream database/RPC failure (message relayed verbatim)
    Upstream(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::Upstream(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::Upstream(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// Relay an upstream database error message verbatim. The stored
    /// procedures own the real authorization logic, so their messages are the
    /// only useful diagnostic the client can get.
    pub fn upstream(message: impl Into<String>) -> Self {
        ApiError::Upstream(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            crate::database::manager::DatabaseError::ConfigMissing(_)
            | crate::database::manager::DatabaseError::InvalidDatabaseUrl => {
                ApiError::service_unavailable("Database not configured")
            }
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::not_found("Record not found"),
            other => {
                // Don't expose internal SQL errors on ordinary reads/writes
                tracing::error!("Database query error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::organization_service::OrganizationError> for ApiError {
    fn from(err: crate::services::organization_service::OrganizationError) -> Self {
        use crate::services::organization_service::OrganizationError;
        match err {
            // Procedure reported a clean failure, e.g. invalid invitation
            OrganizationError::Rejected(msg) => ApiError::bad_request(msg),
            // Procedure raised: relay its message as-is, without the sqlx
            // "error returned from database:" prefix
            OrganizationError::Database(sqlx::Error::Database(db_err)) => {
                ApiError::upstream(db_err.message().to_string())
            }
            OrganizationError::Database(sqlx_err) => ApiError::upstream(sqlx_err.to_string()),
            OrganizationError::DatabaseManager(e) => e.into(),
            OrganizationError::MalformedResult(msg) => {
                tracing::error!("Malformed RPC result: {}", msg);
                ApiError::internal_server_error("Unexpected database response")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::unauthorized("no token").status_code(), 401);
        assert_eq!(ApiError::forbidden("not yours").status_code(), 403);
        assert_eq!(ApiError::not_found("gone").status_code(), 404);
        assert_eq!(ApiError::upstream("raise exception").status_code(), 500);
        assert_eq!(ApiError::service_unavailable("down").status_code(), 503);
    }

    #[test]
    fn test_upstream_message_relayed_verbatim() {
        // The exact procedure message, no sqlx prefix wrapped around it
        let msg = "only owners can remove members";
        let err = ApiError::upstream(msg);
        assert_eq!(err.message(), msg);
        let body = err.to_json();
        assert_eq!(body["message"], msg);
        assert_eq!(body["code"], "UPSTREAM_ERROR");
        assert_eq!(body["error"], true);
    }

    #[test]
    fn test_raised_procedure_error_becomes_upstream_500() {
        use crate::services::organization_service::OrganizationError;

        // Non-database sqlx errors also surface as upstream, not sanitized
        let err: ApiError = OrganizationError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "UPSTREAM_ERROR");
    }

    #[test]
    fn test_rejected_procedure_outcome_is_bad_request() {
        use crate::services::organization_service::OrganizationError;

        let err: ApiError =
            OrganizationError::Rejected("Invitation has already been accepted".to_string()).into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invitation has already been accepted");
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status_code(), 404);
    }
}
