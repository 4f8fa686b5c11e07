use axum::{http::StatusCode, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{OrganizationError, OrganizationService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationRequest {
    pub invitation_id: Uuid,
}

/// POST /api/invitations/accept - accept a pending invitation for the
/// caller. An invalid or already-accepted invitation comes back as a clean
/// 400 {"success": false, "error"} with the procedure's message, never as an
/// unhandled error.
pub async fn invitation_accept(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<AcceptInvitationRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let service = OrganizationService::new().await?;
    let outcome = service
        .accept_invitation(payload.invitation_id, user.user_id)
        .await;

    accept_response(outcome)
}

/// Map the procedure outcome to the wire shape. Only a clean rejection gets
/// the {"success": false} body; raised errors keep the usual error envelope.
fn accept_response(
    outcome: Result<(), OrganizationError>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    match outcome {
        Ok(()) => Ok((StatusCode::OK, Json(json!({ "success": true })))),
        Err(OrganizationError::Rejected(message)) => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": message })),
        )),
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_invitation_reports_success() {
        let (status, Json(body)) = accept_response(Ok(())).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    #[test]
    fn test_rejected_invitation_is_clean_400_with_message() {
        let outcome = Err(OrganizationError::Rejected(
            "Invitation has already been accepted".to_string(),
        ));
        let (status, Json(body)) = accept_response(outcome).unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invitation has already been accepted");
    }

    #[test]
    fn test_raised_error_propagates_as_api_error() {
        let outcome = Err(OrganizationError::Database(sqlx::Error::PoolTimedOut));
        let err = accept_response(outcome).unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
