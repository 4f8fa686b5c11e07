use axum::{http::StatusCode, response::Json, Extension};
use serde::Deserialize;

use super::require_org_context;
use crate::database::models::OrganizationInvitation;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::OrganizationService;

#[derive(Debug, Deserialize)]
pub struct CreateInvitationRequest {
    pub email: String,
    pub role: Option<String>,
}

/// POST /api/organization/invitations - invite someone into the caller's
/// organization. Only elevated members may invite.
pub async fn invitation_create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<OrganizationInvitation>), ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    let (context, organization_id) = require_org_context(user.user_id).await?;
    if !context.is_elevated() {
        return Err(ApiError::forbidden(
            "Only organization admins can send invitations",
        ));
    }

    let service = OrganizationService::new().await?;
    let invitation = service
        .create_invitation(
            organization_id,
            payload.email.trim(),
            payload.role.as_deref().unwrap_or("member"),
            user.user_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(invitation)))
}
