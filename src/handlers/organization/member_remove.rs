use axum::{response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::OrganizationService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberRequest {
    pub member_id: Uuid,
}

/// POST /api/organization/members/remove - forward to the
/// `remove_organization_member` procedure. Authorization (who may remove
/// whom) is enforced inside the database; a raised error is relayed verbatim.
pub async fn member_remove(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RemoveMemberRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = OrganizationService::new().await?;
    service
        .remove_member(payload.member_id, user.user_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
