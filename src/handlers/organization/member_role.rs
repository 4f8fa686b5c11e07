use axum::{response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::OrganizationService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub member_id: Uuid,
    pub role: String,
}

/// POST /api/organization/members/update-role - forward to the
/// `update_member_role` procedure. The role string is passed through as-is;
/// the database owns the set of valid roles and the transition rules.
pub async fn member_update_role(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.role.trim().is_empty() {
        return Err(ApiError::bad_request("role is required"));
    }

    let service = OrganizationService::new().await?;
    service
        .update_member_role(payload.member_id, payload.role.trim(), user.user_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
