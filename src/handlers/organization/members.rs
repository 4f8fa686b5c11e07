use axum::{response::Json, Extension};

use super::require_org_context;
use crate::database::models::OrganizationMember;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::OrganizationService;

/// GET /api/organization/members - active members of the caller's organization
pub async fn member_list(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<OrganizationMember>>, ApiError> {
    let (_context, organization_id) = require_org_context(user.user_id).await?;

    let service = OrganizationService::new().await?;
    let members = service.list_members(organization_id).await?;

    Ok(Json(members))
}
