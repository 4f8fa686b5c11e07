use axum::{response::Json, Extension};

use crate::access::{self, OrgContext};
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/check-permissions - the caller's organization context.
/// A user outside any organization gets the solo context, not an error.
pub async fn check_permissions(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<OrgContext>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let context = access::user_org_context(&pool, user.user_id).await?;
    Ok(Json(context))
}
