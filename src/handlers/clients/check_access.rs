use axum::{extract::Path, response::Json, Extension};
use serde_json::{json, Value};
use uuid::Uuid;

use super::require_client_access;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/clients/:id/check-access - can the caller view this client?
/// 200 {"hasAccess": true} when visible, 403 otherwise, 404 for unknown ids.
pub async fn client_check_access(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    require_client_access(&pool, user.user_id, id).await?;

    Ok(Json(json!({ "hasAccess": true })))
}
