use axum::{extract::Path, http::StatusCode, Extension};
use uuid::Uuid;

use super::require_session_access;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// DELETE /api/sessions/:id - delete a session (notes cascade)
pub async fn session_delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    require_session_access(&pool, user.user_id, id).await?;

    sqlx::query("DELETE FROM therapy_sessions WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
