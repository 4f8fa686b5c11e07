use axum::{extract::Path, http::StatusCode, Extension};
use uuid::Uuid;

use super::require_client_access;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// DELETE /api/clients/:id - delete a client and its dependent rows
/// (sessions and notes cascade in the database)
pub async fn client_delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    require_client_access(&pool, user.user_id, id).await?;

    sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
