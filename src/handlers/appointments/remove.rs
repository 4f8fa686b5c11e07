use axum::{extract::Path, http::StatusCode, Extension};
use uuid::Uuid;

use super::require_appointment_access;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// DELETE /api/appointments/:id - cancel and remove an appointment
pub async fn appointment_delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    require_appointment_access(&pool, user.user_id, id).await?;

    sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
