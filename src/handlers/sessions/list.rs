use axum::{response::Json, Extension};

use crate::access;
use crate::database::manager::DatabaseManager;
use crate::database::models::TherapySession;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/sessions - sessions of every therapist the caller may view,
/// most recent first
pub async fn session_list(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<TherapySession>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let accessible = access::accessible_therapist_ids(&pool, user.user_id).await?;

    let sessions = sqlx::query_as::<_, TherapySession>(
        "SELECT id, client_id, therapist_id, scheduled_at, duration_minutes, status, \
                created_at, updated_at \
         FROM therapy_sessions \
         WHERE therapist_id = ANY($1) \
         ORDER BY scheduled_at DESC",
    )
    .bind(&accessible)
    .fetch_all(&pool)
    .await?;

    Ok(Json(sessions))
}
