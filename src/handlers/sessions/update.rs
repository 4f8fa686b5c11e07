use axum::{extract::Path, response::Json, Extension};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::require_session_access;
use crate::database::manager::DatabaseManager;
use crate::database::models::TherapySession;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Partial update; omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
}

/// PUT /api/sessions/:id - reschedule or restate a session
pub async fn session_update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<Json<TherapySession>, ApiError> {
    if matches!(payload.duration_minutes, Some(d) if d <= 0) {
        return Err(ApiError::bad_request("duration_minutes must be positive"));
    }

    let pool = DatabaseManager::pool().await?;
    require_session_access(&pool, user.user_id, id).await?;

    let session = sqlx::query_as::<_, TherapySession>(
        "UPDATE therapy_sessions SET \
            scheduled_at     = COALESCE($2, scheduled_at), \
            duration_minutes = COALESCE($3, duration_minutes), \
            status           = COALESCE($4, status), \
            updated_at       = now() \
         WHERE id = $1 \
         RETURNING id, client_id, therapist_id, scheduled_at, duration_minutes, status, \
                   created_at, updated_at",
    )
    .bind(id)
    .bind(payload.scheduled_at)
    .bind(payload.duration_minutes)
    .bind(&payload.status)
    .fetch_one(&pool)
    .await?;

    Ok(Json(session))
}
