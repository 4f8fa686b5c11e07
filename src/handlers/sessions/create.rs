use axum::{http::StatusCode, response::Json, Extension};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::TherapySession;
use crate::error::ApiError;
use crate::handlers::clients::require_client_access;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub client_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: Option<String>,
}

/// POST /api/sessions - schedule a session for a client. The session is
/// owned by the client's therapist, not necessarily the caller.
pub async fn session_create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<TherapySession>), ApiError> {
    if payload.duration_minutes <= 0 {
        return Err(ApiError::bad_request("duration_minutes must be positive"));
    }

    let pool = DatabaseManager::pool().await?;
    require_client_access(&pool, user.user_id, payload.client_id).await?;

    let session = sqlx::query_as::<_, TherapySession>(
        "INSERT INTO therapy_sessions (client_id, therapist_id, scheduled_at, duration_minutes, status) \
         SELECT c.id, c.therapist_id, $2, $3, $4 FROM clients c WHERE c.id = $1 \
         RETURNING id, client_id, therapist_id, scheduled_at, duration_minutes, status, \
                   created_at, updated_at",
    )
    .bind(payload.client_id)
    .bind(payload.scheduled_at)
    .bind(payload.duration_minutes)
    .bind(payload.status.as_deref().unwrap_or("scheduled"))
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(session)))
}
