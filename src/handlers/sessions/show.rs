use axum::{extract::Path, response::Json, Extension};
use serde::Serialize;
use uuid::Uuid;

use super::require_session_access;
use crate::database::manager::DatabaseManager;
use crate::database::models::{Client, SessionNote, TherapySession};
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Session joined with its client and notes
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: TherapySession,
    pub client: Client,
    pub notes: Vec<SessionNote>,
}

/// GET /api/sessions/:id - session with joined client and notes
pub async fn session_get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionDetail>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    require_session_access(&pool, user.user_id, id).await?;

    let session = sqlx::query_as::<_, TherapySession>(
        "SELECT id, client_id, therapist_id, scheduled_at, duration_minutes, status, \
                created_at, updated_at \
         FROM therapy_sessions WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await?;

    let client = sqlx::query_as::<_, Client>(
        "SELECT id, therapist_id, first_name, last_name, email, phone, notes, \
                created_at, updated_at \
         FROM clients WHERE id = $1",
    )
    .bind(session.client_id)
    .fetch_one(&pool)
    .await?;

    let notes = sqlx::query_as::<_, SessionNote>(
        "SELECT id, session_id, author_id, content, created_at \
         FROM session_notes WHERE session_id = $1 \
         ORDER BY created_at",
    )
    .bind(id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(SessionDetail {
        session,
        client,
        notes,
    }))
}
