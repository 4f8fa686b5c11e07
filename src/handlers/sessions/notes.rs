use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use serde::Deserialize;
use uuid::Uuid;

use super::require_session_access;
use crate::database::manager::DatabaseManager;
use crate::database::models::SessionNote;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub content: String,
}

/// POST /api/sessions/:id/notes - append a note to a session
pub async fn session_note_create(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<SessionNote>), ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::bad_request("content is required"));
    }

    let pool = DatabaseManager::pool().await?;
    require_session_access(&pool, user.user_id, id).await?;

    let note = sqlx::query_as::<_, SessionNote>(
        "INSERT INTO session_notes (session_id, author_id, content) \
         VALUES ($1, $2, $3) \
         RETURNING id, session_id, author_id, content, created_at",
    )
    .bind(id)
    .bind(user.user_id)
    .bind(payload.content.trim())
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(note)))
}
