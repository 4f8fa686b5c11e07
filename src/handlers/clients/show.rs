use axum::{extract::Path, response::Json, Extension};
use uuid::Uuid;

use super::require_client_access;
use crate::database::manager::DatabaseManager;
use crate::database::models::Client;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/clients/:id - show a single client
pub async fn client_get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    require_client_access(&pool, user.user_id, id).await?;

    let client = sqlx::query_as::<_, Client>(
        "SELECT id, therapist_id, first_name, last_name, email, phone, notes, \
                created_at, updated_at \
         FROM clients WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await?;

    Ok(Json(client))
}
