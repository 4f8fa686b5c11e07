use axum::{response::Json, Extension};

use crate::access;
use crate::database::manager::DatabaseManager;
use crate::database::models::Client;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/clients - clients of every therapist the caller may view
pub async fn client_list(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let accessible = access::accessible_therapist_ids(&pool, user.user_id).await?;

    let clients = sqlx::query_as::<_, Client>(
        "SELECT id, therapist_id, first_name, last_name, email, phone, notes, \
                created_at, updated_at \
         FROM clients \
         WHERE therapist_id = ANY($1) \
         ORDER BY last_name, first_name",
    )
    .bind(&accessible)
    .fetch_all(&pool)
    .await?;

    Ok(Json(clients))
}
