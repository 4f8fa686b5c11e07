use axum::{extract::Path, response::Json, Extension};
use serde::Deserialize;
use uuid::Uuid;

use super::require_client_access;
use crate::database::manager::DatabaseManager;
use crate::database::models::Client;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Partial update; omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateClientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// PUT /api/clients/:id - update a client
pub async fn client_update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<Client>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    require_client_access(&pool, user.user_id, id).await?;

    let client = sqlx::query_as::<_, Client>(
        "UPDATE clients SET \
            first_name = COALESCE($2, first_name), \
            last_name  = COALESCE($3, last_name), \
            email      = COALESCE($4, email), \
            phone      = COALESCE($5, phone), \
            notes      = COALESCE($6, notes), \
            updated_at = now() \
         WHERE id = $1 \
         RETURNING id, therapist_id, first_name, last_name, email, phone, notes, \
                   created_at, updated_at",
    )
    .bind(id)
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.notes)
    .fetch_one(&pool)
    .await?;

    Ok(Json(client))
}
