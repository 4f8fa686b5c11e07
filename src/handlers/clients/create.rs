use axum::{http::StatusCode, response::Json, Extension};
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::Client;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// POST /api/clients - create a client owned by the caller
pub async fn client_create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(ApiError::bad_request("first_name and last_name are required"));
    }

    let pool = DatabaseManager::pool().await?;

    let client = sqlx::query_as::<_, Client>(
        "INSERT INTO clients (therapist_id, first_name, last_name, email, phone, notes) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, therapist_id, first_name, last_name, email, phone, notes, \
                   created_at, updated_at",
    )
    .bind(user.user_id)
    .bind(payload.first_name.trim())
    .bind(payload.last_name.trim())
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.notes)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(client)))
}
