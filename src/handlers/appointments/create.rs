use axum::{http::StatusCode, response::Json, Extension};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::Appointment;
use crate::error::ApiError;
use crate::handlers::clients::require_client_access;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub location: Option<String>,
    pub status: Option<String>,
}

/// POST /api/appointments - book an appointment for a client. Owned by the
/// client's therapist, same rule as sessions.
pub async fn appointment_create(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    if payload.ends_at <= payload.starts_at {
        return Err(ApiError::bad_request("ends_at must be after starts_at"));
    }

    let pool = DatabaseManager::pool().await?;
    require_client_access(&pool, user.user_id, payload.client_id).await?;

    let appointment = sqlx::query_as::<_, Appointment>(
        "INSERT INTO appointments (client_id, therapist_id, starts_at, ends_at, status, location) \
         SELECT c.id, c.therapist_id, $2, $3, $4, $5 FROM clients c WHERE c.id = $1 \
         RETURNING id, client_id, therapist_id, starts_at, ends_at, status, location, \
                   created_at, updated_at",
    )
    .bind(payload.client_id)
    .bind(payload.starts_at)
    .bind(payload.ends_at)
    .bind(payload.status.as_deref().unwrap_or("scheduled"))
    .bind(&payload.location)
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}
