use axum::{extract::Path, response::Json, Extension};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::require_appointment_access;
use crate::database::manager::DatabaseManager;
use crate::database::models::Appointment;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Partial update; omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub location: Option<String>,
}

/// PUT /api/appointments/:id - reschedule or restate an appointment
pub async fn appointment_update(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    if let (Some(starts), Some(ends)) = (payload.starts_at, payload.ends_at) {
        if ends <= starts {
            return Err(ApiError::bad_request("ends_at must be after starts_at"));
        }
    }

    let pool = DatabaseManager::pool().await?;
    require_appointment_access(&pool, user.user_id, id).await?;

    let appointment = sqlx::query_as::<_, Appointment>(
        "UPDATE appointments SET \
            starts_at  = COALESCE($2, starts_at), \
            ends_at    = COALESCE($3, ends_at), \
            status     = COALESCE($4, status), \
            location   = COALESCE($5, location), \
            updated_at = now() \
         WHERE id = $1 \
         RETURNING id, client_id, therapist_id, starts_at, ends_at, status, location, \
                   created_at, updated_at",
    )
    .bind(id)
    .bind(payload.starts_at)
    .bind(payload.ends_at)
    .bind(&payload.status)
    .bind(&payload.location)
    .fetch_one(&pool)
    .await?;

    Ok(Json(appointment))
}
