use axum::{response::Json, Extension};

use crate::access;
use crate::database::manager::DatabaseManager;
use crate::database::models::Appointment;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/appointments - upcoming first
pub async fn appointment_list(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let accessible = access::accessible_therapist_ids(&pool, user.user_id).await?;

    let appointments = sqlx::query_as::<_, Appointment>(
        "SELECT id, client_id, therapist_id, starts_at, ends_at, status, location, \
                created_at, updated_at \
         FROM appointments \
         WHERE therapist_id = ANY($1) \
         ORDER BY starts_at",
    )
    .bind(&accessible)
    .fetch_all(&pool)
    .await?;

    Ok(Json(appointments))
}
