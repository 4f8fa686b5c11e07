pub mod create;
pub mod list;
pub mod remove;
pub mod update;

pub use create::appointment_create;
pub use list::appointment_list;
pub use remove::appointment_delete;
pub use update::appointment_update;

use sqlx::PgPool;
use uuid::Uuid;

use crate::access;
use crate::error::ApiError;

/// Fetch the appointment's owning therapist and gate on the accessible set.
pub(crate) async fn require_appointment_access(
    pool: &PgPool,
    user_id: Uuid,
    appointment_id: Uuid,
) -> Result<(), ApiError> {
    let therapist_id: Option<Uuid> =
        sqlx::query_scalar("SELECT therapist_id FROM appointments WHERE id = $1")
            .bind(appointment_id)
            .fetch_optional(pool)
            .await?;

    let therapist_id =
        therapist_id.ok_or_else(|| ApiError::not_found("Appointment not found"))?;

    let accessible = access::accessible_therapist_ids(pool, user_id).await?;
    if accessible.contains(&therapist_id) {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "You do not have access to this appointment",
        ))
    }
}
