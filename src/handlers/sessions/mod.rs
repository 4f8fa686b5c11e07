pub mod create;
pub mod list;
pub mod notes;
pub mod remove;
pub mod show;
pub mod update;

pub use create::session_create;
pub use list::session_list;
pub use notes::session_note_create;
pub use remove::session_delete;
pub use show::session_get;
pub use update::session_update;

use sqlx::PgPool;
use uuid::Uuid;

use crate::access;
use crate::error::ApiError;

/// Shared gate mirroring the clients group: 404 for unknown sessions, 403
/// when the owning therapist is outside the caller's accessible set.
pub(crate) async fn require_session_access(
    pool: &PgPool,
    user_id: Uuid,
    session_id: Uuid,
) -> Result<(), ApiError> {
    if access::can_access_session(pool, user_id, session_id).await? {
        Ok(())
    } else {
        Err(ApiError::forbidden("You do not have access to this session"))
    }
}
