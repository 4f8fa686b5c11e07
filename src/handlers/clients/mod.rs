pub mod check_access;
pub mod create;
pub mod list;
pub mod remove;
pub mod show;
pub mod update;

pub use check_access::client_check_access;
pub use create::client_create;
pub use list::client_list;
pub use remove::client_delete;
pub use show::client_get;
pub use update::client_update;

use sqlx::PgPool;
use uuid::Uuid;

use crate::access;
use crate::error::ApiError;

/// Shared gate: 404 when the client does not exist, 403 when it exists but
/// its therapist is outside the caller's accessible set.
pub(crate) async fn require_client_access(
    pool: &PgPool,
    user_id: Uuid,
    client_id: Uuid,
) -> Result<(), ApiError> {
    if access::can_access_client(pool, user_id, client_id).await? {
        Ok(())
    } else {
        Err(ApiError::forbidden("You do not have access to this client"))
    }
}
