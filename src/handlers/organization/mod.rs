pub mod invitation_accept;
pub mod invitation_create;
pub mod member_remove;
pub mod member_role;
pub mod members;

pub use invitation_accept::invitation_accept;
pub use invitation_create::invitation_create;
pub use member_remove::member_remove;
pub use member_role::member_update_role;
pub use members::member_list;

use uuid::Uuid;

use crate::access::{self, OrgContext};
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;

/// Resolve the caller's organization or 403. Membership operations are
/// meaningless for solo users.
pub(crate) async fn require_org_context(user_id: Uuid) -> Result<(OrgContext, Uuid), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let context = access::user_org_context(&pool, user_id).await?;

    match context.organization_id {
        Some(organization_id) => Ok((context, organization_id)),
        None => Err(ApiError::forbidden("Not a member of any organization")),
    }
}
