//! Access resolution: which therapist records can a user see?
//!
//! A user always sees their own records. Members of an organization with an
//! elevated role additionally see the records of every active member of the
//! same organization. The role hierarchy itself is owned by the database
//! (the stored procedures enforce it on writes); on the read side we only
//! recognize the roles the membership table is known to carry and treat
//! anything else as non-elevated.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// Organization role as stored on the membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Owner,
    Admin,
    Member,
}

impl OrgRole {
    /// Parse the role column. Unknown values degrade to Member so a new
    /// database-side role never silently widens visibility.
    pub fn parse(raw: &str) -> OrgRole {
        match raw {
            "owner" => OrgRole::Owner,
            "admin" => OrgRole::Admin,
            _ => OrgRole::Member,
        }
    }

    /// Elevated roles see every therapist in their organization
    pub fn is_elevated(self) -> bool {
        matches!(self, OrgRole::Owner | OrgRole::Admin)
    }
}

/// A user's organization membership, or lack of one. Absence of a membership
/// row is a normal state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgContext {
    pub role: Option<OrgRole>,
    pub organization_id: Option<Uuid>,
    pub is_in_organization: bool,
}

impl OrgContext {
    pub fn solo() -> Self {
        Self {
            role: None,
            organization_id: None,
            is_in_organization: false,
        }
    }

    fn member_of(organization_id: Uuid, role: OrgRole) -> Self {
        Self {
            role: Some(role),
            organization_id: Some(organization_id),
            is_in_organization: true,
        }
    }

    pub fn is_elevated(&self) -> bool {
        self.role.map(OrgRole::is_elevated).unwrap_or(false)
    }
}

/// Resolve the user's active organization membership. A user belongs to at
/// most one organization; invited-but-unaccepted rows do not count.
pub async fn user_org_context(pool: &PgPool, user_id: Uuid) -> Result<OrgContext, DatabaseError> {
    let row: Option<(Uuid, String)> = sqlx::query_as(
        "SELECT organization_id, role FROM organization_members \
         WHERE user_id = $1 AND status = 'active' \
         LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(match row {
        Some((organization_id, role)) => {
            OrgContext::member_of(organization_id, OrgRole::parse(&role))
        }
        None => OrgContext::solo(),
    })
}

/// The set of therapist ids whose clients and sessions `user_id` may view.
/// Fresh lookup on every call; no caching.
pub async fn accessible_therapist_ids(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Uuid>, DatabaseError> {
    let context = user_org_context(pool, user_id).await?;

    let org_member_ids: Vec<Uuid> = match (context.is_elevated(), context.organization_id) {
        (true, Some(organization_id)) => {
            sqlx::query_scalar(
                "SELECT user_id FROM organization_members \
                 WHERE organization_id = $1 AND status = 'active'",
            )
            .bind(organization_id)
            .fetch_all(pool)
            .await?
        }
        _ => Vec::new(),
    };

    Ok(expand_accessible_ids(user_id, &context, org_member_ids))
}

/// Pure core of the resolver: given the caller's context and the active
/// member ids of their organization, produce the accessible set. The caller
/// is always included exactly once.
pub fn expand_accessible_ids(
    user_id: Uuid,
    context: &OrgContext,
    org_member_ids: Vec<Uuid>,
) -> Vec<Uuid> {
    if !context.is_elevated() {
        return vec![user_id];
    }

    let mut ids = org_member_ids;
    if !ids.contains(&user_id) {
        ids.push(user_id);
    }
    ids
}

/// Can the user view the given client? NotFound when the client id does not
/// exist at all, so handlers can distinguish 404 from 403.
pub async fn can_access_client(
    pool: &PgPool,
    user_id: Uuid,
    client_id: Uuid,
) -> Result<bool, DatabaseError> {
    let therapist_id: Option<Uuid> =
        sqlx::query_scalar("SELECT therapist_id FROM clients WHERE id = $1")
            .bind(client_id)
            .fetch_optional(pool)
            .await?;

    let therapist_id = therapist_id
        .ok_or_else(|| DatabaseError::NotFound(format!("Client {} not found", client_id)))?;

    let accessible = accessible_therapist_ids(pool, user_id).await?;
    Ok(accessible.contains(&therapist_id))
}

/// Can the user view the given session? Resolved through the session's
/// owning therapist, same rule as clients.
pub async fn can_access_session(
    pool: &PgPool,
    user_id: Uuid,
    session_id: Uuid,
) -> Result<bool, DatabaseError> {
    let therapist_id: Option<Uuid> =
        sqlx::query_scalar("SELECT therapist_id FROM therapy_sessions WHERE id = $1")
            .bind(session_id)
            .fetch_optional(pool)
            .await?;

    let therapist_id = therapist_id
        .ok_or_else(|| DatabaseError::NotFound(format!("Session {} not found", session_id)))?;

    let accessible = accessible_therapist_ids(pool, user_id).await?;
    Ok(accessible.contains(&therapist_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(OrgRole::parse("owner"), OrgRole::Owner);
        assert_eq!(OrgRole::parse("admin"), OrgRole::Admin);
        assert_eq!(OrgRole::parse("member"), OrgRole::Member);
        // Unknown roles never widen visibility
        assert_eq!(OrgRole::parse("superuser"), OrgRole::Member);
        assert_eq!(OrgRole::parse(""), OrgRole::Member);
    }

    #[test]
    fn test_elevation() {
        assert!(OrgRole::Owner.is_elevated());
        assert!(OrgRole::Admin.is_elevated());
        assert!(!OrgRole::Member.is_elevated());
    }

    #[test]
    fn test_solo_user_sees_only_self() {
        let user = uid(1);
        let ids = expand_accessible_ids(user, &OrgContext::solo(), vec![]);
        assert_eq!(ids, vec![user]);
    }

    #[test]
    fn test_plain_member_sees_only_self() {
        let user = uid(1);
        let context = OrgContext::member_of(uid(99), OrgRole::Member);
        // Member list would only be fetched for elevated roles, but even if
        // handed one the expansion must ignore it
        let ids = expand_accessible_ids(user, &context, vec![uid(2), uid(3)]);
        assert_eq!(ids, vec![user]);
    }

    #[test]
    fn test_admin_sees_all_active_members() {
        let user = uid(1);
        let context = OrgContext::member_of(uid(99), OrgRole::Admin);
        let ids = expand_accessible_ids(user, &context, vec![uid(1), uid(2), uid(3)]);
        assert_eq!(ids, vec![uid(1), uid(2), uid(3)]);
    }

    #[test]
    fn test_owner_always_included_in_own_set() {
        // A membership listing that misses the caller must not drop self-access
        let user = uid(7);
        let context = OrgContext::member_of(uid(99), OrgRole::Owner);
        let ids = expand_accessible_ids(user, &context, vec![uid(2), uid(3)]);
        assert!(ids.contains(&user));
        assert_eq!(ids.iter().filter(|id| **id == user).count(), 1);
    }

    #[test]
    fn test_solo_context_shape() {
        let context = OrgContext::solo();
        assert!(!context.is_in_organization);
        assert!(context.role.is_none());
        assert!(context.organization_id.is_none());
        assert!(!context.is_elevated());
    }

    #[test]
    fn test_context_serializes_camel_case() {
        let context = OrgContext::member_of(uid(99), OrgRole::Admin);
        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(value["role"], "admin");
        assert_eq!(value["isInOrganization"], true);
        assert!(value["organizationId"].is_string());
    }
}
