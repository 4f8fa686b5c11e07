use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{OrganizationInvitation, OrganizationMember};

/// Errors from organization operations. The stored procedures own the real
/// authorization and transition logic; this service only classifies their
/// outcomes.
#[derive(Debug, Error)]
pub enum OrganizationError {
    /// The procedure raised; message comes back through sqlx verbatim
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),

    /// The procedure completed and reported failure, e.g. an invitation that
    /// was already accepted
    #[error("{0}")]
    Rejected(String),

    #[error("Malformed RPC result: {0}")]
    MalformedResult(String),
}

pub struct OrganizationService {
    pool: PgPool,
}

impl OrganizationService {
    pub async fn new() -> Result<Self, OrganizationError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// List active members of the given organization
    pub async fn list_members(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<OrganizationMember>, OrganizationError> {
        let members = sqlx::query_as::<_, OrganizationMember>(
            "SELECT id, organization_id, user_id, role, status, created_at \
             FROM organization_members \
             WHERE organization_id = $1 AND status = 'active' \
             ORDER BY created_at",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Accept a pending invitation on behalf of the caller. The stored
    /// procedure performs the membership insert and invitation transition
    /// atomically.
    pub async fn accept_invitation(
        &self,
        invitation_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), OrganizationError> {
        self.call_procedure(
            "SELECT accept_organization_invitation($1, $2)",
            &[invitation_id, user_id],
        )
        .await
    }

    /// Remove a member. Whether the caller may remove this member is decided
    /// inside the database.
    pub async fn remove_member(
        &self,
        member_id: Uuid,
        caller_id: Uuid,
    ) -> Result<(), OrganizationError> {
        self.call_procedure(
            "SELECT remove_organization_member($1, $2)",
            &[member_id, caller_id],
        )
        .await
    }

    /// Change a member's role. Role hierarchy rules live in the database.
    pub async fn update_member_role(
        &self,
        member_id: Uuid,
        role: &str,
        caller_id: Uuid,
    ) -> Result<(), OrganizationError> {
        let result: Value = sqlx::query_scalar("SELECT update_member_role($1, $2, $3)")
            .bind(member_id)
            .bind(role)
            .bind(caller_id)
            .fetch_one(&self.pool)
            .await?;

        Self::classify_result(result)
    }

    /// Create a pending invitation. Unlike the transitions above this is a
    /// plain insert; the acceptance side is the transactional part.
    pub async fn create_invitation(
        &self,
        organization_id: Uuid,
        email: &str,
        role: &str,
        invited_by: Uuid,
    ) -> Result<OrganizationInvitation, OrganizationError> {
        let invitation = sqlx::query_as::<_, OrganizationInvitation>(
            "INSERT INTO organization_invitations (organization_id, email, role, status, invited_by) \
             VALUES ($1, $2, $3, 'pending', $4) \
             RETURNING id, organization_id, email, role, status, invited_by, created_at",
        )
        .bind(organization_id)
        .bind(email)
        .bind(role)
        .bind(invited_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(invitation)
    }

    /// Run a two-uuid-argument procedure and classify its jsonb result
    async fn call_procedure(&self, sql: &str, args: &[Uuid; 2]) -> Result<(), OrganizationError> {
        let result: Value = sqlx::query_scalar(sql)
            .bind(args[0])
            .bind(args[1])
            .fetch_one(&self.pool)
            .await?;

        Self::classify_result(result)
    }

    /// The procedures return jsonb of the form {"success": bool, "error"?: text}
    fn classify_result(result: Value) -> Result<(), OrganizationError> {
        match result.get("success").and_then(Value::as_bool) {
            Some(true) => Ok(()),
            Some(false) => {
                let message = result
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("Operation rejected")
                    .to_string();
                Err(OrganizationError::Rejected(message))
            }
            None => Err(OrganizationError::MalformedResult(result.to_string())),
        }
    }
}
