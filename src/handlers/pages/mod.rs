//! Server-side loaders for the dashboard pages. Unlike the /api handlers
//! these authenticate from the session cookie and redirect unauthenticated
//! browsers to the login page instead of returning 401.

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use serde_json::json;

use crate::access;
use crate::database::manager::DatabaseManager;
use crate::database::models::{Client, TherapySession};
use crate::middleware::{authenticate, AuthUser};

const LOGIN_PATH: &str = "/login";

fn current_user(headers: &HeaderMap) -> Result<AuthUser, Redirect> {
    authenticate(headers).map_err(|_| Redirect::to(LOGIN_PATH))
}

/// Generic retry body for a failed page fetch; the page shell renders it as
/// a "something went wrong, try again" state.
fn load_failed(context: &str, err: impl std::fmt::Display) -> Response {
    tracing::error!("Failed to load {}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": true,
            "message": "Failed to load page data",
            "retry": true
        })),
    )
        .into_response()
}

/// GET /dashboard/clients - data for the client list page
pub async fn dashboard_clients(headers: HeaderMap) -> Response {
    let user = match current_user(&headers) {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    let result = async {
        let pool = DatabaseManager::pool().await?;
        let accessible = access::accessible_therapist_ids(&pool, user.user_id).await?;

        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, therapist_id, first_name, last_name, email, phone, notes, \
                    created_at, updated_at \
             FROM clients \
             WHERE therapist_id = ANY($1) \
             ORDER BY last_name, first_name",
        )
        .bind(&accessible)
        .fetch_all(&pool)
        .await?;

        Ok::<_, anyhow::Error>(clients)
    }
    .await;

    match result {
        Ok(clients) => Json(json!({ "clients": clients })).into_response(),
        Err(e) => load_failed("clients page", e),
    }
}

/// GET /dashboard/sessions - upcoming sessions for the schedule page
pub async fn dashboard_sessions(headers: HeaderMap) -> Response {
    let user = match current_user(&headers) {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    let result = async {
        let pool = DatabaseManager::pool().await?;
        let accessible = access::accessible_therapist_ids(&pool, user.user_id).await?;

        let sessions = sqlx::query_as::<_, TherapySession>(
            "SELECT id, client_id, therapist_id, scheduled_at, duration_minutes, status, \
                    created_at, updated_at \
             FROM therapy_sessions \
             WHERE therapist_id = ANY($1) AND scheduled_at >= now() \
             ORDER BY scheduled_at",
        )
        .bind(&accessible)
        .fetch_all(&pool)
        .await?;

        Ok::<_, anyhow::Error>(sessions)
    }
    .await;

    match result {
        Ok(sessions) => Json(json!({ "sessions": sessions })).into_response(),
        Err(e) => load_failed("sessions page", e),
    }
}
