use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::middleware::AuthUser;

/// GET /api/auth/whoami - echo the authenticated user from the token
pub async fn whoami(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "id": user.user_id,
        "email": user.email,
    }))
}
