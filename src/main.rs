use axum::{
    extract::DefaultBodyLimit, http::HeaderValue, middleware as axum_middleware, routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use practice_api::{config, database::manager::DatabaseManager, handlers, middleware};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "practice_api=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting practice API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PRACTICE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Practice API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let api_config = &config::config().api;

    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Dashboard page loaders (cookie auth, redirect on missing session)
        .merge(page_routes())
        // Protected API behind JWT middleware
        .merge(api_routes().route_layer(axum_middleware::from_fn(middleware::jwt_auth_middleware)))
        // Global middleware
        .layer(DefaultBodyLimit::max(api_config.max_request_size_bytes))
        .layer(cors_layer());

    if api_config.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn api_routes() -> Router {
    use axum::routing::post;
    use handlers::{access, appointments, auth, clients, organization, sessions};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/check-permissions", get(access::check_permissions))
        // Clients
        .route(
            "/api/clients",
            get(clients::client_list).post(clients::client_create),
        )
        .route(
            "/api/clients/:id",
            get(clients::client_get)
                .put(clients::client_update)
                .delete(clients::client_delete),
        )
        .route(
            "/api/clients/:id/check-access",
            get(clients::client_check_access),
        )
        // Therapy sessions and notes
        .route(
            "/api/sessions",
            get(sessions::session_list).post(sessions::session_create),
        )
        .route(
            "/api/sessions/:id",
            get(sessions::session_get)
                .put(sessions::session_update)
                .delete(sessions::session_delete),
        )
        .route("/api/sessions/:id/notes", post(sessions::session_note_create))
        // Appointments
        .route(
            "/api/appointments",
            get(appointments::appointment_list).post(appointments::appointment_create),
        )
        .route(
            "/api/appointments/:id",
            axum::routing::put(appointments::appointment_update)
                .delete(appointments::appointment_delete),
        )
        // Organization membership
        .route("/api/organization/members", get(organization::member_list))
        .route(
            "/api/organization/members/remove",
            post(organization::member_remove),
        )
        .route(
            "/api/organization/members/update-role",
            post(organization::member_update_role),
        )
        .route(
            "/api/organization/invitations",
            post(organization::invitation_create),
        )
        .route("/api/invitations/accept", post(organization::invitation_accept))
}

fn page_routes() -> Router {
    use handlers::pages;

    Router::new()
        .route("/dashboard/clients", get(pages::dashboard_clients))
        .route("/dashboard/sessions", get(pages::dashboard_sessions))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Practice API",
        "version": version,
        "description": "Practice management backend - clients, therapy sessions, and organizations",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/api/auth/whoami (protected)",
            "permissions": "/api/check-permissions (protected)",
            "clients": "/api/clients[/:id] (protected)",
            "sessions": "/api/sessions[/:id] (protected)",
            "appointments": "/api/appointments[/:id] (protected)",
            "organization": "/api/organization/* (protected)",
            "invitations": "/api/invitations/accept (protected)",
            "pages": "/dashboard/* (cookie auth, redirects to /login)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
