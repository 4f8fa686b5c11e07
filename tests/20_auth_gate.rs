mod common;

use anyhow::Result;
use reqwest::StatusCode;

/// Every protected endpoint must reject unauthenticated requests with 401
/// before any database work happens.
#[tokio::test]
async fn protected_endpoints_require_auth() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let get_endpoints = [
        "/api/auth/whoami",
        "/api/check-permissions",
        "/api/clients",
        "/api/clients/00000000-0000-0000-0000-000000000001",
        "/api/clients/00000000-0000-0000-0000-000000000001/check-access",
        "/api/sessions",
        "/api/sessions/00000000-0000-0000-0000-000000000001",
        "/api/appointments",
        "/api/organization/members",
    ];

    for endpoint in get_endpoints {
        let res = client
            .get(format!("{}{}", server.base_url, endpoint))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 from GET {}",
            endpoint
        );

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["error"], true, "error body from {}", endpoint);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    Ok(())
}

#[tokio::test]
async fn mutations_require_auth_before_body_parsing() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let post_endpoints = [
        "/api/clients",
        "/api/sessions",
        "/api/appointments",
        "/api/invitations/accept",
        "/api/organization/members/remove",
        "/api/organization/members/update-role",
        "/api/organization/invitations",
    ];

    // No body at all: the auth gate must still answer first
    for endpoint in post_endpoints {
        let res = client
            .post(format!("{}{}", server.base_url, endpoint))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 from POST {}",
            endpoint
        );
    }

    Ok(())
}

#[tokio::test]
async fn malformed_tokens_are_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Not a JWT at all
    let res = client
        .get(format!("{}/api/clients", server.base_url))
        .header("Authorization", "Bearer not-a-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme
    let res = client
        .get(format!("{}/api/clients", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn dashboard_pages_redirect_to_login() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    for page in ["/dashboard/clients", "/dashboard/sessions"] {
        let res = client
            .get(format!("{}{}", server.base_url, page))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::SEE_OTHER,
            "expected redirect from {}",
            page
        );
        assert_eq!(
            res.headers()
                .get("location")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default(),
            "/login"
        );
    }

    Ok(())
}
