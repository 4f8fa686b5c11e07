mod common;

use anyhow::Result;
use reqwest::StatusCode;
use uuid::Uuid;

use practice_api::auth::{generate_token, Claims};

const TEST_SECRET: &str = "integration-test-secret";

/// Whoami round-trips the token claims without touching the database, so it
/// exercises the full auth middleware path end to end.
#[tokio::test]
async fn valid_token_reaches_whoami() -> Result<()> {
    // Must be set before the config singleton is first touched, in this
    // process (for minting) and in the spawned server (inherits env)
    std::env::set_var("JWT_SECRET", TEST_SECRET);

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let user_id = Uuid::new_v4();
    let claims = Claims::new(user_id, "therapist@example.com".to_string());
    let token = generate_token(&claims)?;

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["email"], "therapist@example.com");

    Ok(())
}

#[tokio::test]
async fn cookie_auth_works_for_api_routes() -> Result<()> {
    std::env::set_var("JWT_SECRET", TEST_SECRET);

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let claims = Claims::new(Uuid::new_v4(), "cookie@example.com".to_string());
    let token = generate_token(&claims)?;

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .header("Cookie", format!("auth_token={}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["email"], "cookie@example.com");

    Ok(())
}

#[tokio::test]
async fn oversized_request_bodies_are_rejected() -> Result<()> {
    std::env::set_var("JWT_SECRET", TEST_SECRET);

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let claims = Claims::new(Uuid::new_v4(), "therapist@example.com".to_string());
    let token = generate_token(&claims)?;

    // Development preset caps request bodies at 2MB
    let oversized = vec![b'a'; 3 * 1024 * 1024];
    let res = client
        .post(format!("{}/api/clients", server.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .body(oversized)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    Ok(())
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_rejected() -> Result<()> {
    std::env::set_var("JWT_SECRET", TEST_SECRET);

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Mint with a different secret than the server validates against
    let header = jsonwebtoken::Header::default();
    let claims = Claims::new(Uuid::new_v4(), "intruder@example.com".to_string());
    let token = jsonwebtoken::encode(
        &header,
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"some-other-secret"),
    )?;

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
