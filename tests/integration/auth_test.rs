//! Integration tests for registration, login, session validation, and
//! logout.

use http::StatusCode;
use uuid::Uuid;

use floraops_database::stores::CredentialStore;

use crate::helpers;

#[tokio::test]
async fn test_register_creates_organization_and_owner() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "Alice@Flowers.example",
                "password": "Passw0rd1",
                "name": "Alice",
                "organization_name": "Flowers Co",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["user"]["email"], "alice@flowers.example");
    assert_eq!(data["user"]["role"], "owner");
    assert_eq!(data["user"]["is_active"], true);
    assert_eq!(data["organization"]["name"], "Flowers Co");
    assert!(data["token"].as_str().is_some_and(|t| !t.is_empty()));
    // The password hash must never appear in any response body.
    assert!(data["user"].get("password_hash").is_none());

    let token = data["token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["user"]["id"], data["user"]["id"]);
    assert_eq!(
        me.body["data"]["organization"]["id"],
        data["organization"]["id"]
    );
}

#[tokio::test]
async fn test_register_duplicate_email_conflict() {
    let app = helpers::TestApp::new();
    app.register("alice@flowers.example", "Flowers Co").await;

    // Same address in a different case is still a duplicate.
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "ALICE@FLOWERS.EXAMPLE",
                "password": "Other1234",
                "name": "Mallory",
                "organization_name": "Weeds Ltd",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "alice@flowers.example",
                "password": "short",
                "name": "Alice",
                "organization_name": "Flowers Co",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_login_accepts_any_email_casing() {
    let app = helpers::TestApp::new();
    app.register("alice@flowers.example", "Flowers Co").await;

    let token = app.login("Alice@FLOWERS.example", "Passw0rd1").await;

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["user"]["email"], "alice@flowers.example");
}

#[tokio::test]
async fn test_login_failures_read_identically() {
    let app = helpers::TestApp::new();
    app.register("alice@flowers.example", "Flowers Co").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "alice@flowers.example",
                "password": "WrongPass1",
            })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "ghost@flowers.example",
                "password": "Passw0rd1",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    // The two bodies must be byte-for-byte the same so a caller cannot
    // probe which addresses are registered.
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_rejected_for_deactivated_account() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "alice@flowers.example",
                "password": "Passw0rd1",
                "name": "Alice",
                "organization_name": "Flowers Co",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let organization_id =
        Uuid::parse_str(response.body["data"]["organization"]["id"].as_str().unwrap()).unwrap();
    let user_id = Uuid::parse_str(response.body["data"]["user"]["id"].as_str().unwrap()).unwrap();

    // Deactivate directly in the store; the API refuses to let an owner
    // deactivate themselves.
    app.store
        .set_user_active(organization_id, user_id, false)
        .await
        .unwrap();

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "alice@flowers.example",
                "password": "Passw0rd1",
            })),
            None,
        )
        .await;

    assert_eq!(login.status, StatusCode::FORBIDDEN);
    assert_eq!(login.body["error"], "ACCOUNT_DEACTIVATED");
}

#[tokio::test]
async fn test_session_failures_read_identically() {
    let app = helpers::TestApp::new();

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-real-token"))
        .await;
    let empty = app.request("GET", "/api/auth/me", None, Some("")).await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(empty.status, StatusCode::UNAUTHORIZED);
    // A missing header, a malformed one, and an unknown token must be
    // indistinguishable to the caller.
    assert_eq!(missing.body, garbage.body);
    assert_eq!(missing.body, empty.body);
    assert_eq!(missing.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_logout_invalidates_token_and_is_idempotent() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    // The revoked token no longer authenticates.
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    // A second logout with the same token is a quiet no-op.
    let again = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_logout_requires_bearer_header() {
    let app = helpers::TestApp::new();

    let response = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_issues_independent_sessions() {
    let app = helpers::TestApp::new();
    let first = app.register("alice@flowers.example", "Flowers Co").await;
    let second = app.login("alice@flowers.example", "Passw0rd1").await;
    assert_ne!(first, second);

    // Revoking one session leaves the other intact.
    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&first))
        .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    let me = app.request("GET", "/api/auth/me", None, Some(&second)).await;
    assert_eq!(me.status, StatusCode::OK);
}
