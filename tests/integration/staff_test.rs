//! Integration tests for staff management: invites, activation, and
//! tenant isolation of the roster.

use http::StatusCode;

use crate::helpers;

async fn invite(
    app: &helpers::TestApp,
    token: &str,
    email: &str,
    role: &str,
) -> helpers::TestResponse {
    app.request(
        "POST",
        "/api/staff",
        Some(serde_json::json!({
            "email": email,
            "password": "Passw0rd1",
            "name": "Staff Member",
            "role": role,
        })),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn test_owner_invites_staff_who_can_login() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@flowers.example", "Flowers Co").await;

    let response = invite(&app, &owner, "Fern@Flowers.example", "florist").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["email"], "fern@flowers.example");
    assert_eq!(response.body["data"]["role"], "florist");
    assert_eq!(response.body["data"]["is_active"], true);

    // The invited florist can sign in straight away.
    app.login("fern@flowers.example", "Passw0rd1").await;

    let roster = app.request("GET", "/api/staff", None, Some(&owner)).await;
    assert_eq!(roster.status, StatusCode::OK);
    assert_eq!(roster.body["data"]["total_items"], 2);
}

#[tokio::test]
async fn test_only_owner_manages_staff() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@flowers.example", "Flowers Co").await;

    let florist = invite(&app, &owner, "fern@flowers.example", "florist").await;
    let florist_id = florist.body["data"]["id"].as_str().unwrap().to_string();
    invite(&app, &owner, "max@flowers.example", "manager").await;
    let manager = app.login("max@flowers.example", "Passw0rd1").await;

    // A manager sees the roster but cannot change it.
    let roster = app.request("GET", "/api/staff", None, Some(&manager)).await;
    assert_eq!(roster.status, StatusCode::OK);

    let response = invite(&app, &manager, "eve@flowers.example", "courier").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let response = app
        .request(
            "PATCH",
            &format!("/api/staff/{florist_id}/active"),
            Some(serde_json::json!({ "is_active": false })),
            Some(&manager),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invite_duplicate_email_conflict() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@flowers.example", "Flowers Co").await;

    let response = invite(&app, &owner, "fern@flowers.example", "florist").await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = invite(&app, &owner, "FERN@flowers.example", "courier").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "DUPLICATE_EMAIL");

    // The owner's own address is taken too.
    let response = invite(&app, &owner, "owner@flowers.example", "florist").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_inviting_a_second_owner_is_rejected() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@flowers.example", "Flowers Co").await;

    let response = invite(&app, &owner, "rival@flowers.example", "owner").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");

    // An unknown role never reaches the service at all.
    let response = invite(&app, &owner, "odd@flowers.example", "admin").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_deactivation_blocks_login_and_existing_sessions() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@flowers.example", "Flowers Co").await;

    let invited = invite(&app, &owner, "fern@flowers.example", "florist").await;
    let florist_id = invited.body["data"]["id"].as_str().unwrap().to_string();
    let florist_token = app.login("fern@flowers.example", "Passw0rd1").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/staff/{florist_id}/active"),
            Some(serde_json::json!({ "is_active": false })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_active"], false);

    // Fresh logins are refused with the deactivation error.
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "fern@flowers.example",
                "password": "Passw0rd1",
            })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::FORBIDDEN);
    assert_eq!(login.body["error"], "ACCOUNT_DEACTIVATED");

    // The existing session stops working on its next request.
    let me = app
        .request("GET", "/api/auth/me", None, Some(&florist_token))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    // Reactivation restores the account; the session row was never
    // deleted, so the old token works again.
    let response = app
        .request(
            "PATCH",
            &format!("/api/staff/{florist_id}/active"),
            Some(serde_json::json!({ "is_active": true })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let me = app
        .request("GET", "/api/auth/me", None, Some(&florist_token))
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_owner_cannot_deactivate_self() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "owner@flowers.example",
                "password": "Passw0rd1",
                "name": "Alice",
                "organization_name": "Flowers Co",
            })),
            None,
        )
        .await;
    let owner_id = response.body["data"]["user"]["id"].as_str().unwrap().to_string();
    let owner = response.body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PATCH",
            &format!("/api/staff/{owner_id}/active"),
            Some(serde_json::json!({ "is_active": false })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_staff_roster_is_tenant_scoped() {
    let app = helpers::TestApp::new();
    let owner_a = app.register("alice@flowers.example", "Flowers Co").await;
    let owner_b = app.register("bob@thorn.example", "Thorn & Co").await;

    invite(&app, &owner_a, "fern@flowers.example", "florist").await;
    let foreign = invite(&app, &owner_b, "kurt@thorn.example", "courier").await;
    let foreign_id = foreign.body["data"]["id"].as_str().unwrap().to_string();

    // Each roster contains only its own organization's users.
    let roster = app.request("GET", "/api/staff", None, Some(&owner_a)).await;
    assert_eq!(roster.body["data"]["total_items"], 2);
    for member in roster.body["data"]["items"].as_array().unwrap() {
        let email = member["email"].as_str().unwrap();
        assert!(email.ends_with("@flowers.example"), "{email}");
    }

    // A foreign staff member reads as missing, never as forbidden.
    let response = app
        .request(
            "PATCH",
            &format!("/api/staff/{foreign_id}/active"),
            Some(serde_json::json!({ "is_active": false })),
            Some(&owner_a),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // And the untouched member still logs in.
    app.login("kurt@thorn.example", "Passw0rd1").await;
}

#[tokio::test]
async fn test_staff_list_pagination() {
    let app = helpers::TestApp::new();
    let owner = app.register("owner@flowers.example", "Flowers Co").await;
    for (email, role) in [
        ("fern@flowers.example", "florist"),
        ("max@flowers.example", "manager"),
        ("kurt@flowers.example", "courier"),
    ] {
        let response = invite(&app, &owner, email, role).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let page_one = app
        .request("GET", "/api/staff?page=1&per_page=2", None, Some(&owner))
        .await;
    assert_eq!(page_one.status, StatusCode::OK);
    let data = &page_one.body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["total_items"], 4);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["has_next"], true);
}
