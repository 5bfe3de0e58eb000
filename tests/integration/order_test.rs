//! Integration tests for the order lifecycle: creation, listing,
//! detail updates, and status transitions.

use chrono::{DateTime, Utc};
use http::StatusCode;

use floraops_entity::order::OrderItem;

use crate::helpers;

#[tokio::test]
async fn test_create_order_starts_in_new() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;

    let response = app
        .request(
            "POST",
            "/api/orders",
            Some(serde_json::json!({
                "customer_name": "Iris Bloom",
                "customer_phone": "+1-555-0101",
                "delivery_address": "12 Petal Lane",
                "items": [
                    { "name": "Peony bouquet", "quantity": 2, "price_cents": 4500 },
                    { "name": "Vase", "quantity": 1, "price_cents": 2000 },
                ],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["status"], "new");
    assert_eq!(data["customer_name"], "Iris Bloom");
    assert_eq!(data["total_cents"], 11_000);

    // The wire shape of line items matches the domain model.
    let items: Vec<OrderItem> = serde_json::from_value(data["items"].clone()).unwrap();
    assert_eq!(items.len(), 2);
    let total: i64 = items.iter().map(OrderItem::line_total_cents).sum();
    assert_eq!(total, 11_000);

    // Items are optional; an empty order totals zero.
    let empty = app
        .request(
            "POST",
            "/api/orders",
            Some(serde_json::json!({ "customer_name": "Walk-in" })),
            Some(&token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::CREATED);
    assert_eq!(empty.body["data"]["total_cents"], 0);
}

#[tokio::test]
async fn test_full_lifecycle_over_http() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;
    let order_id = app.create_order(&token, "Iris Bloom").await;

    for status in ["in_work", "assembled", "on_delivery", "delivered"] {
        let response = app.transition(&token, &order_id, status).await;
        assert_eq!(response.status, StatusCode::OK, "to {status}");
        assert_eq!(response.body["data"]["status"], status);
    }

    // Delivered is terminal; even cancel is refused from there.
    let response = app.transition(&token, &order_id, "canceled").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_skipping_a_state_is_rejected() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;
    let order_id = app.create_order(&token, "Iris Bloom").await;

    let response = app.transition(&token, &order_id, "delivered").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "INVALID_TRANSITION");

    // The failed attempt must not have moved the order.
    let fetched = app
        .request("GET", &format!("/api/orders/{order_id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.body["data"]["status"], "new");
}

#[tokio::test]
async fn test_cancel_from_any_active_state_but_not_back() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;

    // Cancel straight from new.
    let first = app.create_order(&token, "Iris Bloom").await;
    let response = app.transition(&token, &first, "canceled").await;
    assert_eq!(response.status, StatusCode::OK);

    // Cancel from in_work.
    let second = app.create_order(&token, "Rose Thorn").await;
    app.transition(&token, &second, "in_work").await;
    let response = app.transition(&token, &second, "canceled").await;
    assert_eq!(response.status, StatusCode::OK);

    // Canceled is terminal: no way back into the flow.
    let response = app.transition(&token, &second, "in_work").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_cross_tenant_order_reads_as_not_found() {
    let app = helpers::TestApp::new();
    let token_a = app.register("alice@flowers.example", "Flowers Co").await;
    let token_b = app.register("bob@thorn.example", "Thorn & Co").await;
    let order_id = app.create_order(&token_a, "Iris Bloom").await;

    let foreign = app
        .request("GET", &format!("/api/orders/{order_id}"), None, Some(&token_b))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    // A foreign order and a nonexistent one must be indistinguishable.
    let ghost_id = uuid::Uuid::new_v4();
    let ghost = app
        .request("GET", &format!("/api/orders/{ghost_id}"), None, Some(&token_b))
        .await;
    assert_eq!(ghost.status, StatusCode::NOT_FOUND);
    assert_eq!(foreign.body, ghost.body);

    // Same rule for writes.
    let response = app.transition(&token_b, &order_id, "in_work").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = app
        .request(
            "PATCH",
            &format!("/api/orders/{order_id}"),
            Some(serde_json::json!({ "delivery_address": "99 Hijack St" })),
            Some(&token_b),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // And the owner still sees the order untouched.
    let mine = app
        .request("GET", &format!("/api/orders/{order_id}"), None, Some(&token_a))
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body["data"]["status"], "new");
}

#[tokio::test]
async fn test_list_with_status_filter() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;

    let first = app.create_order(&token, "Iris Bloom").await;
    let second = app.create_order(&token, "Rose Thorn").await;
    app.create_order(&token, "Lily Pond").await;
    app.transition(&token, &first, "in_work").await;
    app.transition(&token, &second, "canceled").await;

    let all = app.request("GET", "/api/orders", None, Some(&token)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"]["total_items"], 3);

    // Newest first: the last order created leads the listing.
    assert_eq!(all.body["data"]["items"][0]["customer_name"], "Lily Pond");
    let stamps: Vec<DateTime<Utc>> = all.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| serde_json::from_value(item["created_at"].clone()).unwrap())
        .collect();
    assert!(stamps.windows(2).all(|pair| pair[0] >= pair[1]));

    let in_work = app
        .request("GET", "/api/orders?status=in_work", None, Some(&token))
        .await;
    assert_eq!(in_work.body["data"]["total_items"], 1);
    assert_eq!(in_work.body["data"]["items"][0]["status"], "in_work");

    let new = app
        .request("GET", "/api/orders?status=new", None, Some(&token))
        .await;
    assert_eq!(new.body["data"]["total_items"], 1);
    assert_eq!(new.body["data"]["items"][0]["customer_name"], "Lily Pond");
}

#[tokio::test]
async fn test_list_pagination() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;
    for customer in ["Iris Bloom", "Rose Thorn", "Lily Pond"] {
        app.create_order(&token, customer).await;
    }

    let page_one = app
        .request("GET", "/api/orders?page=1&per_page=2", None, Some(&token))
        .await;
    assert_eq!(page_one.status, StatusCode::OK);
    let data = &page_one.body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["total_items"], 3);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["has_next"], true);

    let page_two = app
        .request("GET", "/api/orders?page=2&per_page=2", None, Some(&token))
        .await;
    let data = &page_two.body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 1);
    assert_eq!(data["has_next"], false);
    assert_eq!(data["has_previous"], true);
}

#[tokio::test]
async fn test_update_details_preserves_status() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;
    let order_id = app.create_order(&token, "Iris Bloom").await;
    app.transition(&token, &order_id, "in_work").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/orders/{order_id}"),
            Some(serde_json::json!({
                "customer_name": "Iris B.",
                "delivery_address": "34 Tulip Court",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["customer_name"], "Iris B.");
    assert_eq!(data["delivery_address"], "34 Tulip Court");
    // Detail updates never touch the status column.
    assert_eq!(data["status"], "in_work");
}

#[tokio::test]
async fn test_unknown_status_string_is_rejected() {
    let app = helpers::TestApp::new();
    let token = app.register("alice@flowers.example", "Flowers Co").await;
    let order_id = app.create_order(&token, "Iris Bloom").await;

    let response = app.transition(&token, &order_id, "shipped").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let fetched = app
        .request("GET", &format!("/api/orders/{order_id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.body["data"]["status"], "new");
}

#[tokio::test]
async fn test_orders_require_authentication() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/orders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/orders",
            Some(serde_json::json!({ "customer_name": "Iris Bloom" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_flow_across_login_and_logout() {
    let app = helpers::TestApp::new();

    // A florist shop signs up and takes an order.
    let token = app.register("owner@flowers.example", "Flowers Co").await;
    let order_id = app.create_order(&token, "Iris Bloom").await;

    // Work begins.
    let response = app.transition(&token, &order_id, "in_work").await;
    assert_eq!(response.status, StatusCode::OK);

    // Jumping straight to delivered is refused.
    let response = app.transition(&token, &order_id, "delivered").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    // The proper next step works.
    let response = app.transition(&token, &order_id, "assembled").await;
    assert_eq!(response.status, StatusCode::OK);

    // The owner signs out; the old token is dead but the data is not.
    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);
    let stale = app.request("GET", "/api/orders", None, Some(&token)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let fresh = app.login("owner@flowers.example", "Passw0rd1").await;
    let listed = app.request("GET", "/api/orders", None, Some(&fresh)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"]["items"][0]["status"], "assembled");
}
