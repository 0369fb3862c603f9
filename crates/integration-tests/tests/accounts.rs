//! Registration, login, and logout over HTTP.

use reqwest::StatusCode;
use serde_json::{Value, json};

use tinycart_integration_tests::TestServer;

#[tokio::test]
async fn test_register_and_login() {
    let server = TestServer::start().await;
    let client = server.client();

    let resp = server.add_user(&client, "alice", "pw1").await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "User added successfully");

    let resp = server.login(&client, "alice", "pw1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("set-cookie"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Logged in successfully");
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let server = TestServer::start().await;
    let client = server.client();

    let resp = server.add_user(&client, "alice", "pw1").await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = server.add_user(&client, "alice", "other").await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Username already exists");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE username = 'alice'")
        .fetch_one(server.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);

    // The first registration is untouched.
    let resp = server.login(&client, "alice", "pw1").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_missing_field() {
    let server = TestServer::start().await;
    let client = server.client();

    let resp = client
        .post(server.url("/api/users/add"))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invalid user data");
}

#[tokio::test]
async fn test_register_malformed_json() {
    let server = TestServer::start().await;

    let resp = server
        .client()
        .post(server.url("/api/users/add"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await;
    let client = server.client();
    server.add_user(&client, "alice", "pw1").await;

    let resp = server.login(&client, "alice", "wrong").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized. Invalid credentials");

    let resp = server.login(&client, "nobody", "pw1").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_non_string_fields() {
    let server = TestServer::start().await;
    let client = server.client();
    server.add_user(&client, "alice", "pw1").await;

    for body in [
        json!({ "username": 5, "password": "pw1" }),
        json!({ "username": "alice", "password": 42 }),
        json!({ "username": null, "password": "pw1" }),
        json!({}),
    ] {
        let resp = client
            .post(server.url("/login"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "body: {body}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "Unauthorized. Invalid credentials");
    }
}

#[tokio::test]
async fn test_protected_route_requires_login() {
    let server = TestServer::start().await;
    let client = server.client();

    let resp = client.get(server.url("/api/cart")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    server.add_user(&client, "alice", "pw1").await;
    server.login(&client, "alice", "pw1").await;

    let resp = client.get(server.url("/api/cart")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = TestServer::start().await;
    let client = server.logged_in_client("alice").await;

    let resp = client.post(server.url("/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Logout successfully");

    let resp = client.get(server.url("/api/cart")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_redirects_to_login() {
    let server = TestServer::start().await;

    let resp = server
        .client()
        .post(server.url("/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/login");
}

#[tokio::test]
async fn test_sessions_are_per_client() {
    let server = TestServer::start().await;
    let alice = server.logged_in_client("alice").await;
    let bob = server.logged_in_client("bob").await;

    let product_id = server
        .add_product(&alice, json!({ "name": "Widget", "price": 9.99 }))
        .await;
    let resp = alice
        .post(server.url(&format!("/api/cart/add/{product_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(server.view_cart(&alice).await.len(), 1);
    assert!(server.view_cart(&bob).await.is_empty());
}
