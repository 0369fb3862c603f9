//! Integration tests for tinycart.
//!
//! Each test starts its own server on an ephemeral port with a fresh
//! in-memory database, then drives it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tinycart-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::{Client, Response, redirect};
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use tinycart_core::ProductId;
use tinycart_server::config::{SentryConfig, ServerConfig};
use tinycart_server::db;

/// A running server bound to `127.0.0.1` with its own database.
pub struct TestServer {
    addr: SocketAddr,
    pool: SqlitePool,
}

impl TestServer {
    /// Start a server on an ephemeral port.
    pub async fn start() -> Self {
        let pool = db::create_in_memory_pool()
            .await
            .expect("Failed to create in-memory database");

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = tinycart_server::build_app(test_config(addr), pool.clone())
            .await
            .expect("Failed to build app");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        Self { addr, pool }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The server's database, for asserting on stored rows.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// A client with its own cookie jar that does not follow redirects.
    #[must_use]
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Register a user.
    pub async fn add_user(&self, client: &Client, username: &str, password: &str) -> Response {
        client
            .post(self.url("/api/users/add"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Request failed")
    }

    /// Log in, storing the session cookie in the client's jar.
    pub async fn login(&self, client: &Client, username: &str, password: &str) -> Response {
        client
            .post(self.url("/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Request failed")
    }

    /// Register a fresh user and log the client in as them.
    pub async fn logged_in_client(&self, username: &str) -> Client {
        let client = self.client();
        let resp = self.add_user(&client, username, "pw1").await;
        assert_eq!(resp.status(), 201);
        let resp = self.login(&client, username, "pw1").await;
        assert_eq!(resp.status(), 200);
        client
    }

    /// Create a product and return its id.
    pub async fn add_product(&self, client: &Client, body: Value) -> ProductId {
        let resp = client
            .post(self.url("/api/products/add"))
            .json(&body)
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), 201);

        let body: Value = resp.json().await.expect("Invalid JSON");
        ProductId::new(body["id"].as_i64().expect("Missing product id"))
    }

    /// Fetch the current user's cart.
    pub async fn view_cart(&self, client: &Client) -> Vec<Value> {
        let resp = client
            .get(self.url("/api/cart"))
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), 200);
        resp.json().await.expect("Invalid JSON")
    }
}

fn test_config(addr: SocketAddr) -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: addr.port(),
        base_url: format!("http://{addr}"),
        session_secret: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6d"),
        log_json: false,
        sentry: SentryConfig::default(),
    }
}
