use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::RevocationRegistry;
use bookstore_service::domain::book::service::BookService;
use bookstore_service::domain::user::service::UserService;
use bookstore_service::inbound::http::router::create_router;
use bookstore_service::outbound::repositories::SqliteBookRepository;
use bookstore_service::outbound::repositories::SqliteUserRepository;
use chrono::Duration;
use reqwest::StatusCode;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub revocations: Arc<RevocationRegistry>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let pool = test_pool().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let revocations = Arc::new(RevocationRegistry::new());
        let authenticator = Arc::new(Authenticator::new(
            TEST_SECRET,
            Duration::minutes(Authenticator::DEFAULT_TOKEN_TTL_MINUTES),
            Arc::clone(&revocations),
        ));

        let user_service = Arc::new(UserService::new(Arc::new(SqliteUserRepository::new(
            pool.clone(),
        ))));
        let book_service = Arc::new(BookService::new(Arc::new(SqliteBookRepository::new(
            pool.clone(),
        ))));

        let router = create_router(user_service, book_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
            revocations,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/users/register")
            .query(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/users/login")
            .query(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers `username` and returns a fresh access token for it.
    pub async fn token_for(&self, username: &str) -> String {
        let response = self.register(username, "pass_word!").await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = self.login(username, "pass_word!").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("access_token should be a string")
            .to_string()
    }
}

/// Single-connection in-memory database; every test gets its own.
async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
