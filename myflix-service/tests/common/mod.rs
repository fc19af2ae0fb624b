use std::sync::Arc;

use auth::AuthConfig;
use auth::JwtHandler;
use auth::ManualClock;
use auth::PasswordHasher;
use chrono::Duration;
use chrono::Utc;
use myflix_service::domain::movie::catalog::starter_catalog;
use myflix_service::domain::movie::service::MovieService;
use myflix_service::domain::session::service::SessionService;
use myflix_service::domain::user::service::UserService;
use myflix_service::inbound::http::router::create_router;
use myflix_service::outbound::repositories::InMemoryMovieRepository;
use myflix_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on in-memory storage seeded
/// with the starter catalog, as the memory backend of the binary is
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub movies: Arc<InMemoryMovieRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::new());
        let movies = Arc::new(InMemoryMovieRepository::with_movies(starter_catalog()));
        let clock = Arc::new(ManualClock::new(Utc::now()));

        // Lowest bcrypt cost keeps the suite fast.
        let auth_config = AuthConfig::new(JWT_SECRET).with_bcrypt_cost(4);

        let user_service = Arc::new(UserService::new(
            users.clone(),
            movies.clone(),
            PasswordHasher::with_scheme(auth_config.hash_scheme, auth_config.bcrypt_cost),
        ));
        let movie_service = Arc::new(MovieService::new(movies.clone()));
        let session_service = Arc::new(SessionService::with_clock(
            users,
            &auth_config,
            clock.clone(),
        ));

        let router = create_router(user_service, movie_service, session_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            clock,
            movies,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, username: &str, password: &str, email: &str) -> reqwest::Response {
        self.post("/users")
            .json(&json!({
                "username": username,
                "password": password,
                "email": email
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Register a user and log in
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let response = self
            .register(username, password, &format!("{}@example.com", username))
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        self.login(username, password).await
    }

    /// Move the server clock forward
    pub fn advance_clock(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Sign a token for `username` with a secret the server does not know
    pub fn forge_token(&self, username: &str, user_id: &str) -> String {
        JwtHandler::new(b"some-other-secret-key-at-least-32-bytes", Duration::days(7))
            .issue(username, user_id, Utc::now())
            .expect("Failed to issue token")
            .into_string()
    }
}
