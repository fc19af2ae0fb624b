//! Authentication core for the myFlix API
//!
//! Provides the pieces every authenticated request goes through:
//! - Password hashing (bcrypt by default, argon2 accepted)
//! - Signed, time-limited access tokens (HS256 JWT)
//! - Login and per-request authorization over a pluggable credential store
//!
//! The crate knows nothing about HTTP or persistence. Services implement
//! [`CredentialStore`] over their own user repository and decide which routes
//! require a token.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::days(7));
//! let now = Utc::now();
//! let token = handler.issue("alice", "user123", now).unwrap();
//! let claims = handler.verify(token.as_str(), now).unwrap();
//! assert_eq!(claims.sub, "alice");
//! assert!(handler.verify(token.as_str(), now + Duration::days(7)).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use auth::{AuthConfig, AuthError, Authenticator, CredentialStore, CredentialStoreError, Principal};
//!
//! struct Account {
//!     id: String,
//!     username: String,
//!     password_hash: String,
//! }
//!
//! impl Principal for Account {
//!     // Handed back on login, without the hash.
//!     type Profile = String;
//!
//!     fn id(&self) -> String {
//!         self.id.clone()
//!     }
//!     fn username(&self) -> &str {
//!         &self.username
//!     }
//!     fn password_hash(&self) -> &str {
//!         &self.password_hash
//!     }
//!     fn profile(&self) -> String {
//!         self.username.clone()
//!     }
//! }
//!
//! struct SingleAccount(String);
//!
//! #[async_trait]
//! impl CredentialStore for SingleAccount {
//!     type Principal = Account;
//!
//!     async fn find_by_username(&self, username: &str) -> Result<Option<Account>, CredentialStoreError> {
//!         Ok((username == "alice").then(|| Account {
//!             id: "user123".to_string(),
//!             username: "alice".to_string(),
//!             password_hash: self.0.clone(),
//!         }))
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = AuthConfig::new("secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth::PasswordHasher::new().hash("Secret123").unwrap();
//! let authenticator = Authenticator::new(Arc::new(SingleAccount(hash)), &config);
//!
//! // Login: verify and issue token
//! let (username, token) = authenticator.login("alice", "Secret123").await.unwrap();
//! assert_eq!(username, "alice");
//!
//! // Authorize a later request
//! let account = authenticator.authorize(token.as_str()).await.unwrap();
//! assert_eq!(account.id, "user123");
//!
//! let denied = authenticator.login("alice", "wrong").await;
//! assert!(matches!(denied, Err(AuthError::InvalidCredentials)));
//! # });
//! ```

pub mod authenticator;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use config::AuthConfig;
pub use credentials::CredentialStore;
pub use credentials::CredentialStoreError;
pub use credentials::Principal;
pub use jwt::AccessToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashScheme;
pub use password::PasswordError;
pub use password::PasswordHasher;
