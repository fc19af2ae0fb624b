use std::sync::Arc;
use std::sync::OnceLock;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::AuthConfig;
use crate::credentials::CredentialStore;
use crate::credentials::CredentialStoreError;
use crate::credentials::Principal;
use crate::jwt::AccessToken;
use crate::jwt::JwtHandler;
use crate::password::PasswordHasher;

/// Authentication coordinator combining credential lookup, password
/// verification and token handling.
///
/// Stateless apart from its configuration: no sessions are stored, a token
/// stays valid until it expires.
pub struct Authenticator<S: CredentialStore> {
    store: Arc<S>,
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    clock: Arc<dyn Clock>,
    dummy_hash: OnceLock<Option<String>>,
}

/// Authentication operation errors.
///
/// Deliberately coarse: callers learn the category, never whether a user
/// exists or why a token was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    TokenInvalid,

    #[error("Authentication unavailable: {0}")]
    Unavailable(String),

    #[error("Authentication failed: {0}")]
    Internal(String),
}

impl From<CredentialStoreError> for AuthError {
    fn from(err: CredentialStoreError) -> Self {
        match err {
            CredentialStoreError::Unavailable(msg) => AuthError::Unavailable(msg),
        }
    }
}

impl<S: CredentialStore> Authenticator<S> {
    /// Create a new authenticator using the system clock.
    ///
    /// # Arguments
    /// * `store` - Credential lookup
    /// * `config` - Signing secret, token lifetime and hashing parameters
    pub fn new(store: Arc<S>, config: &AuthConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Create a new authenticator with an explicit time source.
    pub fn with_clock(store: Arc<S>, config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::with_scheme(config.hash_scheme, config.bcrypt_cost),
            jwt_handler: JwtHandler::new(&config.jwt_secret, config.token_ttl),
            clock,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Verify a username/password pair and issue an access token.
    ///
    /// # Returns
    /// The principal's profile (no password hash) and a freshly signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Unavailable` - Credential store could not be reached
    /// * `Internal` - Token signing failed
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(<S::Principal as Principal>::Profile, AccessToken), AuthError> {
        let principal = match self.store.find_by_username(username).await? {
            Some(principal) => principal,
            None => {
                // Spend one hash verification so an unknown username costs
                // the same as a wrong password.
                self.verify_against_dummy(password);
                tracing::debug!(reason = "unknown_user", "Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self
            .password_hasher
            .verify(password, principal.password_hash())
        {
            tracing::debug!(reason = "password_mismatch", "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .jwt_handler
            .issue(principal.username(), &principal.id(), self.clock.now())
            .map_err(|e| {
                tracing::error!(error = %e, "Token signing failed");
                AuthError::Internal(e.to_string())
            })?;

        Ok((principal.profile(), token))
    }

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// Checks signature and expiry, then looks the subject up again so a
    /// deleted user's tokens stop working. Ownership of a particular
    /// resource is not checked here.
    ///
    /// # Errors
    /// * `TokenInvalid` - Malformed, forged or expired token, or the user no longer exists
    /// * `Unavailable` - Credential store could not be reached
    pub async fn authorize(&self, bearer_token: &str) -> Result<S::Principal, AuthError> {
        let claims = self
            .jwt_handler
            .verify(bearer_token, self.clock.now())
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::TokenInvalid
            })?;

        let principal = self
            .store
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        // A username freed by deletion and registered again belongs to a
        // different user.
        if principal.id() != claims.uid {
            tracing::debug!("Token subject no longer matches user id");
            return Err(AuthError::TokenInvalid);
        }

        Ok(principal)
    }

    fn verify_against_dummy(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_init(|| self.password_hasher.hash("myflix-dummy-password").ok());

        if let Some(hash) = dummy {
            let _ = self.password_hasher.verify(password, hash);
        }
    }
}
