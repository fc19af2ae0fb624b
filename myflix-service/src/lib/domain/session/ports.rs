use async_trait::async_trait;
use auth::AccessToken;
use auth::AuthError;

use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;

/// Port for login and per-request authorization.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Check a username/password pair and issue an access token.
    ///
    /// The user comes back as a [`UserProfile`], without the password hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, indistinguishably
    /// * `Unavailable` - User store could not be reached
    /// * `Internal` - Token could not be signed
    async fn login(&self, username: &str, password: &str) -> Result<(UserProfile, AccessToken), AuthError>;

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// # Errors
    /// * `TokenInvalid` - Token is malformed, forged, expired or its user is gone
    /// * `Unavailable` - User store could not be reached
    async fn authorize(&self, token: &str) -> Result<User, AuthError>;
}
