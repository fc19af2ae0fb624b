use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessToken;
use auth::AuthConfig;
use auth::AuthError;
use auth::Authenticator;
use auth::Clock;

use crate::domain::session::credentials::UserCredentialStore;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;
use crate::user::ports::UserRepository;

/// Stateless session handling on top of [`Authenticator`].
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    authenticator: Authenticator<UserCredentialStore<UR>>,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, config: &AuthConfig) -> Self {
        Self {
            authenticator: Authenticator::new(
                Arc::new(UserCredentialStore::new(repository)),
                config,
            ),
        }
    }

    pub fn with_clock(repository: Arc<UR>, config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            authenticator: Authenticator::with_clock(
                Arc::new(UserCredentialStore::new(repository)),
                config,
                clock,
            ),
        }
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserProfile, AccessToken), AuthError> {
        let (profile, token) = self.authenticator.login(username, password).await?;
        tracing::info!(user_id = %profile.id, "User logged in");

        Ok((profile, token))
    }

    async fn authorize(&self, token: &str) -> Result<User, AuthError> {
        self.authenticator.authorize(token).await
    }
}
