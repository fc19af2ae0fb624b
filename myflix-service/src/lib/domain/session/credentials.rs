use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialStore;
use auth::CredentialStoreError;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::ports::UserRepository;

/// Credential lookup for the authentication core, backed by the user
/// repository.
pub struct UserCredentialStore<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> UserCredentialStore<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> CredentialStore for UserCredentialStore<UR>
where
    UR: UserRepository,
{
    type Principal = User;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CredentialStoreError> {
        // A string that is not a valid username cannot belong to anyone.
        let Ok(username) = Username::new(username.to_string()) else {
            return Ok(None);
        };

        self.repository
            .find_by_username(&username)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Credential lookup failed");
                CredentialStoreError::Unavailable(e.to_string())
            })
    }
}
