use async_trait::async_trait;
use thiserror::Error;

/// Identity record the authentication core needs from a user store.
pub trait Principal {
    /// View of the record handed back after a successful login. Must not
    /// carry the password hash.
    type Profile: Send + Sync;

    /// Store-assigned identifier.
    fn id(&self) -> String;

    /// Unique username; the token subject.
    fn username(&self) -> &str;

    /// Stored password hash.
    fn password_hash(&self) -> &str;

    /// Copy of the record without credential material.
    fn profile(&self) -> Self::Profile;
}

/// Error raised by a credential store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialStoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of user records by username.
///
/// The store owns timeouts and retries; the core reports any failure as
/// unavailable and does not retry.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    type Principal: Principal + Send + Sync;

    /// Find a user by unique username.
    ///
    /// # Returns
    /// Optional principal (None if no such user)
    ///
    /// # Errors
    /// * `Unavailable` - Store could not be reached
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Self::Principal>, CredentialStoreError>;
}
