use std::fmt;

use chrono::Duration;

use crate::password::HashScheme;
use crate::password::DEFAULT_BCRYPT_COST;

/// Default lifetime of an access token.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Settings for the authentication core.
///
/// Built once at startup and handed to [`crate::Authenticator`]; nothing in
/// this crate reads configuration from the environment.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
    pub hash_scheme: HashScheme,
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create a configuration with the given signing secret and defaults
    /// for everything else (7 day tokens, bcrypt cost 10).
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
            hash_scheme: HashScheme::default(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn with_hash_scheme(mut self, hash_scheme: HashScheme) -> Self {
        self.hash_scheme = hash_scheme;
        self
    }

    pub fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("hash_scheme", &self.hash_scheme)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
