use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an access token.
///
/// `sub` is the username (the natural key used to resolve the token back to
/// a user), `uid` the store-assigned identifier used to detect a username
/// that was released and registered again after the token was issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// User identifier
    pub uid: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user with `exp = issued_at + ttl`.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Token subject
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Token lifetime
    pub fn for_user(
        user_id: impl ToString,
        username: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expires_at = issued_at + ttl;

        Self {
            sub: username.into(),
            uid: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token stops being valid at the instant it expires.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

/// Signed bearer token together with the claims it carries.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    claims: Claims,
}

impl AccessToken {
    pub fn new(token: String, claims: Claims) -> Self {
        Self { token, claims }
    }

    /// Compact serialized token, as sent in `Authorization: Bearer`.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn into_string(self) -> String {
        self.token
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}
