use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::AccessToken;
use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler: issues and verifies access tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a single process-wide secret.
/// Expiry is checked against a caller-supplied instant rather than the
/// system clock, so issuance and verification share one time source.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `ttl` - Lifetime of tokens produced by [`JwtHandler::issue`]
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Changing the secret invalidates every token issued before
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Sign an arbitrary claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Check the signature of a token and deserialize its claims.
    ///
    /// No registered claim is required and `exp` is not checked; callers
    /// needing expiry semantics use [`JwtHandler::verify`].
    ///
    /// # Errors
    /// * `InvalidToken` - Signature or algorithm mismatch
    /// * `DecodingFailed` - Token is malformed
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<T>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Issue an access token for a user.
    ///
    /// # Arguments
    /// * `subject` - Username placed in `sub`
    /// * `user_id` - Identifier placed in `uid`
    /// * `issued_at` - Issuance instant; `exp` is `issued_at + ttl`
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        user_id: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, JwtError> {
        let claims = Claims::for_user(user_id, subject, issued_at, self.ttl);
        let token = self.encode(&claims)?;

        tracing::debug!(exp = claims.exp, "Access token issued");

        Ok(AccessToken::new(token, claims))
    }

    /// Verify an access token at instant `now`.
    ///
    /// The signature must match this handler's secret, `sub`, `uid`, `iat`
    /// and `exp` must be present, and `now` must be strictly before `exp`.
    ///
    /// # Errors
    /// * `TokenExpired` - `now` is at or after `exp`
    /// * `InvalidToken` - Signature mismatch, wrong algorithm or missing claim
    /// * `DecodingFailed` - Token is malformed
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is evaluated below against the injected instant, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                // Signed, but the claim set does not have the shape of an access token.
                ErrorKind::Json(_) => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::from(e),
            })?
            .claims;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Deserialize;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
    }

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn handler() -> JwtHandler {
        JwtHandler::new(SECRET, Duration::days(7))
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = handler();

        let claims = TestClaims {
            sub: "user123".to_string(),
            role: "admin".to_string(),
        };

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_invalid_token() {
        let result = handler().decode::<TestClaims>("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_issue_and_verify() {
        let handler = handler();

        let token = handler
            .issue("alice", "user123", issued_at())
            .expect("Failed to issue token");
        let claims = handler
            .verify(token.as_str(), issued_at())
            .expect("Failed to verify token");

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.uid, "user123");
        assert_eq!(&claims, token.claims());
    }

    #[test]
    fn test_token_valid_until_seven_days() {
        let handler = handler();
        let token = handler
            .issue("alice", "user123", issued_at())
            .expect("Failed to issue token");
        let expires_at = issued_at() + Duration::days(7);

        assert!(handler
            .verify(token.as_str(), expires_at - Duration::seconds(1))
            .is_ok());
        assert_eq!(
            handler.verify(token.as_str(), expires_at),
            Err(JwtError::TokenExpired)
        );
        assert_eq!(
            handler.verify(token.as_str(), expires_at + Duration::days(1)),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!", Duration::days(7));
        let verifier = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!", Duration::days(7));

        let token = issuer
            .issue("alice", "user123", issued_at())
            .expect("Failed to issue token");

        let result = verifier.verify(token.as_str(), issued_at());
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let handler = handler();
        let token = handler
            .issue("alice", "user123", issued_at())
            .expect("Failed to issue token");
        let forged_payload = handler
            .issue("mallory", "user456", issued_at())
            .expect("Failed to issue token");

        // Splice mallory's payload under alice's signature.
        let parts: Vec<&str> = token.as_str().split('.').collect();
        let forged_parts: Vec<&str> = forged_payload.as_str().split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(handler.verify(&forged, issued_at()).is_err());
    }

    #[test]
    fn test_verify_rejects_missing_exp() {
        #[derive(Serialize)]
        struct NoExpiry<'a> {
            sub: &'a str,
            uid: &'a str,
            iat: i64,
        }

        let handler = handler();
        let token = handler
            .encode(&NoExpiry {
                sub: "alice",
                uid: "user123",
                iat: issued_at().timestamp(),
            })
            .expect("Failed to encode token");

        assert!(matches!(
            handler.verify(&token, issued_at()),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_missing_uid() {
        #[derive(Serialize)]
        struct NoUserId<'a> {
            sub: &'a str,
            iat: i64,
            exp: i64,
        }

        let handler = handler();
        let token = handler
            .encode(&NoUserId {
                sub: "alice",
                iat: issued_at().timestamp(),
                exp: (issued_at() + Duration::days(7)).timestamp(),
            })
            .expect("Failed to encode token");

        assert!(matches!(
            handler.verify(&token, issued_at()),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let handler = handler();

        assert!(handler.verify("", issued_at()).is_err());
        assert!(handler.verify("not-a-token", issued_at()).is_err());
        assert!(handler.verify("a.b.c", issued_at()).is_err());
    }
}
