use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use serde::Deserialize;

use super::errors::PasswordError;

/// Work factor applied to new bcrypt hashes unless configured otherwise.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Longest input bcrypt digests in full. Longer inputs are refused rather
/// than silently truncated.
pub const MAX_BCRYPT_PASSWORD_BYTES: usize = 72;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Algorithm used for newly created hashes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    #[default]
    Bcrypt,
    Argon2,
}

impl HashScheme {
    /// Identify the scheme of a stored hash from its prefix.
    ///
    /// # Returns
    /// `None` when the string is not a recognised bcrypt or argon2 hash
    pub fn detect(hash: &str) -> Option<Self> {
        if ["$2a$", "$2b$", "$2x$", "$2y$"]
            .iter()
            .any(|prefix| hash.starts_with(prefix))
        {
            Some(HashScheme::Bcrypt)
        } else if hash.starts_with("$argon2") {
            Some(HashScheme::Argon2)
        } else {
            None
        }
    }
}

/// Salted one-way password hashing.
///
/// New hashes use bcrypt at a fixed cost by default. Verification accepts
/// both bcrypt and argon2 hashes so stored credentials keep working when the
/// configured scheme changes.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    scheme: HashScheme,
    bcrypt_cost: u32,
}

impl PasswordHasher {
    /// Create a bcrypt hasher with the default cost of 10.
    pub fn new() -> Self {
        Self::with_scheme(HashScheme::Bcrypt, DEFAULT_BCRYPT_COST)
    }

    /// Create a hasher for the given scheme.
    ///
    /// # Arguments
    /// * `scheme` - Algorithm used for new hashes
    /// * `bcrypt_cost` - bcrypt work factor (ignored for argon2)
    pub fn with_scheme(scheme: HashScheme, bcrypt_cost: u32) -> Self {
        Self {
            scheme,
            bcrypt_cost,
        }
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is drawn on every call, so hashing the same input
    /// twice yields two different strings. The empty string is hashed like
    /// any other input.
    ///
    /// # Returns
    /// Self-describing hash string (modular crypt format for bcrypt, PHC for argon2)
    ///
    /// # Errors
    /// * `InvalidCost` - Configured bcrypt cost is outside 4..=31
    /// * `TooLong` - Password exceeds 72 bytes under bcrypt
    /// * `HashingFailed` - The underlying algorithm rejected the input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        match self.scheme {
            HashScheme::Bcrypt => {
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
                    return Err(PasswordError::InvalidCost(self.bcrypt_cost));
                }
                if password.len() > MAX_BCRYPT_PASSWORD_BYTES {
                    return Err(PasswordError::TooLong(MAX_BCRYPT_PASSWORD_BYTES));
                }
                bcrypt::non_truncating_hash(password, self.bcrypt_cost)
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
            HashScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
        }
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Uses the salt and parameters embedded in `hash`; digests are compared
    /// in constant time by the underlying implementations. A malformed or
    /// unrecognised hash is a failed verification, never an error, and so is
    /// a password bcrypt could only compare after truncating.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match HashScheme::detect(hash) {
            Some(HashScheme::Bcrypt) => {
                bcrypt::non_truncating_verify(password, hash).unwrap_or(false)
            }
            Some(HashScheme::Argon2) => PasswordHash::new(hash)
                .map(|parsed| {
                    Argon2::default()
                        .verify_password(password.as_bytes(), &parsed)
                        .is_ok()
                })
                .unwrap_or(false),
            None => false,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
