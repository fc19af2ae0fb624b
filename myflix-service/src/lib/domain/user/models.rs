use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::movie::models::MovieId;
use crate::user::errors::BirthdateError;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Identity and credential record of a registered user. Never serialized
/// directly; outward representations go through [`UserProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub birthdate: Option<NaiveDate>,
    pub favorite_movies: Vec<MovieId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Append a movie to the favorites unless it is already there.
    ///
    /// # Returns
    /// `true` if the list changed
    pub fn add_favorite(&mut self, movie_id: MovieId) -> bool {
        if self.favorite_movies.contains(&movie_id) {
            false
        } else {
            self.favorite_movies.push(movie_id);
            true
        }
    }

    /// Remove a movie from the favorites if present.
    ///
    /// # Returns
    /// `true` if the list changed
    pub fn remove_favorite(&mut self, movie_id: &MovieId) -> bool {
        let before = self.favorite_movies.len();
        self.favorite_movies.retain(|id| id != movie_id);
        before != self.favorite_movies.len()
    }

    /// Outward view of this user, without credential material.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            birthdate: self.birthdate,
            favorite_movies: self.favorite_movies.clone(),
            created_at: self.created_at,
        }
    }
}

impl auth::Principal for User {
    type Profile = UserProfile;

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn username(&self) -> &str {
        self.username.as_str()
    }

    fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    fn profile(&self) -> UserProfile {
        User::profile(self)
    }
}

/// User as shown to clients: every field except the password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub birthdate: Option<NaiveDate>,
    pub favorite_movies: Vec<MovieId>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        user.profile()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 5 to 32 characters, ASCII letters and digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const MIN_LENGTH: usize = 5;
    pub const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Arguments
    /// * `username` - Raw username string
    ///
    /// # Returns
    /// Validated Username value object
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 5 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains anything but ASCII letters and digits
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password as received from a client.
///
/// Lives only for the duration of a request; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - Password is the empty string
    /// * `TooLong` - Password is longer than bcrypt can digest in full
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            Err(PasswordPolicyError::Empty)
        } else if password.len() > auth::password::MAX_BCRYPT_PASSWORD_BYTES {
            Err(PasswordPolicyError::TooLong {
                max: auth::password::MAX_BCRYPT_PASSWORD_BYTES,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Stored one-way password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// * `InvalidFormat` - Not a valid ISO 8601 calendar date
pub fn parse_birthdate(raw: &str) -> Result<NaiveDate, BirthdateError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| BirthdateError::InvalidFormat(raw.to_string()))
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub birthdate: Option<NaiveDate>,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `birthdate` - Optional date of birth
    pub fn new(
        username: Username,
        email: EmailAddress,
        password: Password,
        birthdate: Option<NaiveDate>,
    ) -> Self {
        Self {
            username,
            email,
            password,
            birthdate,
        }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields are changed.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub birthdate: Option<NaiveDate>,
}
