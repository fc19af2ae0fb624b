use async_trait::async_trait;

use crate::domain::movie::models::MovieId;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
///
/// Every operation addresses the user by username, the natural key shared
/// with the token subject.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// The plaintext password is hashed before anything reaches storage.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, password and birthdate
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, username: &Username) -> Result<User, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Arguments
    /// * `username` - Current username of the user to update
    /// * `command` - Command with optional username, email, password and birthdate
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        username: &Username,
        command: UpdateUserCommand,
    ) -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, username: &Username) -> Result<(), UserError>;

    /// Add a movie to the user's favorites. Adding a movie twice keeps one entry.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `MovieNotFound` - Movie is not in the catalog
    /// * `DatabaseError` - Database operation failed
    async fn add_favorite(&self, username: &Username, movie_id: &MovieId)
        -> Result<User, UserError>;

    /// Remove a movie from the user's favorites. Removing an absent movie is a no-op.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn remove_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Update existing user in storage, matched by id.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_username(&self, username: &Username) -> Result<(), UserError>;

    /// Add a movie to a user's favorites in one atomic step.
    ///
    /// # Returns
    /// Updated user (None if no such user)
    async fn add_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<Option<User>, UserError>;

    /// Remove a movie from a user's favorites in one atomic step.
    ///
    /// # Returns
    /// Updated user (None if no such user)
    async fn remove_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<Option<User>, UserError>;
}
