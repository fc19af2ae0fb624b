use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::models::Password;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// The only place plaintext passwords are turned into stored hashes.
pub struct UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    repository: Arc<UR>,
    movie_repository: Arc<MR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, MR> UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `movie_repository` - Catalog used to check favorites exist
    /// * `password_hasher` - Hasher applied on registration and password change
    pub fn new(
        repository: Arc<UR>,
        movie_repository: Arc<MR>,
        password_hasher: auth::PasswordHasher,
    ) -> Self {
        Self {
            repository,
            movie_repository,
            password_hasher,
        }
    }

    fn hash_password(&self, password: &Password) -> Result<PasswordHash, UserError> {
        let hash = self.password_hasher.hash(password.expose()).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            UserError::from(e)
        })?;
        Ok(PasswordHash::new(hash))
    }

    async fn ensure_username_available(&self, username: &Username) -> Result<(), UserError> {
        match self.repository.find_by_username(username).await? {
            Some(_) => Err(UserError::UsernameAlreadyExists(username.to_string())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<UR, MR> UserServicePort for UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.ensure_username_available(&command.username).await?;

        let password_hash = self.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            birthdate: command.birthdate,
            favorite_movies: Vec::new(),
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, username = %created_user.username, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    async fn update_user(
        &self,
        username: &Username,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.get_user(username).await?;

        if let Some(new_username) = command.username {
            if new_username != user.username {
                self.ensure_username_available(&new_username).await?;
                user.username = new_username;
            }
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(&new_password)?;
        }

        if let Some(new_birthdate) = command.birthdate {
            user.birthdate = Some(new_birthdate);
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, username: &Username) -> Result<(), UserError> {
        self.repository.delete_by_username(username).await?;
        tracing::info!(username = %username, "User deleted");

        Ok(())
    }

    async fn add_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<User, UserError> {
        let exists = self
            .movie_repository
            .exists(movie_id)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;
        if !exists {
            return Err(UserError::MovieNotFound(movie_id.to_string()));
        }

        self.repository
            .add_favorite(username, movie_id)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    async fn remove_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<User, UserError> {
        self.repository
            .remove_favorite(username, movie_id)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}
