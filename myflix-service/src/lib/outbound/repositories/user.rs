use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::movie::models::MovieId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PasswordHash;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str =
    "id, username, email, password_hash, birthdate, favorite_movies, created_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    birthdate: Option<NaiveDate>,
    favorite_movies: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: PasswordHash::new(row.password_hash),
            birthdate: row.birthdate,
            favorite_movies: row.favorite_movies.into_iter().map(MovieId).collect(),
            created_at: row.created_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, username: &Username) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_username_key") {
            return UserError::UsernameAlreadyExists(username.to_string());
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let favorites: Vec<Uuid> = user.favorite_movies.iter().map(|id| id.0).collect();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, birthdate, favorite_movies, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.birthdate)
        .bind(&favorites)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.username))?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, birthdate = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.birthdate)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.username))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.username.to_string()));
        }

        Ok(user)
    }

    async fn delete_by_username(&self, username: &Username) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(username.to_string()));
        }

        Ok(())
    }

    async fn add_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET favorite_movies = CASE
                WHEN $2 = ANY(favorite_movies) THEN favorite_movies
                ELSE array_append(favorite_movies, $2)
            END
            WHERE username = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(username.as_str())
        .bind(movie_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn remove_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<Option<User>, UserError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET favorite_movies = array_remove(favorite_movies, $2)
            WHERE username = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(username.as_str())
        .bind(movie_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}
