use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store for tests and local runs.
///
/// Every operation holds the lock for its whole read-modify-write, so
/// username uniqueness holds under concurrent requests.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn find_mut<'a>(users: &'a mut HashMap<UserId, User>, username: &Username) -> Option<&'a mut User> {
    users.values_mut().find(|u| &u.username == username)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.username == username).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| UserError::NotFound(user.username.to_string()))?;

        // Favorites change only through add_favorite/remove_favorite.
        stored.username = user.username;
        stored.email = user.email;
        stored.password_hash = user.password_hash;
        stored.birthdate = user.birthdate;

        Ok(stored.clone())
    }

    async fn delete_by_username(&self, username: &Username) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        let id = users
            .values()
            .find(|u| &u.username == username)
            .map(|u| u.id)
            .ok_or_else(|| UserError::NotFound(username.to_string()))?;

        users.remove(&id);
        Ok(())
    }

    async fn add_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<Option<User>, UserError> {
        let mut users = self.users.write().await;

        Ok(find_mut(&mut users, username).map(|user| {
            user.add_favorite(*movie_id);
            user.clone()
        }))
    }

    async fn remove_favorite(
        &self,
        username: &Username,
        movie_id: &MovieId,
    ) -> Result<Option<User>, UserError> {
        let mut users = self.users.write().await;

        Ok(find_mut(&mut users, username).map(|user| {
            user.remove_favorite(movie_id);
            user.clone()
        }))
    }
}

/// Process-local movie catalog for tests and local runs.
#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: RwLock<Vec<Movie>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies: RwLock::new(movies),
        }
    }

    pub async fn insert(&self, movie: Movie) {
        self.movies.write().await.push(movie);
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.title == title).cloned())
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, MovieError> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.genre.name == name)
            .map(|m| m.genre.clone()))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, MovieError> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| m.director.name == name)
            .map(|m| m.director.clone()))
    }

    async fn exists(&self, id: &MovieId) -> Result<bool, MovieError> {
        let movies = self.movies.read().await;
        Ok(movies.iter().any(|m| &m.id == id))
    }
}
