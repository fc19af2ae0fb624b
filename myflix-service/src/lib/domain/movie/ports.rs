use async_trait::async_trait;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;

/// Port for movie catalog read operations.
#[async_trait]
pub trait MovieServicePort: Send + Sync + 'static {
    /// List every movie in the catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError>;

    /// Retrieve a movie by its exact title.
    ///
    /// # Errors
    /// * `NotFound` - No movie with this title
    /// * `DatabaseError` - Database operation failed
    async fn get_movie_by_title(&self, title: &str) -> Result<Movie, MovieError>;

    /// Retrieve a genre by name.
    ///
    /// # Errors
    /// * `GenreNotFound` - No movie in the catalog has this genre
    /// * `DatabaseError` - Database operation failed
    async fn get_genre(&self, name: &str) -> Result<Genre, MovieError>;

    /// Retrieve a director by name.
    ///
    /// # Errors
    /// * `DirectorNotFound` - No movie in the catalog has this director
    /// * `DatabaseError` - Database operation failed
    async fn get_director(&self, name: &str) -> Result<Director, MovieError>;
}

/// Persistence operations for the movie catalog.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Returns
    /// Optional movie (None if not found)
    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError>;

    /// Genre of the first movie carrying this genre name.
    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, MovieError>;

    /// Director of the first movie carrying this director name.
    async fn find_director(&self, name: &str) -> Result<Option<Director>, MovieError>;

    async fn exists(&self, id: &MovieId) -> Result<bool, MovieError>;
}
