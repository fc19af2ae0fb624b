use thiserror::Error;

/// Error for MovieId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MovieIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for movie catalog operations
#[derive(Debug, Clone, Error)]
pub enum MovieError {
    #[error("Invalid movie ID: {0}")]
    InvalidMovieId(#[from] MovieIdError),

    #[error("Movie not found: {0}")]
    NotFound(String),

    #[error("Genre not found: {0}")]
    GenreNotFound(String),

    #[error("Director not found: {0}")]
    DirectorNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
