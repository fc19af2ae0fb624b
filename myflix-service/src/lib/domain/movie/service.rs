use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::movie::ports::MovieServicePort;

/// Domain service for the read-only movie catalog.
pub struct MovieService<MR>
where
    MR: MovieRepository,
{
    repository: Arc<MR>,
}

impl<MR> MovieService<MR>
where
    MR: MovieRepository,
{
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<MR> MovieServicePort for MovieService<MR>
where
    MR: MovieRepository,
{
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError> {
        self.repository.list().await
    }

    async fn get_movie_by_title(&self, title: &str) -> Result<Movie, MovieError> {
        self.repository
            .find_by_title(title)
            .await?
            .ok_or_else(|| MovieError::NotFound(title.to_string()))
    }

    async fn get_genre(&self, name: &str) -> Result<Genre, MovieError> {
        self.repository
            .find_genre(name)
            .await?
            .ok_or_else(|| MovieError::GenreNotFound(name.to_string()))
    }

    async fn get_director(&self, name: &str) -> Result<Director, MovieError> {
        self.repository
            .find_director(name)
            .await?
            .ok_or_else(|| MovieError::DirectorNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::movie::models::MovieId;

    mock! {
        pub TestMovieRepository {}

        #[async_trait]
        impl MovieRepository for TestMovieRepository {
            async fn list(&self) -> Result<Vec<Movie>, MovieError>;
            async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError>;
            async fn find_genre(&self, name: &str) -> Result<Option<Genre>, MovieError>;
            async fn find_director(&self, name: &str) -> Result<Option<Director>, MovieError>;
            async fn exists(&self, id: &MovieId) -> Result<bool, MovieError>;
        }
    }

    fn coco() -> Movie {
        Movie {
            id: MovieId::new(),
            title: "Coco".to_string(),
            description: "A boy journeys to the Land of the Dead.".to_string(),
            genre: Genre {
                name: "Animation".to_string(),
                description: "Animated feature films.".to_string(),
            },
            director: Director {
                name: "Lee Unkrich".to_string(),
                bio: "American film director and editor.".to_string(),
                birth_year: Some(1967),
                death_year: None,
            },
            actors: vec!["Anthony Gonzalez".to_string()],
            image_path: None,
            featured: true,
        }
    }

    #[tokio::test]
    async fn test_get_movie_by_title_success() {
        let mut repository = MockTestMovieRepository::new();
        let movie = coco();
        let returned = movie.clone();

        repository
            .expect_find_by_title()
            .withf(|title| title == "Coco")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = MovieService::new(Arc::new(repository));

        let result = service.get_movie_by_title("Coco").await;
        assert_eq!(result.unwrap(), movie);
    }

    #[tokio::test]
    async fn test_get_movie_by_title_not_found() {
        let mut repository = MockTestMovieRepository::new();
        repository
            .expect_find_by_title()
            .times(1)
            .returning(|_| Ok(None));

        let service = MovieService::new(Arc::new(repository));

        let result = service.get_movie_by_title("Nothing").await;
        assert!(matches!(result.unwrap_err(), MovieError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_genre_not_found() {
        let mut repository = MockTestMovieRepository::new();
        repository
            .expect_find_genre()
            .times(1)
            .returning(|_| Ok(None));

        let service = MovieService::new(Arc::new(repository));

        let result = service.get_genre("Western").await;
        assert!(matches!(result.unwrap_err(), MovieError::GenreNotFound(_)));
    }

    #[tokio::test]
    async fn test_get_director_success() {
        let mut repository = MockTestMovieRepository::new();
        let director = coco().director;
        let returned = director.clone();

        repository
            .expect_find_director()
            .withf(|name| name == "Lee Unkrich")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = MovieService::new(Arc::new(repository));

        let result = service.get_director("Lee Unkrich").await;
        assert_eq!(result.unwrap(), director);
    }

    #[tokio::test]
    async fn test_list_movies_propagates_database_error() {
        let mut repository = MockTestMovieRepository::new();
        repository
            .expect_list()
            .times(1)
            .returning(|| Err(MovieError::DatabaseError("connection reset".to_string())));

        let service = MovieService::new(Arc::new(repository));

        let result = service.list_movies().await;
        assert!(matches!(result.unwrap_err(), MovieError::DatabaseError(_)));
    }
}
