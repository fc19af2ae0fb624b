use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;

const MOVIE_COLUMNS: &str = "id, title, description, genre_name, genre_description, \
     director_name, director_bio, director_birth_year, director_death_year, \
     actors, image_path, featured";

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    description: String,
    genre_name: String,
    genre_description: String,
    director_name: String,
    director_bio: String,
    director_birth_year: Option<i32>,
    director_death_year: Option<i32>,
    actors: Vec<String>,
    image_path: Option<String>,
    featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: MovieId(row.id),
            title: row.title,
            description: row.description,
            genre: Genre {
                name: row.genre_name,
                description: row.genre_description,
            },
            director: Director {
                name: row.director_name,
                bio: row.director_bio,
                birth_year: row.director_birth_year,
                death_year: row.director_death_year,
            },
            actors: row.actors,
            image_path: row.image_path,
            featured: row.featured,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GenreRow {
    genre_name: String,
    genre_description: String,
}

#[derive(sqlx::FromRow)]
struct DirectorRow {
    director_name: String,
    director_bio: String,
    director_birth_year: Option<i32>,
    director_death_year: Option<i32>,
}

fn database_error(e: sqlx::Error) -> MovieError {
    MovieError::DatabaseError(e.to_string())
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn list(&self) -> Result<Vec<Movie>, MovieError> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {} FROM movies ORDER BY title",
            MOVIE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {} FROM movies WHERE title = $1",
            MOVIE_COLUMNS
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Movie::from))
    }

    async fn find_genre(&self, name: &str) -> Result<Option<Genre>, MovieError> {
        let row = sqlx::query_as::<_, GenreRow>(
            "SELECT genre_name, genre_description FROM movies WHERE genre_name = $1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(|r| Genre {
            name: r.genre_name,
            description: r.genre_description,
        }))
    }

    async fn find_director(&self, name: &str) -> Result<Option<Director>, MovieError> {
        let row = sqlx::query_as::<_, DirectorRow>(
            r#"
            SELECT director_name, director_bio, director_birth_year, director_death_year
            FROM movies
            WHERE director_name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(|r| Director {
            name: r.director_name,
            bio: r.director_bio,
            birth_year: r.director_birth_year,
            death_year: r.director_death_year,
        }))
    }

    async fn exists(&self, id: &MovieId) -> Result<bool, MovieError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }
}
