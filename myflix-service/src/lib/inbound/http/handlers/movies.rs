use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::inbound::http::router::AppState;

pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<MovieData>>, ApiError> {
    let movies = state.movie_service.list_movies().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        movies.iter().map(MovieData::from).collect(),
    ))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    state
        .movie_service
        .get_movie_by_title(&title)
        .await
        .map_err(ApiError::from)
        .map(|ref movie| ApiSuccess::new(StatusCode::OK, movie.into()))
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<GenreData>, ApiError> {
    state
        .movie_service
        .get_genre(&name)
        .await
        .map_err(ApiError::from)
        .map(|ref genre| ApiSuccess::new(StatusCode::OK, genre.into()))
}

pub async fn get_director(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<DirectorData>, ApiError> {
    state
        .movie_service
        .get_director(&name)
        .await
        .map_err(ApiError::from)
        .map(|ref director| ApiSuccess::new(StatusCode::OK, director.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: GenreData,
    pub director: DirectorData,
    pub actors: Vec<String>,
    pub image_path: Option<String>,
    pub featured: bool,
}

impl From<&Movie> for MovieData {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            description: movie.description.clone(),
            genre: (&movie.genre).into(),
            director: (&movie.director).into(),
            actors: movie.actors.clone(),
            image_path: movie.image_path.clone(),
            featured: movie.featured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreData {
    pub name: String,
    pub description: String,
}

impl From<&Genre> for GenreData {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
            description: genre.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorData {
    pub name: String,
    pub bio: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

impl From<&Director> for DirectorData {
    fn from(director: &Director) -> Self {
        Self {
            name: director.name.clone(),
            bio: director.bio.clone(),
            birth_year: director.birth_year,
            death_year: director.death_year,
        }
    }
}
