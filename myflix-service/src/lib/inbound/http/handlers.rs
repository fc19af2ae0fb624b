use std::fmt::Display;

use auth::AuthError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use crate::domain::movie::errors::MovieError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;

pub mod add_favorite;
pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod login;
pub mod movies;
pub mod remove_favorite;
pub mod update_user;
pub mod welcome;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    ServiceUnavailable(String),
    UnprocessableEntity(Vec<FieldError>),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Vec::new(),
                )
            }
            ApiError::ServiceUnavailable(detail) => {
                tracing::error!(error = %detail, "Backing store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                    Vec::new(),
                )
            }
            ApiError::UnprocessableEntity(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                errors,
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, Vec::new()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, Vec::new()),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, message, errors)),
        )
            .into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::MovieNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUsername(e) => {
                ApiError::UnprocessableEntity(vec![FieldError::new("username", e)])
            }
            UserError::InvalidEmail(e) => {
                ApiError::UnprocessableEntity(vec![FieldError::new("email", e)])
            }
            UserError::InvalidPassword(e) => {
                ApiError::UnprocessableEntity(vec![FieldError::new("password", e)])
            }
            UserError::InvalidBirthdate(e) => {
                ApiError::UnprocessableEntity(vec![FieldError::new("birthdate", e)])
            }
            UserError::InvalidUserId(_) => ApiError::BadRequest(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::InvalidMovieId(_) => ApiError::BadRequest(err.to_string()),
            MovieError::NotFound(_)
            | MovieError::GenreNotFound(_)
            | MovieError::DirectorNotFound(_) => ApiError::NotFound(err.to_string()),
            MovieError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::BadRequest(err.to_string()),
            AuthError::TokenInvalid => ApiError::Unauthorized(err.to_string()),
            AuthError::Unavailable(_) => ApiError::ServiceUnavailable(err.to_string()),
            AuthError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                ApiError::UnprocessableEntity(vec![FieldError::new("body", e.body_text())])
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String, errors: Vec<FieldError>) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message, errors },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// Validation failure attached to one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Display) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Collects every field error of a request body instead of stopping at the first.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Record the error of `result`, if any, under `field`.
    pub fn check<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(FieldError::new(field, e));
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::UnprocessableEntity(errors.0)
    }
}

/// Outward representation of a user. Has no password hash field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub birthdate: Option<NaiveDate>,
    pub favorite_movies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        (&user.profile()).into()
    }
}

impl From<&UserProfile> for UserData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.as_str().to_string(),
            email: profile.email.as_str().to_string(),
            birthdate: profile.birthdate,
            favorite_movies: profile
                .favorite_movies
                .iter()
                .map(ToString::to_string)
                .collect(),
            created_at: profile.created_at,
        }
    }
}
