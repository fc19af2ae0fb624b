use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::MovieId;
use crate::domain::user::models::Username;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path((username, movie_id)): Path<(String, String)>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    current_user.ensure_owns(&username)?;
    let username = Username::new(username).map_err(UserError::from)?;
    let movie_id = MovieId::from_string(&movie_id).map_err(MovieError::from)?;

    state
        .user_service
        .add_favorite(&username, &movie_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
