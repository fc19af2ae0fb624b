use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::Username;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    current_user.ensure_owns(&username)?;
    let username = Username::new(username).map_err(UserError::from)?;

    state
        .user_service
        .get_user(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
