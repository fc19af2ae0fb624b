use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Username;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<DeleteUserResponseData>, ApiError> {
    current_user.ensure_owns(&username)?;
    let username = Username::new(username).map_err(UserError::from)?;

    state.user_service.delete_user(&username).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteUserResponseData {
            message: format!("{} was deleted.", username),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteUserResponseData {
    pub message: String,
}
