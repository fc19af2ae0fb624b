use std::fmt;

use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::parse_birthdate;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a user (raw JSON)
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub birthdate: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, FieldErrors> {
        let mut errors = FieldErrors::default();

        let command = UpdateUserCommand {
            username: self
                .username
                .and_then(|raw| errors.check("username", Username::new(raw))),
            password: self
                .password
                .and_then(|raw| errors.check("password", Password::new(raw))),
            email: self
                .email
                .and_then(|raw| errors.check("email", EmailAddress::new(raw))),
            birthdate: self
                .birthdate
                .and_then(|raw| errors.check("birthdate", parse_birthdate(&raw))),
        };

        if errors.is_empty() {
            Ok(command)
        } else {
            Err(errors)
        }
    }
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("birthdate", &self.birthdate)
            .finish()
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
    req: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(req) = req?;
    current_user.ensure_owns(&username)?;
    let username = Username::new(username).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&username, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
