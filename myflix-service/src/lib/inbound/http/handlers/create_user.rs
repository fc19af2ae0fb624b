use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use super::UserData;
use crate::domain::user::models::parse_birthdate;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;
    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    username: String,
    password: String,
    email: String,
    birthdate: Option<String>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, FieldErrors> {
        let mut errors = FieldErrors::default();

        let username = errors.check("username", Username::new(self.username));
        let password = errors.check("password", Password::new(self.password));
        let email = errors.check("email", EmailAddress::new(self.email));
        let birthdate = self
            .birthdate
            .and_then(|raw| errors.check("birthdate", parse_birthdate(&raw)));

        match (username, password, email) {
            (Some(username), Some(password), Some(email)) if errors.is_empty() => Ok(
                CreateUserCommand::new(username, email, password, birthdate),
            ),
            _ => Err(errors),
        }
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .field("birthdate", &self.birthdate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str, email: &str, birthdate: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            birthdate: birthdate.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request() {
        let command = request("alice", "Secret123", "alice@example.com", Some("1990-01-01"))
            .try_into_command()
            .expect("Request should be valid");

        assert_eq!(command.username.as_str(), "alice");
        assert!(command.birthdate.is_some());
    }

    #[test]
    fn test_every_invalid_field_is_reported() {
        let errors = request("al", "", "not-an-email", Some("yesterday"))
            .try_into_command()
            .unwrap_err();

        match ApiError::from(errors) {
            ApiError::UnprocessableEntity(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["username", "password", "email", "birthdate"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let body = request("alice", "Secret123", "alice@example.com", None);
        assert!(!format!("{:?}", body).contains("Secret123"));
    }
}
