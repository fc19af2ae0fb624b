use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;

use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: Username,
}

impl AuthenticatedUser {
    /// Ownership check for routes addressing `/users/:username`.
    ///
    /// # Errors
    /// * `Forbidden` - The path names a different user than the token
    pub fn ensure_owns(&self, username: &str) -> Result<(), ApiError> {
        if self.username.as_str() == username {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %self.user_id,
                target = %username,
                "Rejected access to another user's account"
            );
            Err(ApiError::Forbidden(
                "Not allowed to act on another user's account".to_string(),
            ))
        }
    }
}

/// Middleware that resolves the bearer token to a user and adds it to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?.to_string();

    let user = state.session_service.authorize(&token).await.map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/movies");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_token_from_header(&req), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_rejects_missing_or_malformed_header() {
        for header in [None, Some("Basic dXNlcjpwYXNz"), Some("Bearer "), Some("abc.def.ghi")] {
            let req = request_with(header);
            assert!(matches!(
                extract_token_from_header(&req),
                Err(ApiError::Unauthorized(_))
            ));
        }
    }

    #[test]
    fn test_ensure_owns() {
        let user = AuthenticatedUser {
            user_id: UserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
        };

        assert!(user.ensure_owns("alice").is_ok());
        assert!(matches!(
            user.ensure_owns("bobby"),
            Err(ApiError::Forbidden(_))
        ));
    }
}
