use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_favorite::add_favorite;
use super::handlers::create_user::create_user;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::login::login;
use super::handlers::movies::get_director;
use super::handlers::movies::get_genre;
use super::handlers::movies::get_movie;
use super::handlers::movies::list_movies;
use super::handlers::remove_favorite::remove_favorite;
use super::handlers::update_user::update_user;
use super::handlers::welcome::welcome;
use super::middleware::authenticate as auth_middleware;
use crate::domain::movie::ports::MovieServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub movie_service: Arc<dyn MovieServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
}

/// Build the HTTP API.
///
/// `/`, `/login` and registration are public; every other route requires a
/// bearer token, and `/users/:username` routes additionally require that
/// the token belongs to that user.
pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    movie_service: Arc<dyn MovieServicePort>,
    session_service: Arc<dyn SessionServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        movie_service,
        session_service,
    };

    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/login", post(login))
        .route("/users", post(create_user));

    let protected_routes = Router::new()
        .route(
            "/users/:username",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/users/:username/movies/:movie_id",
            post(add_favorite).delete(remove_favorite),
        )
        .route("/movies", get(list_movies))
        .route("/movies/:title", get(get_movie))
        .route("/movies/genres/:name", get(get_genre))
        .route("/movies/directors/:name", get(get_director))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers and bodies stay out of spans: they carry tokens and passwords.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
