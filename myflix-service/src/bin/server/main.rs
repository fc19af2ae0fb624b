use std::sync::Arc;

use auth::PasswordHasher;
use myflix_service::config::Config;
use myflix_service::config::StorageBackend;
use myflix_service::domain::movie::catalog::starter_catalog;
use myflix_service::domain::movie::ports::MovieRepository;
use myflix_service::domain::movie::ports::MovieServicePort;
use myflix_service::domain::movie::service::MovieService;
use myflix_service::domain::session::ports::SessionServicePort;
use myflix_service::domain::session::service::SessionService;
use myflix_service::domain::user::ports::UserRepository;
use myflix_service::domain::user::ports::UserServicePort;
use myflix_service::domain::user::service::UserService;
use myflix_service::inbound::http::router::create_router;
use myflix_service::outbound::repositories::InMemoryMovieRepository;
use myflix_service::outbound::repositories::InMemoryUserRepository;
use myflix_service::outbound::repositories::PostgresMovieRepository;
use myflix_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

struct Services {
    user_service: Arc<dyn UserServicePort>,
    movie_service: Arc<dyn MovieServicePort>,
    session_service: Arc<dyn SessionServicePort>,
}

fn build_services<UR, MR>(users: Arc<UR>, movies: Arc<MR>, config: &Config) -> Services
where
    UR: UserRepository,
    MR: MovieRepository,
{
    let auth_config = config.auth_config();
    let password_hasher =
        PasswordHasher::with_scheme(auth_config.hash_scheme, auth_config.bcrypt_cost);

    Services {
        user_service: Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&movies),
            password_hasher,
        )),
        movie_service: Arc::new(MovieService::new(movies)),
        session_service: Arc::new(SessionService::new(users, &auth_config)),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "myflix_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "myflix-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_ttl_days = config.jwt.expiration_days,
        bcrypt_cost = config.password.bcrypt_cost,
        "Configuration loaded"
    );

    let services = match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresMovieRepository::new(pg_pool)),
                &config,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");
            let catalog = starter_catalog();
            tracing::info!(movies = catalog.len(), "Movie catalog seeded");
            build_services(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryMovieRepository::with_movies(catalog)),
                &config,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        services.user_service,
        services.movie_service,
        services.session_service,
    );

    axum::serve(http_listener, http_application).await?;
    tracing::info!("Server exited");

    Ok(())
}
