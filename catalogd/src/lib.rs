//! catalogd: catalog persistence and reconciliation service.
//!
//! A small HTTP service that stores two kinds of catalog records (tools and
//! prompt templates) in SQLite, gates mutations behind JWT admin sessions,
//! and ships a client-side cache that reconciles against the server and
//! tolerates its absence.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::str::FromStr;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post, put},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    auth::password,
    db::handlers::Users,
    db::models::users::UserCreateDBRequest,
    openapi::ApiDoc,
};
pub use config::Config;
pub use types::{PromptId, ToolId, UserId};

/// Embedded sqlx migrations, applied on startup and by `#[sqlx::test]`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub db: SqlitePool,
    /// Application configuration loaded from environment/files
    pub config: Config,
}

/// Create the initial admin identity if it does not exist yet.
///
/// Idempotent by existence, not by credential value: when a user with the
/// configured username is already present, nothing happens, even if the
/// configured password has changed since.
#[instrument(skip_all, fields(username = %username))]
pub async fn create_initial_admin_user(username: &str, password: &str, db: &SqlitePool) -> anyhow::Result<UserId> {
    let mut tx = db.begin().await?;

    let existing = Users::new(&mut tx).get_by_username(username).await?;
    if let Some(existing) = existing {
        debug!("Admin user already exists, leaving credentials untouched");
        return Ok(existing.id);
    }

    let password = password.to_string();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string(&password)).await??;

    let created = Users::new(&mut tx)
        .create(&UserCreateDBRequest {
            username: username.to_string(),
            password_hash,
        })
        .await?;
    tx.commit().await?;

    info!(user_id = created.id, "Created initial admin user");
    Ok(created.id)
}

/// Build the application router: API routes, OpenAPI docs, CORS, and tracing.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = create_cors_layer(&state.config)?;

    let api_routes = Router::new()
        .route("/login", post(api::handlers::auth::login))
        .route("/session", get(api::handlers::auth::session_info))
        .route("/tools", get(api::handlers::tools::list_tools).post(api::handlers::tools::create_tool))
        .route(
            "/tools/{id}",
            put(api::handlers::tools::update_tool).delete(api::handlers::tools::delete_tool),
        )
        .route(
            "/prompts",
            get(api::handlers::prompts::list_prompts).post(api::handlers::prompts::create_prompt),
        )
        .route(
            "/prompts/{id}",
            put(api::handlers::prompts::update_prompt).delete(api::handlers::prompts::delete_prompt),
        )
        .route("/seed", post(api::handlers::seed::seed_catalog))
        .with_state(state);

    Ok(Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        ))
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers([axum::http::header::AUTHORIZATION, axum::http::header::CONTENT_TYPE]))
}

/// Connect to SQLite, run migrations.
async fn setup_database(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// The running application: router, configuration, and database pool.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects the pool, runs migrations,
///    and bootstraps the admin identity
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles requests
/// 3. **Shutdown**: on the shutdown signal, drains connections and closes the
///    pool
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Like [`Application::new`], but reuse an existing pool (tests hand in
    /// the `#[sqlx::test]` pool here).
    pub async fn new_with_pool(config: Config, pool: Option<SqlitePool>) -> anyhow::Result<Self> {
        debug!("Starting catalog service with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => {
                MIGRATOR.run(&pool).await?;
                pool
            }
            None => setup_database(&config).await?,
        };

        match config.admin_password.as_deref() {
            Some(admin_password) => {
                create_initial_admin_user(&config.admin_username, admin_password, &pool).await?;
            }
            None => {
                warn!("No admin_password configured, skipping admin bootstrap; write routes will stay unreachable");
            }
        }

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Catalog service listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::password::verify_string;

    #[sqlx::test]
    async fn test_admin_bootstrap_is_idempotent_by_existence(pool: SqlitePool) {
        let first = create_initial_admin_user("admin", "original-password", &pool).await.unwrap();
        // Second run with a different configured password must not rotate the
        // stored credential
        let second = create_initial_admin_user("admin", "changed-password", &pool).await.unwrap();
        assert_eq!(first, second);

        let mut conn = pool.acquire().await.unwrap();
        let user = Users::new(&mut conn).get_by_username("admin").await.unwrap().unwrap();
        assert!(verify_string("original-password", &user.password_hash).unwrap());
        assert!(!verify_string("changed-password", &user.password_hash).unwrap());
    }

    #[sqlx::test]
    async fn test_application_skips_bootstrap_without_password(pool: SqlitePool) {
        let config = Config {
            secret_key: Some("s".to_string()),
            admin_password: None,
            ..Default::default()
        };
        Application::new_with_pool(config, Some(pool.clone())).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        assert!(Users::new(&mut conn).get_by_username("admin").await.unwrap().is_none());
    }
}
