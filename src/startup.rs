use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers;
use crate::models;
use crate::services::{database::is_authentication_error, MongoDb};
use axum::{routing::get, Router};
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: MongoDb,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let uri = config.mongodb.connection_string();
        let db = MongoDb::connect(&uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

        // Credential failures are logged but not fatal: seeding is
        // skipped and every request will surface the same error. Any
        // other ping failure is fatal.
        match db.ping().await {
            Ok(()) => {
                if config.seed_on_startup {
                    let songs = models::seed_dataset()?;
                    db.reseed(&songs).await?;
                }
            }
            Err(e) if is_authentication_error(&e) => {
                tracing::error!("Authentication error: {}", e);
            }
            Err(e) => {
                tracing::error!("MongoDB ping failed: {}", e);
                return Err(AppError::from(e));
            }
        }

        let state = AppState { db: db.clone() };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/count", get(handlers::count_songs))
            .route(
                "/song",
                get(handlers::list_songs).post(handlers::create_song),
            )
            .route(
                "/song/:id",
                get(handlers::get_song)
                    .put(handlers::update_song)
                    .delete(handlers::delete_song),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &MongoDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
