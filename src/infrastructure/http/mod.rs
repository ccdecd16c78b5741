pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, table::TableController, tts::TtsController};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::TtsRepository;

/// Build the application router. Shared by the server and the e2e tests.
pub fn build_router(
    config: &Config,
    tts_repo: Arc<dyn TtsRepository>,
    table_controller: Arc<TableController>,
    tts_controller: Arc<TtsController>,
) -> Router {
    // Column listing and preview
    let table_routes = Router::new()
        .route("/api/tables/columns", post(TableController::columns))
        .route("/api/tables/preview", post(TableController::preview))
        .with_state(table_controller);

    // Conversion routes, one per input variant
    let tts_routes = Router::new()
        .route("/api/tts/csv", post(TtsController::convert_csv))
        .route("/api/tts/text-file", post(TtsController::convert_text_file))
        .route("/api/tts/text", post(TtsController::convert_text))
        .with_state(tts_controller);

    let mut app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(tts_repo)
        .merge(table_routes)
        .merge(tts_routes)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    if config.is_development() {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    tts_repo: Arc<dyn TtsRepository>,
    table_controller: Arc<TableController>,
    tts_controller: Arc<TtsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(&config, tts_repo, table_controller, tts_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
