pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    config::{Config, CorsConfig},
    llm::create_vision_client,
    receipt::ReceiptAnalyzer,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub fn app_state(config: &Config) -> AppState {
    let client = create_vision_client(&config.llm);
    AppState {
        analyzer: Arc::new(ReceiptAnalyzer::from_config(client, &config.llm)),
        failure_format: config.llm.failure_format,
    }
}

/// Builds the HTTP routes without CORS or tracing layers.
pub fn routes(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/upload", post(handlers::upload_receipt))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    // Browsers never send a trailing slash in the Origin header.
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .trim_end_matches('/')
                .parse::<HeaderValue>()
                .map_err(|_| Error::config(format!("Invalid CORS origin: '{}'", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn app(state: AppState, config: &Config) -> Result<Router> {
    Ok(routes(state, config.server.max_upload_bytes)
        .layer(cors_layer(&config.server.cors)?)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run(config: Config) -> Result<()> {
    let state = app_state(&config);
    let router = app(state, &config)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} using {:?} model {}",
        addr, config.llm.provider, config.llm.model
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
