pub mod handlers;
pub mod types;

use crate::{Result, config::Config, inference::HttpInferenceClient};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/azure-ml-api", post(handlers::json_relay))
        .route("/local-ml-api", post(handlers::form_relay))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let json_relay = HttpInferenceClient::new(config.relay.json.clone())?;
    let form_relay = HttpInferenceClient::new(config.relay.form.clone())?;
    info!("JSON relay endpoint: {}", json_relay.url());
    info!("Form relay endpoint: {}", form_relay.url());

    let app_state = AppState {
        json_relay: Arc::new(json_relay),
        form_relay: Arc::new(form_relay),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
