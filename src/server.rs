use axum::{Router, routing::get};
use std::{net::SocketAddr, str::FromStr};

use crate::{
    api,
    config::Config,
    error, info,
    proxy::SpotifyProxy,
    spotify::SpotifyClient,
    warning,
};

/// Builds the application router around an existing proxy.
pub fn router(proxy: SpotifyProxy) -> Router {
    Router::new()
        .route("/", get(api::dashboard))
        .route("/health", get(api::health))
        .route(
            "/api/spotify",
            get(api::spotify::read).post(api::spotify::mutate),
        )
        .with_state(proxy)
}

pub async fn start_api_server(config: &Config) {
    let proxy = SpotifyProxy::new(SpotifyClient::from_config(config), config.token_provider());
    let app = router(proxy);

    let addr = match SocketAddr::from_str(&config.server_address) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    if config.access_token.is_none() {
        warning!("SPOTIFY_ACCESS_TOKEN is not set; API requests will fail until it is");
    }
    info!("Dashboard available at http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
