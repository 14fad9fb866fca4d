use reqwest::Client;
use serde_json::Value;

use crate::{
    Result, SpotifyError,
    config::Config,
    types::AppToken,
};

/// Requests an application token via the client-credentials grant.
///
/// Such a token is not tied to a user, so it cannot be used for any of the
/// `/me` endpoints the proxy serves; it exists for diagnostics and for
/// setting up a user token by other means.
///
/// # Errors
///
/// - [`SpotifyError::Configuration`] if `SPOTIFY_CLIENT_ID` or
///   `SPOTIFY_CLIENT_SECRET` is missing
/// - [`SpotifyError::Auth`] if the accounts service rejects the credentials
/// - [`SpotifyError::Upstream`] for any other failure
pub async fn request_app_token(config: &Config) -> Result<AppToken> {
    const OPERATION: &str = "get Spotify access token";

    let (Some(client_id), Some(client_secret)) = (&config.client_id, &config.client_secret)
    else {
        return Err(SpotifyError::Configuration(
            "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set for the client credentials grant"
                .to_string(),
        ));
    };

    let client = Client::new();
    let res = client
        .post(&config.token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| SpotifyError::transport(OPERATION, e))?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        // The accounts service answers `{"error": "...", "error_description": "..."}`
        // rather than the Web API error object.
        let detail = serde_json::from_str::<Value>(&body).ok().and_then(|v| {
            v["error_description"]
                .as_str()
                .or_else(|| v["error"].as_str())
                .map(str::to_string)
        });
        return Err(SpotifyError::from_status(
            status.as_u16(),
            OPERATION,
            detail.as_deref(),
        ));
    }

    res.json::<AppToken>()
        .await
        .map_err(|e| SpotifyError::transport(OPERATION, e))
}
