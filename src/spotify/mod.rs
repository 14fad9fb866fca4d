//! # Spotify Integration Module
//!
//! This module is the only place that talks to the Spotify Web API. Each
//! domain operation the proxy offers maps to exactly one upstream call (two
//! for playlist creation), implemented as an inherent method of
//! [`SpotifyClient`] in a feature-specific submodule:
//!
//! ```text
//! Action Router (crate::proxy)
//!          ↓
//! SpotifyClient
//!     ├── tracks   (top tracks)
//!     ├── player   (currently playing, pause, play)
//!     ├── artists  (followed artists)
//!     ├── user     (current profile)
//!     ├── playlist (create, add tracks)
//!     └── auth     (client-credentials grant)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Error Handling
//!
//! Every method returns [`crate::Result`]. Failed responses are classified
//! once, in [`SpotifyClient::send`]:
//! - **401** becomes [`SpotifyError::Auth`], whether reported by the HTTP
//!   status or by the `error.status` field of the JSON body (the body's
//!   `error.status` is trusted the same way for 404)
//! - everything else becomes [`SpotifyError::Upstream`] carrying the status
//!   and the upstream `error.message` (or a default phrase)
//!
//! Player commands additionally map a 404 to [`SpotifyError::NoActiveDevice`].
//!
//! ## API Coverage
//!
//! - `GET /me/top/tracks`
//! - `GET /me/player/currently-playing`
//! - `PUT /me/player/pause`
//! - `PUT /me/player/play`
//! - `GET /me/following?type=artist`
//! - `GET /me`
//! - `POST /me/playlists`
//! - `POST /playlists/{playlist_id}/tracks`
//! - `POST /api/token` (accounts service, client-credentials grant)
//!
//! No retries, timeouts or pagination are performed; every call is a single
//! round trip.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    Result, SpotifyError,
    config::Config,
    types::{Credential, ErrorResponse},
    warning,
};

pub mod artists;
pub mod auth;
pub mod player;
pub mod playlist;
pub mod tracks;
pub mod uri;
pub mod user;

pub use auth::request_app_token;
pub use tracks::clamp_limit;
pub use uri::normalize_track_uri;

/// HTTP client for the Spotify Web API.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    /// Creates a client for the given API base URL, e.g. `https://api.spotify.com/v1`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    /// Creates a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, token: &Credential, path: &str) -> RequestBuilder {
        self.http.get(self.url(path)).bearer_auth(token.as_str())
    }

    pub(crate) fn put(&self, token: &Credential, path: &str) -> RequestBuilder {
        self.http.put(self.url(path)).bearer_auth(token.as_str())
    }

    pub(crate) fn post(&self, token: &Credential, path: &str) -> RequestBuilder {
        self.http.post(self.url(path)).bearer_auth(token.as_str())
    }

    /// Sends a request and classifies a non-success answer.
    ///
    /// `operation` is the phrase used in error messages, e.g. "get top tracks".
    pub(crate) async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let err = SpotifyError::transport(operation, err);
                warning!("{}", err);
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&body).ok();
        let body_status = parsed.as_ref().and_then(|p| p.error.status);
        let detail = parsed.as_ref().and_then(|p| p.error.message.as_deref());

        let code = if status == StatusCode::UNAUTHORIZED {
            401
        } else {
            body_status
                .filter(|s| matches!(s, 401 | 404))
                .unwrap_or(status.as_u16())
        };

        let err = SpotifyError::from_status(code, operation, detail);
        warning!("{} (HTTP {})", err, status.as_u16());
        Err(err)
    }

    /// Sends a request and decodes the JSON answer.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<T> {
        let response = self.send(request, operation).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SpotifyError::transport(operation, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let client = SpotifyClient::new("https://api.spotify.com/v1/");
        assert_eq!(client.api_url(), "https://api.spotify.com/v1");
        assert_eq!(client.url("/me"), "https://api.spotify.com/v1/me");
        assert_eq!(
            client.url("me/top/tracks"),
            "https://api.spotify.com/v1/me/top/tracks"
        );
    }
}
