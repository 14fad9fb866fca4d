//! Error taxonomy for upstream calls and request dispatch.
//!
//! Every failure the proxy can report is one of the variants below. The
//! Spotify client produces them, the router matches on them exhaustively to
//! pick an HTTP status, and their `Display` output becomes the `message` of
//! the failure envelope.

use axum::http::StatusCode;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpotifyError>;

pub const AUTH_MESSAGE: &str =
    "Spotify access token is invalid or expired. Please update SPOTIFY_ACCESS_TOKEN";

pub const NO_DEVICE_MESSAGE: &str =
    "No active Spotify device found. Please start playing music on a device first";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpotifyError {
    /// A required configuration value (the access token, the client id, ...)
    /// is missing or empty.
    #[error("{0}")]
    Configuration(String),

    /// The upstream rejected the bearer credential (HTTP 401).
    #[error("{}", AUTH_MESSAGE)]
    Auth,

    /// A playback command found no device to act on (HTTP 404 on the player API).
    #[error("{}", NO_DEVICE_MESSAGE)]
    NoActiveDevice,

    /// The inbound request is malformed or incomplete.
    #[error("{0}")]
    Validation(String),

    /// A track identifier could not be turned into a `spotify:track:` URI.
    #[error("Invalid track URI: {0}. Must be in format: spotify:track:TRACK_ID, https://open.spotify.com/track/TRACK_ID, or TRACK_ID")]
    InvalidUri(String),

    /// Any other upstream or transport failure.
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
}

impl SpotifyError {
    /// Classifies a failed upstream response.
    ///
    /// `operation` is the human phrase used in messages ("get top tracks"),
    /// `detail` the upstream-supplied error message if there was one.
    pub fn from_status(status: u16, operation: &str, detail: Option<&str>) -> Self {
        match status {
            401 => Self::Auth,
            _ => Self::Upstream {
                status: Some(status),
                message: format!(
                    "Failed to {}: {}",
                    operation,
                    detail
                        .filter(|d| !d.trim().is_empty())
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Failed to {}", operation))
                ),
            },
        }
    }

    /// Wraps a transport level failure (connection refused, bad JSON, ...).
    pub fn transport(operation: &str, err: reqwest::Error) -> Self {
        match err.status().map(|s| s.as_u16()) {
            Some(401) => Self::Auth,
            status => Self::Upstream {
                status,
                message: format!("Failed to {}: {}", operation, err),
            },
        }
    }

    /// Reinterprets a 404 from the player API as "no active device".
    pub fn into_playback(self) -> Self {
        match self {
            Self::Upstream {
                status: Some(404), ..
            } => Self::NoActiveDevice,
            other => other,
        }
    }

    /// HTTP status the router reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth => StatusCode::UNAUTHORIZED,
            Self::Configuration(_)
            | Self::NoActiveDevice
            | Self::InvalidUri(_)
            | Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_auth_error() {
        let err = SpotifyError::from_status(401, "get current user", Some("The access token expired"));
        assert_eq!(err, SpotifyError::Auth);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), AUTH_MESSAGE);
    }

    #[test]
    fn other_status_keeps_upstream_message() {
        let err = SpotifyError::from_status(429, "get top tracks", Some("API rate limit exceeded"));
        assert_eq!(
            err.to_string(),
            "Failed to get top tracks: API rate limit exceeded"
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_detail_falls_back_to_default_phrase() {
        let err = SpotifyError::from_status(500, "get followed artists", None);
        assert_eq!(
            err.to_string(),
            "Failed to get followed artists: Failed to get followed artists"
        );

        let blank = SpotifyError::from_status(502, "get followed artists", Some("  "));
        assert_eq!(blank.to_string(), err.to_string());
    }

    #[test]
    fn not_found_is_only_a_device_error_for_playback() {
        let err = SpotifyError::from_status(404, "pause playback", Some("Player command failed"));
        assert!(matches!(err, SpotifyError::Upstream { status: Some(404), .. }));
        assert_eq!(err.into_playback(), SpotifyError::NoActiveDevice);

        let auth = SpotifyError::Auth.into_playback();
        assert_eq!(auth, SpotifyError::Auth);

        let other = SpotifyError::from_status(500, "start playback", None).into_playback();
        assert!(matches!(other, SpotifyError::Upstream { status: Some(500), .. }));
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            SpotifyError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SpotifyError::Configuration("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SpotifyError::NoActiveDevice.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SpotifyError::InvalidUri("Invalid track URI format".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
