//! Configuration management for the Spotify dashboard proxy.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. Values are read once into a [`Config`] at startup and
//! then handed to the components that need them, so nothing below the binary
//! entry point touches the process environment directly.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{SpotifyError, types::Credential};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` in the current working directory first, then in the
/// platform-specific local data directory under `spotdash/.env`. Variables
/// already present in the process environment are never overwritten, and a
/// missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotdash/.env`
/// - macOS: `~/Library/Application Support/spotdash/.env`
/// - Windows: `%LOCALAPPDATA%/spotdash/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotdash/.env");
    path
}

/// Runtime configuration, resolved once from the environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// `SPOTIFY_ACCESS_TOKEN`, the bearer credential for every upstream call.
    pub access_token: Option<String>,
    /// `SPOTIFY_CLIENT_ID`, only needed for the client-credentials grant.
    pub client_id: Option<String>,
    /// `SPOTIFY_CLIENT_SECRET`, only needed for the client-credentials grant.
    pub client_secret: Option<String>,
    /// `SPOTIFY_API_URL`
    pub api_url: String,
    /// `SPOTIFY_API_TOKEN_URL`
    pub token_url: String,
    /// `SERVER_ADDRESS`
    pub server_address: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            access_token: var("SPOTIFY_ACCESS_TOKEN"),
            client_id: var("SPOTIFY_CLIENT_ID"),
            client_secret: var("SPOTIFY_CLIENT_SECRET"),
            api_url: var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_url: var("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            server_address: var("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        }
    }

    pub fn token_provider(&self) -> TokenProvider {
        TokenProvider::new(self.access_token.clone())
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Hands out the single bearer credential used for all upstream calls.
///
/// The token is injected at construction. Absence is only reported when a
/// request actually needs the credential, so the server can start (and serve
/// the dashboard and health check) without one.
#[derive(Debug, Clone, Default)]
pub struct TokenProvider {
    token: Option<String>,
}

impl TokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Returns the configured credential.
    ///
    /// # Errors
    ///
    /// [`SpotifyError::Configuration`] if the token is unset, empty or blank.
    /// The token is not validated in any other way; an expired token is only
    /// discovered when the upstream rejects it.
    pub fn access_token(&self) -> Result<Credential, SpotifyError> {
        match self.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(Credential::new(token)),
            _ => Err(SpotifyError::Configuration(
                "SPOTIFY_ACCESS_TOKEN not found in environment variables. Please set it in .env"
                    .to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_a_configuration_error() {
        let err = TokenProvider::new(None).access_token().unwrap_err();
        assert!(matches!(err, SpotifyError::Configuration(_)));
        assert!(err.to_string().contains("SPOTIFY_ACCESS_TOKEN"));
    }

    #[test]
    fn blank_token_is_a_configuration_error() {
        for blank in ["", "   ", "\n"] {
            let err = TokenProvider::new(Some(blank.to_string()))
                .access_token()
                .unwrap_err();
            assert!(matches!(err, SpotifyError::Configuration(_)));
        }
    }

    #[test]
    fn token_is_returned_as_is() {
        let token = TokenProvider::new(Some("BQC-abc".to_string()))
            .access_token()
            .unwrap();
        assert_eq!(token.as_str(), "BQC-abc");
    }

    #[test]
    fn config_builds_provider_from_access_token() {
        let config = Config {
            access_token: Some("token".into()),
            ..Config::default()
        };
        assert!(config.token_provider().access_token().is_ok());
        assert!(Config::default().token_provider().access_token().is_err());
    }
}
